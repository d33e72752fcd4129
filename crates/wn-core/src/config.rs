//! Design-run configuration.
//!
//! Every tunable of the network design core is an explicit field here; no
//! stage reads global state.  `NetworkConfig::default()` is the Bengaluru
//! preset (five fixed hubs, 3 km delivery radius, peak sizing).

use std::fmt;

use crate::{BoundingBox, CoreError, CoreResult, GeoPoint};

// ── DeliveryRadius ────────────────────────────────────────────────────────────

/// Last-mile delivery radius offered to planners.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryRadius {
    Km2,
    #[default]
    Km3,
    Km5,
}

impl DeliveryRadius {
    pub const ALL: [DeliveryRadius; 3] = [DeliveryRadius::Km2, DeliveryRadius::Km3, DeliveryRadius::Km5];

    #[inline]
    pub fn km(self) -> f64 {
        match self {
            DeliveryRadius::Km2 => 2.0,
            DeliveryRadius::Km3 => 3.0,
            DeliveryRadius::Km5 => 5.0,
        }
    }
}

impl TryFrom<u32> for DeliveryRadius {
    type Error = CoreError;

    fn try_from(km: u32) -> CoreResult<Self> {
        match km {
            2 => Ok(DeliveryRadius::Km2),
            3 => Ok(DeliveryRadius::Km3),
            5 => Ok(DeliveryRadius::Km5),
            other => Err(CoreError::Config(format!(
                "unsupported delivery radius {other} km: expected 2, 3 or 5"
            ))),
        }
    }
}

impl fmt::Display for DeliveryRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.km())
    }
}

// ── CapacityMode ──────────────────────────────────────────────────────────────

/// Whether the fleet is sized for peak or typical daily demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapacityMode {
    #[default]
    Peak,
    Typical,
}

// ── Main hubs ─────────────────────────────────────────────────────────────────

/// One fixed main hub.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainHubSite {
    pub code: String,
    pub location: GeoPoint,
    pub capacity_orders_per_day: u32,
}

impl MainHubSite {
    pub fn new(code: impl Into<String>, location: GeoPoint, capacity_orders_per_day: u32) -> Self {
        Self { code: code.into(), location, capacity_orders_per_day }
    }
}

/// The externally supplied main-hub layout.  Order matters: the position of
/// a site is its `WarehouseId` and its rank when two hubs are equidistant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainHubConfig {
    pub sites: Vec<MainHubSite>,
}

impl MainHubConfig {
    pub fn new(sites: Vec<MainHubSite>) -> Self {
        Self { sites }
    }

    /// Five-hub Bengaluru layout.
    pub fn bengaluru() -> Self {
        Self::new(vec![
            MainHubSite::new("CTR", GeoPoint::new(12.9610, 77.6387), 600), // Domlur
            MainHubSite::new("NTH", GeoPoint::new(13.0358, 77.5970), 600), // Hebbal
            MainHubSite::new("EST", GeoPoint::new(12.9916, 77.7056), 600), // Mahadevapura
            MainHubSite::new("WST", GeoPoint::new(12.9598, 77.5250), 600), // Chandra Layout
            MainHubSite::new("STH", GeoPoint::new(12.9255, 77.5468), 600), // Banashankari
        ])
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn locations(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.sites.iter().map(|s| s.location)
    }
}

impl Default for MainHubConfig {
    fn default() -> Self {
        Self::bengaluru()
    }
}

// ── ClusteringConfig ──────────────────────────────────────────────────────────

/// DBSCAN parameters and their scaling with the delivery radius.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusteringConfig {
    /// Minimum-points threshold at `reference_radius_km`.
    pub base_min_points: usize,
    /// Radius at which `base_min_points` applies.
    pub reference_radius_km: f64,
    /// Neighbourhood radius as a multiple of the delivery radius.
    pub neighborhood_scale: f64,
}

impl ClusteringConfig {
    /// Minimum-points threshold for `radius`:
    ///
    /// ```text
    /// min_points(r) = ceil(base_min_points × (r / reference_radius_km)²)
    /// ```
    ///
    /// The neighbourhood is a disc of radius proportional to `r`, so the
    /// threshold grows with its area.  The order density a core point needs
    /// therefore stays constant across radii (up to rounding), and a
    /// uniformly sparse pocket does not start clustering as `r` widens.
    pub fn min_points(&self, radius: DeliveryRadius) -> usize {
        let ratio = radius.km() / self.reference_radius_km;
        let scaled = self.base_min_points as f64 * ratio * ratio;
        (scaled.ceil() as usize).max(1)
    }

    /// DBSCAN neighbourhood radius (km) for `radius`.
    #[inline]
    pub fn neighborhood_km(&self, radius: DeliveryRadius) -> f64 {
        radius.km() * self.neighborhood_scale
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            base_min_points:     70,
            reference_radius_km: 3.0,
            neighborhood_scale:  1.0,
        }
    }
}

// ── PlacementConfig ───────────────────────────────────────────────────────────

/// Auxiliary placement thresholds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementConfig {
    /// A cluster counts as efficiently served when at least this share of
    /// its members already lies within the delivery radius of a warehouse.
    pub served_share: f64,
    /// Cluster centroids within this distance of a warehouse are served.
    pub coincidence_epsilon_m: f64,
    /// Optional cap on the number of auxiliaries.  `None` = unbounded.
    pub max_auxiliaries: Option<usize>,
    /// Floor on auxiliary daily capacity.
    pub min_auxiliary_capacity: u32,
    /// Capacity headroom over the cluster's member count.
    pub capacity_buffer: f64,
}

impl PlacementConfig {
    /// Daily capacity for an auxiliary covering `members` orders.
    pub fn auxiliary_capacity(&self, members: usize) -> u32 {
        let buffered = (members as f64 * self.capacity_buffer).ceil() as u32;
        buffered.max(self.min_auxiliary_capacity)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            served_share:           0.5,
            coincidence_epsilon_m:  50.0,
            max_auxiliaries:        None,
            min_auxiliary_capacity: 200,
            capacity_buffer:        1.3,
        }
    }
}

// ── NetworkConfig ─────────────────────────────────────────────────────────────

/// Top-level configuration of one design run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    pub delivery_radius: DeliveryRadius,
    pub capacity_mode: CapacityMode,
    /// Scale the design to this daily volume instead of the observed sample.
    pub target_daily_orders: Option<u32>,
    pub main_hubs: MainHubConfig,
    /// Operating region; orders outside it are contract violations.
    pub region: BoundingBox,
    pub clustering: ClusteringConfig,
    pub placement: PlacementConfig,
}

impl NetworkConfig {
    /// Bengaluru operating region.
    pub fn bengaluru_region() -> BoundingBox {
        BoundingBox::new(12.70, 13.25, 77.35, 77.90)
    }

    pub fn with_radius(mut self, radius: DeliveryRadius) -> Self {
        self.delivery_radius = radius;
        self
    }

    pub fn with_capacity_mode(mut self, mode: CapacityMode) -> Self {
        self.capacity_mode = mode;
        self
    }

    pub fn with_target_daily_orders(mut self, target: Option<u32>) -> Self {
        self.target_daily_orders = target;
        self
    }

    /// Reject configurations no stage can work with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.main_hubs.is_empty() {
            return Err(CoreError::Config("at least one main hub is required".into()));
        }
        if !self.region.is_well_formed() {
            return Err(CoreError::Config("operating region bounds are malformed".into()));
        }
        for site in &self.main_hubs.sites {
            if !self.region.contains(site.location) {
                return Err(CoreError::Config(format!(
                    "main hub {} at {} lies outside the operating region",
                    site.code, site.location
                )));
            }
        }
        let c = &self.clustering;
        if c.base_min_points == 0 || !(c.reference_radius_km > 0.0) || !(c.neighborhood_scale > 0.0) {
            return Err(CoreError::Config(
                "clustering parameters must be strictly positive".into(),
            ));
        }
        let p = &self.placement;
        if !(0.0..=1.0).contains(&p.served_share) || !(p.coincidence_epsilon_m >= 0.0) {
            return Err(CoreError::Config(
                "served_share must lie in [0, 1] and coincidence_epsilon_m must be ≥ 0".into(),
            ));
        }
        if !(p.capacity_buffer >= 1.0) {
            return Err(CoreError::Config("capacity_buffer must be ≥ 1".into()));
        }
        if self.target_daily_orders == Some(0) {
            return Err(CoreError::Config("target_daily_orders must be positive when set".into()));
        }
        Ok(())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            delivery_radius:     DeliveryRadius::default(),
            capacity_mode:       CapacityMode::default(),
            target_daily_orders: None,
            main_hubs:           MainHubConfig::bengaluru(),
            region:              Self::bengaluru_region(),
            clustering:          ClusteringConfig::default(),
            placement:           PlacementConfig::default(),
        }
    }
}
