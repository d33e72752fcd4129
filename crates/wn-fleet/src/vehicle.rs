//! Vehicle catalogue, transport legs, and vehicle suitability tables.

use std::fmt;

// ── Mile ──────────────────────────────────────────────────────────────────────

/// Transport leg of the two-tier network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mile {
    /// Pickup point to main hub.
    FirstMile,
    /// Main hub to auxiliary (restocking).
    MiddleMile,
    /// Warehouse to customer.
    LastMile,
}

impl Mile {
    pub const ALL: [Mile; 3] = [Mile::FirstMile, Mile::MiddleMile, Mile::LastMile];

    pub fn as_str(self) -> &'static str {
        match self {
            Mile::FirstMile => "first_mile",
            Mile::MiddleMile => "middle_mile",
            Mile::LastMile => "last_mile",
        }
    }
}

impl fmt::Display for Mile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleType ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleType {
    Bike,
    Auto,
    MiniTruck,
    Truck,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] =
        [VehicleType::Bike, VehicleType::Auto, VehicleType::MiniTruck, VehicleType::Truck];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Bike => "bike",
            VehicleType::Auto => "auto",
            VehicleType::MiniTruck => "mini_truck",
            VehicleType::Truck => "truck",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleCatalog ────────────────────────────────────────────────────────────

/// Load and running cost of one vehicle type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    pub orders_per_trip: u32,
    /// Operating cost per vehicle per day (driver, fuel, upkeep).
    pub daily_cost: f64,
}

/// Spec for every [`VehicleType`], indexed by the type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleCatalog {
    specs: [VehicleSpec; 4],
}

impl VehicleCatalog {
    pub fn new(bike: VehicleSpec, auto: VehicleSpec, mini_truck: VehicleSpec, truck: VehicleSpec) -> Self {
        Self { specs: [bike, auto, mini_truck, truck] }
    }

    #[inline]
    pub fn spec(&self, vehicle: VehicleType) -> &VehicleSpec {
        &self.specs[vehicle.slot()]
    }

    pub fn set(&mut self, vehicle: VehicleType, spec: VehicleSpec) {
        self.specs[vehicle.slot()] = spec;
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self::new(
            VehicleSpec { orders_per_trip: 20, daily_cost: 700.0 },
            VehicleSpec { orders_per_trip: 30, daily_cost: 900.0 },
            VehicleSpec { orders_per_trip: 60, daily_cost: 1_350.0 },
            VehicleSpec { orders_per_trip: 120, daily_cost: 1_800.0 },
        )
    }
}

// ── SuitabilityTable ──────────────────────────────────────────────────────────

/// One row: use `vehicle` when the leg's daily volume and distance are both
/// within the limits.  `None` means unbounded.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRule {
    pub max_volume: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub vehicle: VehicleType,
}

impl VehicleRule {
    pub fn new(max_volume: Option<f64>, max_distance_km: Option<f64>, vehicle: VehicleType) -> Self {
        Self { max_volume, max_distance_km, vehicle }
    }

    fn matches(&self, volume: f64, distance_km: f64) -> bool {
        self.max_volume.is_none_or(|v| volume <= v)
            && self.max_distance_km.is_none_or(|d| distance_km <= d)
    }
}

/// Ordered rules; the first match wins, `fallback` otherwise.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuitabilityTable {
    pub rules: Vec<VehicleRule>,
    pub fallback: VehicleType,
}

impl SuitabilityTable {
    pub fn new(rules: Vec<VehicleRule>, fallback: VehicleType) -> Self {
        Self { rules, fallback }
    }

    pub fn select(&self, volume: f64, distance_km: f64) -> VehicleType {
        self.rules
            .iter()
            .find(|r| r.matches(volume, distance_km))
            .map_or(self.fallback, |r| r.vehicle)
    }

    /// Hub legs: autos for short low-volume runs, then mini-trucks, then trucks.
    pub fn hub_default() -> Self {
        Self::new(
            vec![
                VehicleRule::new(Some(200.0), Some(10.0), VehicleType::Auto),
                VehicleRule::new(Some(600.0), Some(20.0), VehicleType::MiniTruck),
            ],
            VehicleType::Truck,
        )
    }

    /// Last mile: bikes inside 3 km, autos beyond.
    pub fn last_mile_default() -> Self {
        Self::new(vec![VehicleRule::new(None, Some(3.0), VehicleType::Bike)], VehicleType::Auto)
    }
}

// ── Last-mile vehicle mix ─────────────────────────────────────────────────────

/// Base bike/auto split of last-mile deliveries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleMix {
    /// 30 % bike, 70 % auto.
    #[default]
    AutoHeavy,
    /// 50 / 50.
    Balanced,
    /// 70 % bike, 30 % auto.
    BikeHeavy,
}

impl VehicleMix {
    pub const ALL: [VehicleMix; 3] = [VehicleMix::AutoHeavy, VehicleMix::Balanced, VehicleMix::BikeHeavy];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleMix::AutoHeavy => "auto_heavy",
            VehicleMix::Balanced => "balanced",
            VehicleMix::BikeHeavy => "bike_heavy",
        }
    }

    /// Share of orders delivered by bike before distance adjustment.
    pub fn bike_share(self) -> f64 {
        match self {
            VehicleMix::AutoHeavy => 0.3,
            VehicleMix::Balanced => 0.5,
            VehicleMix::BikeHeavy => 0.7,
        }
    }
}

impl fmt::Display for VehicleMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits last-mile volume between bikes and autos.
///
/// Short legs shift the split towards bikes and long legs towards autos:
///
/// ```text
/// d ≤ bike_preferred_km   bike = min(max_share, base + shift)
/// d ≥ auto_preferred_km   auto = min(max_share, (1 − base) + shift)
/// otherwise               bike = base
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LastMileMix {
    pub mix: VehicleMix,
    pub bike_preferred_km: f64,
    pub auto_preferred_km: f64,
    pub shift: f64,
    /// Cap on the favoured vehicle's share after the shift.
    pub max_share: f64,
}

impl LastMileMix {
    pub fn new(mix: VehicleMix) -> Self {
        Self { mix, ..Self::default() }
    }

    /// Bike share of a leg `distance_km` long, in `[0, 1]`.
    pub fn bike_share(&self, distance_km: f64) -> f64 {
        let base = self.mix.bike_share();
        if distance_km <= self.bike_preferred_km {
            (base + self.shift).min(self.max_share)
        } else if distance_km >= self.auto_preferred_km {
            1.0 - ((1.0 - base) + self.shift).min(self.max_share)
        } else {
            base
        }
    }
}

impl Default for LastMileMix {
    fn default() -> Self {
        Self {
            mix:               VehicleMix::default(),
            bike_preferred_km: 3.0,
            auto_preferred_km: 7.0,
            shift:             0.2,
            max_share:         0.8,
        }
    }
}
