//! Warehouse model shared by every stage of a design run.

use crate::{GeoPoint, MainHubSite, OrderId, WarehouseId};

/// Role of a warehouse in the two-tier network.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarehouseKind {
    /// Fixed, externally configured hub (first-mile consolidation,
    /// middle-mile restocking).
    Main,
    /// Depot created by the placement engine to cover a demand cluster.
    Auxiliary,
}

/// Size tier of an auxiliary depot, derived from its daily capacity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuxiliarySize {
    Small,
    Medium,
    Large,
}

impl AuxiliarySize {
    /// Tier for a daily capacity: ≥ 400 Large, ≥ 300 Medium, otherwise Small.
    pub fn for_capacity(capacity_orders_per_day: u32) -> Self {
        match capacity_orders_per_day {
            c if c >= 400 => AuxiliarySize::Large,
            c if c >= 300 => AuxiliarySize::Medium,
            _ => AuxiliarySize::Small,
        }
    }
}

/// A main hub or auxiliary depot.
///
/// `served_order_ids` is empty while the network is being built and is
/// filled from the territory partition when the final result is assembled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warehouse {
    pub id: WarehouseId,
    /// Short human-readable code (`"NTH"`, `"AX3"`, …).
    pub code: String,
    pub kind: WarehouseKind,
    pub centroid: GeoPoint,
    pub capacity_orders_per_day: u32,
    /// Circular service radius used when no boundary data is available.
    pub coverage_radius_km: f64,
    /// Nearest main hub, for auxiliaries.  `None` for main hubs.
    pub parent: Option<WarehouseId>,
    /// Great-circle distance to `parent`; 0 for main hubs.
    pub distance_to_parent_km: f64,
    /// Administrative unit containing the site, when boundary data exists.
    pub boundary_code: Option<String>,
    /// Sorted ids of the orders in this warehouse's territory.
    pub served_order_ids: Vec<OrderId>,
}

impl Warehouse {
    /// Build a main hub from its configured site.
    pub fn main(id: WarehouseId, site: &MainHubSite, coverage_radius_km: f64) -> Self {
        Self {
            id,
            code: site.code.clone(),
            kind: WarehouseKind::Main,
            centroid: site.location,
            capacity_orders_per_day: site.capacity_orders_per_day,
            coverage_radius_km,
            parent: None,
            distance_to_parent_km: 0.0,
            boundary_code: None,
            served_order_ids: Vec::new(),
        }
    }

    /// Build an auxiliary depot.  `ordinal` is 1-based and only feeds the code.
    pub fn auxiliary(
        id: WarehouseId,
        ordinal: usize,
        centroid: GeoPoint,
        capacity_orders_per_day: u32,
        coverage_radius_km: f64,
        parent: WarehouseId,
        distance_to_parent_km: f64,
    ) -> Self {
        Self {
            id,
            code: format!("AX{ordinal}"),
            kind: WarehouseKind::Auxiliary,
            centroid,
            capacity_orders_per_day,
            coverage_radius_km,
            parent: Some(parent),
            distance_to_parent_km,
            boundary_code: None,
            served_order_ids: Vec::new(),
        }
    }

    #[inline]
    pub fn is_main(&self) -> bool {
        self.kind == WarehouseKind::Main
    }

    /// Size tier for auxiliaries; `None` for main hubs.
    pub fn size(&self) -> Option<AuxiliarySize> {
        match self.kind {
            WarehouseKind::Main => None,
            WarehouseKind::Auxiliary => Some(AuxiliarySize::for_capacity(self.capacity_orders_per_day)),
        }
    }

    /// Return a copy carrying the given served-order set.
    pub fn with_served(mut self, mut ids: Vec<OrderId>) -> Self {
        ids.sort_unstable();
        self.served_order_ids = ids;
        self
    }

    pub fn with_boundary_code(mut self, code: Option<String>) -> Self {
        self.boundary_code = code;
        self
    }
}
