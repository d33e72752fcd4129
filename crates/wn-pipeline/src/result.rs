//! The read-only snapshot produced by one design run.

use wn_core::{CapacityMode, DeliveryRadius, OrderId, Warehouse, WarehouseId};
use wn_design::{ClusterParams, HubLoad, PlacementDecision, Territory};
use wn_fleet::{CostBreakdown, FleetSizing, VolumePlan};

/// How well the final network reaches the sample's delivery points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageStats {
    pub total_orders: usize,
    /// Orders whose delivery point lies within the delivery radius of the
    /// warehouse owning their territory.
    pub within_radius: usize,
    /// `within_radius / total_orders`; `None` for an empty sample.
    pub within_radius_share: Option<f64>,
    /// Orders beyond the radius of every main hub.
    pub gap_orders: usize,
    pub clustered_orders: usize,
    pub noise_orders: usize,
    /// Orders outside every boundary unit, assigned by distance instead.
    pub fallback_orders: usize,
}

/// Everything one run produced.
///
/// Warehouses sit in an arena indexed by [`WarehouseId`]: the main hubs in
/// configuration order, then the auxiliaries in creation order.
/// `territories[i]` belongs to `warehouses[i]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkDesignResult {
    pub delivery_radius: DeliveryRadius,
    pub capacity_mode: CapacityMode,
    /// Name of the placement policy that ran.
    pub policy: String,
    /// No orders, or every delivery point identical.
    pub degenerate: bool,
    pub cluster_params: ClusterParams,

    pub warehouses: Vec<Warehouse>,
    pub territories: Vec<Territory>,
    pub used_boundaries: bool,
    pub hub_loads: Vec<HubLoad>,
    pub placements: Vec<PlacementDecision>,

    pub volume: VolumePlan,
    pub fleet: FleetSizing,
    pub costs: CostBreakdown,
    pub coverage: CoverageStats,
}

impl NetworkDesignResult {
    pub fn main_count(&self) -> usize {
        self.warehouses.iter().filter(|w| w.is_main()).count()
    }

    pub fn auxiliary_count(&self) -> usize {
        self.warehouses.len() - self.main_count()
    }

    pub fn auxiliaries(&self) -> impl Iterator<Item = &Warehouse> + '_ {
        self.warehouses.iter().filter(|w| !w.is_main())
    }

    #[inline]
    pub fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        self.warehouses.get(id.index())
    }

    pub fn territory(&self, id: WarehouseId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    /// Warehouse whose territory holds `order`.
    pub fn territory_of(&self, order: OrderId) -> Option<WarehouseId> {
        self.territories
            .iter()
            .find(|t| t.assigned_order_ids.binary_search(&order).is_ok())
            .map(|t| t.warehouse_id)
    }

    /// Every `(order, warehouse)` pair, sorted by order id.
    pub fn order_assignments(&self) -> Vec<(OrderId, WarehouseId)> {
        let mut pairs: Vec<(OrderId, WarehouseId)> = self
            .territories
            .iter()
            .flat_map(|t| t.assigned_order_ids.iter().map(move |&o| (o, t.warehouse_id)))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}
