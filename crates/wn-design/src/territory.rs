//! Territory partitioning over the final warehouse set.
//!
//! With boundary data every unit goes to the warehouse nearest its centroid,
//! and an order follows the unit containing its delivery point.  Orders in
//! no unit, and every order when boundary data is absent, go to the nearest
//! warehouse.  Either way each order lands in exactly one territory.

use tracing::{info, warn};

use wn_core::{GeoPoint, OrderId, OrderRecord, Warehouse, WarehouseId, nearest_site};
use wn_spatial::BoundarySet;

use crate::{DesignError, DesignResult};

/// Drawn extent of a territory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerritoryShape {
    /// Boundary units owned by the warehouse, by code, in dataset order.
    Units { codes: Vec<String> },
    /// Coverage circle.  Circles may overlap on a map; order assignment
    /// inside the overlap goes to the nearer warehouse.
    Circle { center: GeoPoint, radius_km: f64 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Territory {
    pub warehouse_id: WarehouseId,
    pub shape: TerritoryShape,
    /// Ascending.
    pub assigned_order_ids: Vec<OrderId>,
}

impl Territory {
    pub fn order_count(&self) -> usize {
        self.assigned_order_ids.len()
    }
}

/// Territories plus the per-order lookup they were built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerritoryPlan {
    /// One territory per warehouse, in warehouse order.
    pub territories: Vec<Territory>,
    /// Owning warehouse of each order, indexed by order position.
    pub order_warehouse: Vec<WarehouseId>,
    /// Orders outside every boundary unit that fell back to nearest warehouse.
    pub fallback_orders: usize,
    pub used_boundaries: bool,
}

pub struct TerritoryAssigner<'a> {
    boundaries: Option<&'a BoundarySet>,
}

impl<'a> TerritoryAssigner<'a> {
    /// `None` or an empty set selects the circle fallback.
    pub fn new(boundaries: Option<&'a BoundarySet>) -> Self {
        Self { boundaries: boundaries.filter(|b| !b.is_empty()) }
    }

    /// Partition `orders` among `warehouses`.  Warehouse `i` must carry
    /// `WarehouseId(i)`.
    pub fn assign(&self, warehouses: &[Warehouse], orders: &[OrderRecord]) -> DesignResult<TerritoryPlan> {
        if warehouses.is_empty() {
            return Err(DesignError::NoWarehouses);
        }
        if let Some((pos, w)) = warehouses.iter().enumerate().find(|(i, w)| w.id.index() != *i) {
            return Err(DesignError::InvalidInput(format!(
                "warehouse {} is out of position {pos}",
                w.id
            )));
        }
        let sites: Vec<GeoPoint> = warehouses.iter().map(|w| w.centroid).collect();

        let plan = match self.boundaries {
            Some(set) => assign_by_units(set, warehouses, &sites, orders),
            None => {
                warn!("no boundary data: territories fall back to coverage circles");
                assign_by_circles(warehouses, &sites, orders)
            }
        };

        info!(
            warehouses = warehouses.len(),
            orders = orders.len(),
            fallback_orders = plan.fallback_orders,
            used_boundaries = plan.used_boundaries,
            "territory assignment complete"
        );
        Ok(plan)
    }
}

fn assign_by_units(
    set: &BoundarySet,
    warehouses: &[Warehouse],
    sites: &[GeoPoint],
    orders: &[OrderRecord],
) -> TerritoryPlan {
    let unit_owner: Vec<usize> = set
        .units()
        .iter()
        .map(|u| nearest_index(u.centroid, sites))
        .collect();

    let located: Vec<(usize, bool)> = map_orders(orders, |o| match set.locate(o.delivery_point) {
        Some(unit) => (unit_owner[unit], false),
        None => (nearest_index(o.delivery_point, sites), true),
    });
    let fallback_orders = located.iter().filter(|(_, fell_back)| *fell_back).count();

    let mut codes: Vec<Vec<String>> = vec![Vec::new(); warehouses.len()];
    for (unit, &owner) in set.units().iter().zip(&unit_owner) {
        codes[owner].push(unit.code.clone());
    }

    let owners: Vec<usize> = located.into_iter().map(|(w, _)| w).collect();
    let shapes = codes.into_iter().map(|codes| TerritoryShape::Units { codes });
    build_plan(warehouses, orders, owners, shapes, fallback_orders, true)
}

fn assign_by_circles(warehouses: &[Warehouse], sites: &[GeoPoint], orders: &[OrderRecord]) -> TerritoryPlan {
    let owners = map_orders(orders, |o| nearest_index(o.delivery_point, sites));
    let shapes = warehouses
        .iter()
        .map(|w| TerritoryShape::Circle { center: w.centroid, radius_km: w.coverage_radius_km });
    build_plan(warehouses, orders, owners, shapes, 0, false)
}

fn build_plan(
    warehouses: &[Warehouse],
    orders: &[OrderRecord],
    owners: Vec<usize>,
    shapes: impl Iterator<Item = TerritoryShape>,
    fallback_orders: usize,
    used_boundaries: bool,
) -> TerritoryPlan {
    let mut assigned: Vec<Vec<OrderId>> = vec![Vec::new(); warehouses.len()];
    for (order, &w) in orders.iter().zip(&owners) {
        assigned[w].push(order.id);
    }

    let territories = warehouses
        .iter()
        .zip(shapes)
        .zip(assigned)
        .map(|((w, shape), mut ids)| {
            ids.sort_unstable();
            Territory { warehouse_id: w.id, shape, assigned_order_ids: ids }
        })
        .collect();

    TerritoryPlan {
        territories,
        order_warehouse: owners.into_iter().map(|w| warehouses[w].id).collect(),
        fallback_orders,
        used_boundaries,
    }
}

/// Position of the nearest site; `sites` is never empty here.
fn nearest_index(p: GeoPoint, sites: &[GeoPoint]) -> usize {
    nearest_site(p, sites.iter().copied()).map_or(0, |(i, _)| i)
}

#[cfg(not(feature = "parallel"))]
fn map_orders<T, F>(orders: &[OrderRecord], f: F) -> Vec<T>
where
    F: Fn(&OrderRecord) -> T,
{
    orders.iter().map(f).collect()
}

#[cfg(feature = "parallel")]
fn map_orders<T, F>(orders: &[OrderRecord], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&OrderRecord) -> T + Sync + Send,
{
    use rayon::prelude::*;

    orders.par_iter().map(f).collect()
}
