//! Nearest-main-hub assignment and coverage-gap detection.

use tracing::info;

use wn_core::{MainHubConfig, OrderRecord, WarehouseId, nearest_site};

use crate::{DesignError, DesignResult};

/// Per-hub load after nearest-hub assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HubLoad {
    pub hub: WarehouseId,
    /// Orders whose delivery point is nearest this hub.
    pub delivery_orders: usize,
    /// Orders whose pickup point is nearest this hub.
    pub pickup_orders: usize,
    /// Delivery orders beyond the delivery radius of this hub.
    pub gap_orders: usize,
}

/// Nearest-hub assignment of every order, indexed by position in the
/// order slice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HubAssignment {
    pub delivery_hub: Vec<WarehouseId>,
    pub delivery_distance_km: Vec<f64>,
    pub pickup_hub: Vec<WarehouseId>,
    pub pickup_distance_km: Vec<f64>,
    /// Positions of gap orders, ascending.
    pub gap_orders: Vec<usize>,
    /// One entry per hub, in hub order.
    pub loads: Vec<HubLoad>,
}

impl HubAssignment {
    pub fn order_count(&self) -> usize {
        self.delivery_hub.len()
    }

    pub fn gap_count(&self) -> usize {
        self.gap_orders.len()
    }

    /// Farthest pickup distance among the orders picked up by `hub`.
    pub fn farthest_pickup_km(&self, hub: WarehouseId) -> f64 {
        self.pickup_hub
            .iter()
            .zip(&self.pickup_distance_km)
            .filter(|(h, _)| **h == hub)
            .map(|(_, d)| *d)
            .fold(0.0, f64::max)
    }
}

/// Assigns orders to the nearest fixed main hub.
///
/// Main hub `i` in the configuration is `WarehouseId(i)`.  Equidistant hubs
/// resolve to the lower id.  An order is a *gap order* when the distance
/// from its delivery point to its hub strictly exceeds the delivery radius.
pub struct MainHubAssigner<'a> {
    hubs: &'a MainHubConfig,
    radius_km: f64,
}

impl<'a> MainHubAssigner<'a> {
    pub fn new(hubs: &'a MainHubConfig, radius_km: f64) -> Self {
        Self { hubs, radius_km }
    }

    pub fn assign(&self, orders: &[OrderRecord]) -> DesignResult<HubAssignment> {
        if self.hubs.is_empty() {
            return Err(DesignError::NoWarehouses);
        }

        let n = orders.len();
        let mut out = HubAssignment {
            delivery_hub: Vec::with_capacity(n),
            delivery_distance_km: Vec::with_capacity(n),
            pickup_hub: Vec::with_capacity(n),
            pickup_distance_km: Vec::with_capacity(n),
            gap_orders: Vec::new(),
            loads: (0..self.hubs.len())
                .map(|i| HubLoad { hub: WarehouseId(i as u32), ..HubLoad::default() })
                .collect(),
        };

        for (pos, order) in orders.iter().enumerate() {
            let (d_idx, d_km) = self.nearest(order.delivery_point)?;
            let (p_idx, p_km) = self.nearest(order.pickup_point)?;

            out.delivery_hub.push(WarehouseId(d_idx as u32));
            out.delivery_distance_km.push(d_km);
            out.pickup_hub.push(WarehouseId(p_idx as u32));
            out.pickup_distance_km.push(p_km);

            out.loads[d_idx].delivery_orders += 1;
            out.loads[p_idx].pickup_orders += 1;
            if d_km > self.radius_km {
                out.loads[d_idx].gap_orders += 1;
                out.gap_orders.push(pos);
            }
        }

        info!(
            orders = n,
            hubs = self.hubs.len(),
            gap_orders = out.gap_orders.len(),
            radius_km = self.radius_km,
            "main hub assignment complete"
        );
        Ok(out)
    }

    fn nearest(&self, p: wn_core::GeoPoint) -> DesignResult<(usize, f64)> {
        nearest_site(p, self.hubs.locations()).ok_or(DesignError::NoWarehouses)
    }
}
