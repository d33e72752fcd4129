//! Design observer trait and the built-in implementations.

use tracing::{debug, info};

use wn_core::{NetworkConfig, Warehouse};
use wn_design::{ClusteringOutcome, HubAssignment, PlacementDecision, TerritoryPlan};

use crate::NetworkDesignResult;

/// Hooks called by [`NetworkDesigner::design`](crate::NetworkDesigner::design)
/// at each stage boundary.
///
/// All methods have default no-op implementations so callers only override
/// what they need.  Hooks receive shared references to the stage outputs;
/// they observe the run and cannot change it.
pub trait DesignObserver {
    /// Called once, after input validation and before any stage runs.
    fn on_design_start(&mut self, _orders: usize, _config: &NetworkConfig) {}

    fn on_hubs_assigned(&mut self, _assignment: &HubAssignment) {}

    /// Called with an empty outcome when the input is degenerate.
    fn on_clusters_found(&mut self, _clustering: &ClusteringOutcome) {}

    /// Called for each new auxiliary, in creation order.
    fn on_auxiliary_placed(&mut self, _warehouse: &Warehouse, _decision: &PlacementDecision) {}

    /// Called for each cluster that did not produce a warehouse.
    fn on_cluster_skipped(&mut self, _decision: &PlacementDecision) {}

    fn on_territories_assigned(&mut self, _plan: &TerritoryPlan) {}

    /// Called once with the finished snapshot.
    fn on_design_complete(&mut self, _result: &NetworkDesignResult) {}
}

/// A [`DesignObserver`] that does nothing.
pub struct NoopObserver;

impl DesignObserver for NoopObserver {}

/// Forwards every hook to `tracing` events under the `wn_pipeline` target.
pub struct TracingObserver;

impl DesignObserver for TracingObserver {
    fn on_design_start(&mut self, orders: usize, config: &NetworkConfig) {
        info!(
            orders,
            radius = %config.delivery_radius,
            mode = ?config.capacity_mode,
            target = ?config.target_daily_orders,
            main_hubs = config.main_hubs.len(),
            "design run started"
        );
    }

    fn on_hubs_assigned(&mut self, assignment: &HubAssignment) {
        for load in &assignment.loads {
            debug!(
                hub = %load.hub,
                delivery = load.delivery_orders,
                pickup = load.pickup_orders,
                gaps = load.gap_orders,
                "hub load"
            );
        }
    }

    fn on_clusters_found(&mut self, clustering: &ClusteringOutcome) {
        info!(
            clusters = clustering.clusters.len(),
            clustered = clustering.clustered_orders(),
            noise = clustering.noise.len(),
            "gap demand clustered"
        );
    }

    fn on_auxiliary_placed(&mut self, warehouse: &Warehouse, decision: &PlacementDecision) {
        info!(
            code = %warehouse.code,
            centroid = %warehouse.centroid,
            members = decision.members,
            capacity = warehouse.capacity_orders_per_day,
            parent_km = warehouse.distance_to_parent_km,
            "auxiliary placed"
        );
    }

    fn on_cluster_skipped(&mut self, decision: &PlacementDecision) {
        debug!(cluster = decision.cluster, members = decision.members, verdict = ?decision.verdict, "cluster skipped");
    }

    fn on_territories_assigned(&mut self, plan: &TerritoryPlan) {
        debug!(
            territories = plan.territories.len(),
            fallback_orders = plan.fallback_orders,
            used_boundaries = plan.used_boundaries,
            "territories assigned"
        );
    }

    fn on_design_complete(&mut self, result: &NetworkDesignResult) {
        info!(
            warehouses = result.warehouses.len(),
            auxiliaries = result.auxiliary_count(),
            vehicles = result.fleet.total_vehicles(),
            monthly_total = result.costs.total,
            cost_per_order = ?result.costs.cost_per_order,
            "design run complete"
        );
    }
}
