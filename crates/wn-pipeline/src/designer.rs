//! Stage orchestration for one design run.
//!
//! ```text
//! orders ─► MainHubAssigner ─► DemandClusterer ─► AuxiliaryPlacementEngine
//!                                                        │
//!        NetworkDesignResult ◄─ CostEstimator ◄─ FleetSizer ◄─ TerritoryAssigner
//! ```
//!
//! Each stage builds a new value from the previous stage's output.  The
//! warehouse arena is assembled once from the configured mains and the
//! placed auxiliaries and never edited afterwards.

use tracing::info;

use wn_core::{GeoPoint, NetworkConfig, OrderId, OrderRecord, Warehouse, WarehouseId};
use wn_design::{
    AuxiliaryPlacementEngine, ClusteringOutcome, DemandClusterer, HubAssignment, MainHubAssigner,
    PlacementOutcome, PlacementPolicy, PlacementVerdict, TerritoryAssigner, TerritoryPlan,
};
use wn_fleet::{
    CostConfig, CostEstimator, FleetConfig, FleetDemand, FleetSizer, LegDemand, PickupPoint, PickupTrip, VolumePlan,
    consolidate_pickups,
};
use wn_spatial::BoundarySet;

use crate::{CoverageStats, DesignObserver, NetworkDesignResult, PipelineError, PipelineResult};

/// A validated, reusable network design run.
///
/// Construct with [`NetworkDesignerBuilder`](crate::NetworkDesignerBuilder).
/// [`design`](Self::design) borrows the designer immutably, so one designer
/// can serve any number of runs and independent designers can run
/// concurrently.
pub struct NetworkDesigner<P: PlacementPolicy> {
    pub(crate) config:     NetworkConfig,
    pub(crate) policy:     P,
    pub(crate) boundaries: Option<BoundarySet>,
    pub(crate) fleet:      FleetConfig,
    pub(crate) cost:       CostConfig,
}

impl<P: PlacementPolicy> NetworkDesigner<P> {
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn boundaries(&self) -> Option<&BoundarySet> {
        self.boundaries.as_ref()
    }

    pub fn fleet_config(&self) -> &FleetConfig {
        &self.fleet
    }

    pub fn cost_config(&self) -> &CostConfig {
        &self.cost
    }

    /// Run every stage over `orders` and return the finished snapshot.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidInput`] when an order lies outside the
    /// operating region or two orders share an id.  Well-formed input never
    /// fails; degenerate samples produce a mains-only network.
    pub fn design<O: DesignObserver>(
        &self,
        orders: &[OrderRecord],
        observer: &mut O,
    ) -> PipelineResult<NetworkDesignResult> {
        self.check_orders(orders)?;
        observer.on_design_start(orders.len(), &self.config);

        let radius = self.config.delivery_radius;
        let radius_km = radius.km();
        let degenerate = is_degenerate(orders);

        // ── Main hubs ─────────────────────────────────────────────────────
        let mains: Vec<Warehouse> = self
            .config
            .main_hubs
            .sites
            .iter()
            .enumerate()
            .map(|(i, site)| {
                Warehouse::main(WarehouseId(i as u32), site, radius_km)
                    .with_boundary_code(self.unit_code(site.location))
            })
            .collect();

        let hubs = MainHubAssigner::new(&self.config.main_hubs, radius_km).assign(orders)?;
        observer.on_hubs_assigned(&hubs);

        // ── Clusters and auxiliaries ──────────────────────────────────────
        let clusterer = DemandClusterer::new(&self.config.clustering, radius);
        let clustering = if degenerate {
            ClusteringOutcome::default()
        } else {
            clusterer.cluster(orders, &hubs.gap_orders)?
        };
        observer.on_clusters_found(&clustering);

        let placement = if degenerate {
            PlacementOutcome::default()
        } else {
            AuxiliaryPlacementEngine::new(&self.config.placement, radius_km, &self.policy)
                .place(orders, &mains, &clustering)?
        };
        for decision in &placement.decisions {
            let placed = match decision.verdict {
                PlacementVerdict::Placed(id) => placement.auxiliaries.iter().find(|w| w.id == id),
                _ => None,
            };
            match placed {
                Some(warehouse) => observer.on_auxiliary_placed(warehouse, decision),
                None => observer.on_cluster_skipped(decision),
            }
        }

        let arena: Vec<Warehouse> = mains
            .into_iter()
            .chain(placement.auxiliaries.into_iter().map(|w| {
                let code = self.unit_code(w.centroid);
                w.with_boundary_code(code)
            }))
            .collect();

        // ── Territories ───────────────────────────────────────────────────
        let plan = TerritoryAssigner::new(self.boundaries.as_ref()).assign(&arena, orders)?;
        observer.on_territories_assigned(&plan);

        let warehouses: Vec<Warehouse> = arena
            .into_iter()
            .zip(&plan.territories)
            .map(|(w, t)| w.with_served(t.assigned_order_ids.clone()))
            .collect();

        // ── Fleet and cost ────────────────────────────────────────────────
        let volume = if degenerate {
            VolumePlan::default()
        } else {
            VolumePlan::new(
                orders.len(),
                self.config.target_daily_orders,
                self.fleet.mode_multiplier(self.config.capacity_mode),
            )
        };

        let demand = fleet_demand(
            orders,
            &hubs,
            &warehouses,
            &plan,
            radius_km,
            self.fleet.pickup_consolidation_km,
        );
        let fleet = FleetSizer::new(&self.fleet).size(&demand, &volume)?;

        let handled: Vec<f64> = warehouses
            .iter()
            .zip(&plan.territories)
            .map(|(w, t)| {
                let pickups = if w.is_main() {
                    hubs.loads.get(w.id.index()).map_or(0, |l| l.pickup_orders)
                } else {
                    0
                };
                volume.scale(t.order_count() + pickups)
            })
            .collect();
        let costs =
            CostEstimator::new(&self.cost, &self.fleet.catalog).estimate(&warehouses, &handled, &fleet, &volume)?;

        let coverage = coverage_stats(orders, &warehouses, &hubs, &clustering, &plan, radius_km);

        info!(
            radius = %radius,
            policy = self.policy.name(),
            warehouses = warehouses.len(),
            auxiliaries = warehouses.iter().filter(|w| !w.is_main()).count(),
            within_radius = coverage.within_radius,
            degenerate,
            "network design complete"
        );

        let result = NetworkDesignResult {
            delivery_radius: radius,
            capacity_mode: self.config.capacity_mode,
            policy: self.policy.name().to_string(),
            degenerate,
            cluster_params: clusterer.params(),
            warehouses,
            territories: plan.territories,
            used_boundaries: plan.used_boundaries,
            hub_loads: hubs.loads,
            placements: placement.decisions,
            volume,
            fleet,
            costs,
            coverage,
        };
        observer.on_design_complete(&result);
        Ok(result)
    }

    fn check_orders(&self, orders: &[OrderRecord]) -> PipelineResult<()> {
        for order in orders {
            order.validate(&self.config.region)?;
        }

        let mut ids: Vec<OrderId> = orders.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(PipelineError::InvalidInput(format!("duplicate order id {}", pair[0])));
        }
        Ok(())
    }

    fn unit_code(&self, site: GeoPoint) -> Option<String> {
        let set = self.boundaries.as_ref()?;
        set.locate_or_nearest(site).map(|i| set.units()[i].code.clone())
    }
}

/// No orders, or every delivery point at the same coordinates.
fn is_degenerate(orders: &[OrderRecord]) -> bool {
    match orders.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|o| o.delivery_point == first.delivery_point),
    }
}

fn fleet_demand(
    orders: &[OrderRecord],
    hubs: &HubAssignment,
    warehouses: &[Warehouse],
    plan: &TerritoryPlan,
    radius_km: f64,
    consolidation_km: Option<f64>,
) -> FleetDemand {
    let first_mile = match consolidation_km {
        Some(radius) => {
            let points: Vec<PickupPoint> = orders
                .iter()
                .zip(&hubs.pickup_hub)
                .zip(&hubs.pickup_distance_km)
                .map(|((o, &hub), &distance_km)| PickupPoint { hub, location: o.pickup_point, distance_km })
                .collect();
            consolidate_pickups(&points, radius).iter().map(PickupTrip::leg).collect()
        }
        None => hubs
            .loads
            .iter()
            .map(|l| LegDemand {
                warehouse_id: l.hub,
                orders: l.pickup_orders,
                distance_km: hubs.farthest_pickup_km(l.hub),
            })
            .collect(),
    };

    let middle_mile = warehouses
        .iter()
        .zip(&plan.territories)
        .filter(|(w, _)| !w.is_main())
        .map(|(w, t)| LegDemand {
            warehouse_id: w.id,
            orders: t.order_count(),
            distance_km: w.distance_to_parent_km,
        })
        .collect();

    let last_mile = plan
        .territories
        .iter()
        .map(|t| LegDemand {
            warehouse_id: t.warehouse_id,
            orders: t.order_count(),
            distance_km: radius_km,
        })
        .collect();

    FleetDemand { first_mile, middle_mile, last_mile }
}

fn coverage_stats(
    orders: &[OrderRecord],
    warehouses: &[Warehouse],
    hubs: &HubAssignment,
    clustering: &ClusteringOutcome,
    plan: &TerritoryPlan,
    radius_km: f64,
) -> CoverageStats {
    let within_radius = orders
        .iter()
        .zip(&plan.order_warehouse)
        .filter(|(o, w)| o.delivery_point.distance_km(warehouses[w.index()].centroid) <= radius_km)
        .count();
    let total_orders = orders.len();

    CoverageStats {
        total_orders,
        within_radius,
        within_radius_share: (total_orders > 0).then(|| within_radius as f64 / total_orders as f64),
        gap_orders: hubs.gap_count(),
        clustered_orders: clustering.clustered_orders(),
        noise_orders: clustering.noise.len(),
        fallback_orders: plan.fallback_orders,
    }
}
