//! Auxiliary depot placement.
//!
//! # Loop
//!
//! Clusters are visited largest first.  Equal sizes go to the cluster whose
//! centroid is nearer an existing main hub, then to the one holding the
//! smallest order id.  For each cluster, in order:
//!
//! 1. stop placing once `max_auxiliaries` depots exist,
//! 2. skip when the centroid coincides with a warehouse,
//! 3. skip when at least `served_share` of the members already lie within
//!    the delivery radius of some warehouse,
//! 4. ask the [`PlacementPolicy`] whether to site a depot,
//! 5. otherwise create an auxiliary at the centroid.
//!
//! Steps 2 and 3 see every depot placed so far, so a later cluster can be
//! covered by an earlier placement.

use tracing::debug;

use wn_core::{GeoPoint, OrderRecord, PlacementConfig, Warehouse, WarehouseId, nearest_site};

use crate::{Cluster, ClusteringOutcome, DesignError, DesignResult};

// ── PlacementPolicy ───────────────────────────────────────────────────────────

/// Decides whether an underserved cluster gets a depot.
///
/// Consulted only after the coverage checks, so a policy never sees a
/// cluster that is already served.
pub trait PlacementPolicy {
    fn name(&self) -> &'static str;

    /// `nearest_main_km` is the centroid's distance to the nearest main hub.
    fn admit(&self, cluster: &Cluster, nearest_main_km: f64) -> bool;
}

/// Every underserved cluster gets a depot, however far it is from the mains.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CoverageFirst;

impl PlacementPolicy for CoverageFirst {
    fn name(&self) -> &'static str {
        "coverage-first"
    }

    fn admit(&self, _cluster: &Cluster, _nearest_main_km: f64) -> bool {
        true
    }
}

/// Refuses depots farther than `max_parent_distance_km` from every main hub.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistancePenalized {
    pub max_parent_distance_km: f64,
}

impl PlacementPolicy for DistancePenalized {
    fn name(&self) -> &'static str {
        "distance-penalized"
    }

    fn admit(&self, _cluster: &Cluster, nearest_main_km: f64) -> bool {
        nearest_main_km <= self.max_parent_distance_km
    }
}

impl<P: PlacementPolicy + ?Sized> PlacementPolicy for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn admit(&self, cluster: &Cluster, nearest_main_km: f64) -> bool {
        (**self).admit(cluster, nearest_main_km)
    }
}

impl<P: PlacementPolicy + ?Sized> PlacementPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn admit(&self, cluster: &Cluster, nearest_main_km: f64) -> bool {
        (**self).admit(cluster, nearest_main_km)
    }
}

// ── Decisions ─────────────────────────────────────────────────────────────────

/// Outcome for one cluster.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementVerdict {
    Placed(WarehouseId),
    /// Centroid within the coincidence epsilon of this warehouse.
    Coincident(WarehouseId),
    /// Share of members already within the delivery radius of a warehouse.
    AlreadyServed { served_share: f64 },
    /// The policy declined the cluster.
    Rejected { nearest_main_km: f64 },
    CapReached,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementDecision {
    /// Index into `ClusteringOutcome::clusters`.
    pub cluster: usize,
    pub members: usize,
    pub centroid: GeoPoint,
    pub verdict: PlacementVerdict,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlacementOutcome {
    /// New depots in creation order; ids continue after the mains.
    pub auxiliaries: Vec<Warehouse>,
    /// One decision per cluster, in visiting order.
    pub decisions: Vec<PlacementDecision>,
}

// ── AuxiliaryPlacementEngine ──────────────────────────────────────────────────

pub struct AuxiliaryPlacementEngine<'a, P: PlacementPolicy> {
    config: &'a PlacementConfig,
    radius_km: f64,
    policy: P,
}

impl<'a, P: PlacementPolicy> AuxiliaryPlacementEngine<'a, P> {
    pub fn new(config: &'a PlacementConfig, radius_km: f64, policy: P) -> Self {
        Self { config, radius_km, policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Run the placement loop.  `mains` must be non-empty and carry ids
    /// `0..mains.len()`.
    pub fn place(
        &self,
        orders: &[OrderRecord],
        mains: &[Warehouse],
        clustering: &ClusteringOutcome,
    ) -> DesignResult<PlacementOutcome> {
        if mains.is_empty() {
            return Err(DesignError::NoWarehouses);
        }

        let main_sites: Vec<GeoPoint> = mains.iter().map(|w| w.centroid).collect();
        let visit = visiting_order(&clustering.clusters, &main_sites);

        let mut sites = main_sites.clone();
        let mut outcome = PlacementOutcome::default();

        for ci in visit {
            let cluster = &clustering.clusters[ci];
            let verdict = self.evaluate(orders, cluster, &main_sites, &sites, outcome.auxiliaries.len());

            if let PlacementVerdict::Placed(id) = verdict {
                let (parent, parent_km) = nearest_site(cluster.centroid, main_sites.iter().copied())
                    .ok_or(DesignError::NoWarehouses)?;
                let ordinal = outcome.auxiliaries.len() + 1;
                outcome.auxiliaries.push(Warehouse::auxiliary(
                    id,
                    ordinal,
                    cluster.centroid,
                    self.config.auxiliary_capacity(cluster.len()),
                    self.radius_km,
                    WarehouseId(parent as u32),
                    parent_km,
                ));
                sites.push(cluster.centroid);
            }

            debug!(
                cluster = ci,
                members = cluster.len(),
                centroid = %cluster.centroid,
                verdict = ?verdict,
                policy = self.policy.name(),
                "placement decision"
            );
            outcome.decisions.push(PlacementDecision {
                cluster: ci,
                members: cluster.len(),
                centroid: cluster.centroid,
                verdict,
            });
        }
        Ok(outcome)
    }

    fn evaluate(
        &self,
        orders: &[OrderRecord],
        cluster: &Cluster,
        main_sites: &[GeoPoint],
        sites: &[GeoPoint],
        placed: usize,
    ) -> PlacementVerdict {
        if self.config.max_auxiliaries.is_some_and(|cap| placed >= cap) {
            return PlacementVerdict::CapReached;
        }

        if let Some((idx, _)) = nearest_site(cluster.centroid, sites.iter().copied()) {
            if cluster.centroid.coincides_with(sites[idx], self.config.coincidence_epsilon_m) {
                return PlacementVerdict::Coincident(WarehouseId(idx as u32));
            }
        }

        let share = self.served_share(orders, cluster, sites);
        if share >= self.config.served_share {
            return PlacementVerdict::AlreadyServed { served_share: share };
        }

        let nearest_main_km = nearest_site(cluster.centroid, main_sites.iter().copied())
            .map_or(f64::INFINITY, |(_, d)| d);
        if !self.policy.admit(cluster, nearest_main_km) {
            return PlacementVerdict::Rejected { nearest_main_km };
        }

        PlacementVerdict::Placed(WarehouseId(sites.len() as u32))
    }

    /// Share of `cluster` members within the delivery radius of any site.
    fn served_share(&self, orders: &[OrderRecord], cluster: &Cluster, sites: &[GeoPoint]) -> f64 {
        if cluster.is_empty() {
            return 1.0;
        }
        let served = cluster
            .members
            .iter()
            .filter(|&&i| {
                let p = orders[i].delivery_point;
                sites.iter().any(|&s| p.distance_km(s) <= self.radius_km)
            })
            .count();
        served as f64 / cluster.len() as f64
    }
}

/// Cluster indices in visiting order.
fn visiting_order(clusters: &[Cluster], main_sites: &[GeoPoint]) -> Vec<usize> {
    let nearest_km: Vec<f64> = clusters
        .iter()
        .map(|c| nearest_site(c.centroid, main_sites.iter().copied()).map_or(f64::INFINITY, |(_, d)| d))
        .collect();

    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by(|&a, &b| {
        clusters[b]
            .len()
            .cmp(&clusters[a].len())
            .then_with(|| nearest_km[a].total_cmp(&nearest_km[b]))
            .then_with(|| clusters[a].min_order_id().cmp(&clusters[b].min_order_id()))
    });
    order
}
