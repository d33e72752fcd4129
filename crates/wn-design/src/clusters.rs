//! DBSCAN over gap orders.

use tracing::info;

use wn_core::{ClusteringConfig, DeliveryRadius, GeoPoint, OrderId, OrderRecord};
use wn_spatial::Dbscan;

use crate::DesignResult;

/// A dense pocket of gap orders.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    /// Positions in the order slice, ascending.
    pub members: Vec<usize>,
    /// Ids of the member orders, ascending.
    pub member_order_ids: Vec<OrderId>,
    /// Mean delivery point of the members.
    pub centroid: GeoPoint,
    /// Largest member distance from the centroid.
    pub density_radius_km: f64,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Smallest member id; the final tie-break between equal clusters.
    pub fn min_order_id(&self) -> OrderId {
        self.member_order_ids.first().copied().unwrap_or(OrderId::INVALID)
    }
}

/// Effective DBSCAN parameters of one run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterParams {
    pub eps_km: f64,
    pub min_points: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusteringOutcome {
    pub clusters: Vec<Cluster>,
    /// Candidate positions left unclustered, ascending.
    pub noise: Vec<usize>,
}

impl ClusteringOutcome {
    pub fn clustered_orders(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }
}

/// Finds dense pockets among a subset of orders.
pub struct DemandClusterer {
    params: ClusterParams,
}

impl DemandClusterer {
    pub fn new(config: &ClusteringConfig, radius: DeliveryRadius) -> Self {
        Self {
            params: ClusterParams {
                eps_km: config.neighborhood_km(radius),
                min_points: config.min_points(radius),
            },
        }
    }

    pub fn params(&self) -> ClusterParams {
        self.params
    }

    /// Cluster the delivery points of `candidates` (positions into `orders`).
    ///
    /// Groups smaller than `min_points` can occur when border points were
    /// claimed by an earlier cluster; those members are returned as noise.
    pub fn cluster(&self, orders: &[OrderRecord], candidates: &[usize]) -> DesignResult<ClusteringOutcome> {
        let dbscan = Dbscan::new(self.params.eps_km, self.params.min_points)?;
        let points: Vec<GeoPoint> = candidates.iter().map(|&i| orders[i].delivery_point).collect();
        let labels = dbscan.run(&points);

        let mut noise: Vec<usize> = labels.noise().into_iter().map(|i| candidates[i]).collect();
        let mut clusters = Vec::with_capacity(labels.cluster_count);

        for group in labels.clusters() {
            let members: Vec<usize> = group.into_iter().map(|i| candidates[i]).collect();
            if members.len() < self.params.min_points {
                noise.extend(members);
                continue;
            }
            let Some(centroid) = GeoPoint::centroid(members.iter().map(|&i| orders[i].delivery_point))
            else {
                continue;
            };
            let density_radius_km = members
                .iter()
                .map(|&i| orders[i].delivery_point.distance_km(centroid))
                .fold(0.0, f64::max);
            let mut member_order_ids: Vec<OrderId> = members.iter().map(|&i| orders[i].id).collect();
            member_order_ids.sort_unstable();

            clusters.push(Cluster { members, member_order_ids, centroid, density_radius_km });
        }
        noise.sort_unstable();
        let outcome = ClusteringOutcome { clusters, noise };

        info!(
            candidates = candidates.len(),
            clusters = outcome.clusters.len(),
            noise = outcome.noise.len(),
            eps_km = self.params.eps_km,
            min_points = self.params.min_points,
            "demand clustering complete"
        );
        Ok(outcome)
    }
}
