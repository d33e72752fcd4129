//! Density-based clustering (DBSCAN) over geographic points.
//!
//! # Determinism
//!
//! Clusters are seeded from core points in ascending input order and each
//! cluster is fully expanded before the next one is seeded.  A border point
//! reachable from two clusters therefore always joins the one whose seed
//! comes first in the input, and cluster numbers follow seed order.
//!
//! A point's neighbourhood includes the point itself, so `min_points = 1`
//! turns every point into a core point.

use tracing::debug;

use wn_core::{GeoPoint, LocalProjection};

use crate::{PointIndex, SpatialError, SpatialResult};

/// DBSCAN parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dbscan {
    /// Neighbourhood radius in kilometres.
    pub eps_km: f64,
    /// Neighbours (self included) required for a core point.
    pub min_points: usize,
}

/// Per-point cluster labels produced by [`Dbscan::run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DbscanLabels {
    /// `Some(c)` for members of cluster `c`, `None` for noise.
    pub labels: Vec<Option<usize>>,
    pub cluster_count: usize,
}

impl DbscanLabels {
    /// Point positions grouped by cluster, each group ascending.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.cluster_count];
        for (i, label) in self.labels.iter().enumerate() {
            if let Some(c) = label {
                groups[*c].push(i);
            }
        }
        groups
    }

    /// Positions of noise points, ascending.
    pub fn noise(&self) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.is_none().then_some(i))
            .collect()
    }
}

impl Dbscan {
    pub fn new(eps_km: f64, min_points: usize) -> SpatialResult<Self> {
        if !(eps_km > 0.0) || !eps_km.is_finite() {
            return Err(SpatialError::InvalidParameter(format!(
                "eps must be a positive distance, got {eps_km} km"
            )));
        }
        if min_points == 0 {
            return Err(SpatialError::InvalidParameter("min_points must be at least 1".into()));
        }
        Ok(Self { eps_km, min_points })
    }

    /// Label every point.  Empty input yields empty labels.
    pub fn run(&self, points: &[GeoPoint]) -> DbscanLabels {
        let Some(origin) = GeoPoint::centroid(points.iter().copied()) else {
            return DbscanLabels::default();
        };
        let index = PointIndex::new(points, LocalProjection::new(origin));
        let core = self.core_flags(points, &index);

        let mut labels: Vec<Option<usize>> = vec![None; points.len()];
        let mut cluster_count = 0;
        let mut stack = Vec::new();

        for seed in 0..points.len() {
            if labels[seed].is_some() || !core[seed] {
                continue;
            }
            let cluster = cluster_count;
            cluster_count += 1;
            labels[seed] = Some(cluster);
            stack.push(seed);

            while let Some(p) = stack.pop() {
                for q in index.within(points[p], self.eps_km) {
                    if labels[q].is_none() {
                        labels[q] = Some(cluster);
                        if core[q] {
                            stack.push(q);
                        }
                    }
                }
            }
        }

        debug!(
            points = points.len(),
            clusters = cluster_count,
            eps_km = self.eps_km,
            min_points = self.min_points,
            "dbscan finished"
        );
        DbscanLabels { labels, cluster_count }
    }

    #[cfg(not(feature = "parallel"))]
    fn core_flags(&self, points: &[GeoPoint], index: &PointIndex) -> Vec<bool> {
        points
            .iter()
            .map(|&p| index.count_within(p, self.eps_km) >= self.min_points)
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn core_flags(&self, points: &[GeoPoint], index: &PointIndex) -> Vec<bool> {
        use rayon::prelude::*;

        points
            .par_iter()
            .map(|&p| index.count_within(p, self.eps_km) >= self.min_points)
            .collect()
    }
}
