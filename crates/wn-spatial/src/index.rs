//! R-tree over points projected to a local kilometre plane.
//!
//! Radius queries on the plane stand in for great-circle radius queries;
//! see [`LocalProjection`] for the error bound.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use wn_core::{GeoPoint, LocalProjection};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Projected `[x_km, y_km]` point with the position of its source record.
#[derive(Clone)]
struct IndexedPoint {
    xy: [f64; 2],
    idx: usize,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xy)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.xy[0] - point[0];
        let dy = self.xy[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PointIndex ────────────────────────────────────────────────────────────────

/// Static spatial index over a point slice.  Results are positions into
/// the slice the index was built from.
pub struct PointIndex {
    projection: LocalProjection,
    tree: RTree<IndexedPoint>,
}

impl PointIndex {
    /// Bulk-load the index.
    pub fn new(points: &[GeoPoint], projection: LocalProjection) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(idx, &p)| IndexedPoint { xy: projection.project(p), idx })
            .collect();
        Self { projection, tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    pub fn projection(&self) -> &LocalProjection {
        &self.projection
    }

    /// Positions of all points within `radius_km` of `center`, ascending.
    pub fn within(&self, center: GeoPoint, radius_km: f64) -> Vec<usize> {
        let q = self.projection.project(center);
        let mut out: Vec<usize> = self
            .tree
            .locate_within_distance(q, radius_km * radius_km)
            .map(|e| e.idx)
            .collect();
        out.sort_unstable();
        out
    }

    /// Number of points within `radius_km` of `center`.
    pub fn count_within(&self, center: GeoPoint, radius_km: f64) -> usize {
        let q = self.projection.project(center);
        self.tree.locate_within_distance(q, radius_km * radius_km).count()
    }
}
