//! Administrative boundary units (postal codes, wards) with point lookup.
//!
//! Polygons use `x = longitude, y = latitude`, the GeoJSON axis order.
//! Lookups first filter by bounding box through an R-tree, then run an exact
//! point-in-polygon test.  Overlapping units resolve to the lowest index.

use geo::{BoundingRect, Centroid, Contains, MultiPolygon, Point};
use rstar::{AABB, RTree, RTreeObject};
use rustc_hash::FxHashMap;

use wn_core::GeoPoint;

use crate::{SpatialError, SpatialResult};

// ── BoundaryUnit ──────────────────────────────────────────────────────────────

/// One administrative area.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryUnit {
    /// Unique code (`"560001"`).
    pub code: String,
    pub name: Option<String>,
    pub shape: MultiPolygon<f64>,
    /// Area centroid; used for nearest-unit fallback.
    pub centroid: GeoPoint,
}

impl BoundaryUnit {
    /// Build a unit, rejecting shapes without area.
    pub fn new(
        code: impl Into<String>,
        name: Option<String>,
        shape: MultiPolygon<f64>,
    ) -> SpatialResult<Self> {
        let code = code.into();
        let Some(c) = shape.centroid() else {
            return Err(SpatialError::InvalidGeometry { code, reason: "empty geometry".into() });
        };
        let centroid = GeoPoint::new(c.y(), c.x());
        if !centroid.is_valid() {
            return Err(SpatialError::InvalidGeometry {
                code,
                reason: "centroid is not a valid coordinate".into(),
            });
        }
        Ok(Self { code, name, shape, centroid })
    }

    /// Strict interior test; points on the outline are not contained.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.shape.contains(&Point::new(p.lon, p.lat))
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct UnitEnvelope {
    bbox: AABB<[f64; 2]>, // [lon, lat]
    idx: usize,
}

impl RTreeObject for UnitEnvelope {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bbox
    }
}

// ── BoundarySet ───────────────────────────────────────────────────────────────

/// Immutable collection of boundary units with a bounding-box index.
#[derive(Clone)]
pub struct BoundarySet {
    units: Vec<BoundaryUnit>,
    by_code: FxHashMap<String, usize>,
    tree: RTree<UnitEnvelope>,
}

impl BoundarySet {
    /// Index `units`.  Codes must be unique.
    pub fn new(units: Vec<BoundaryUnit>) -> SpatialResult<Self> {
        let mut by_code = FxHashMap::default();
        let mut entries = Vec::with_capacity(units.len());
        for (idx, unit) in units.iter().enumerate() {
            if by_code.insert(unit.code.clone(), idx).is_some() {
                return Err(SpatialError::DuplicateCode(unit.code.clone()));
            }
            let Some(rect) = unit.shape.bounding_rect() else {
                return Err(SpatialError::InvalidGeometry {
                    code: unit.code.clone(),
                    reason: "no bounding rectangle".into(),
                });
            };
            entries.push(UnitEnvelope {
                bbox: AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                idx,
            });
        }
        Ok(Self { units, by_code, tree: RTree::bulk_load(entries) })
    }

    pub fn empty() -> Self {
        Self { units: Vec::new(), by_code: FxHashMap::default(), tree: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[BoundaryUnit] {
        &self.units
    }

    pub fn get(&self, idx: usize) -> Option<&BoundaryUnit> {
        self.units.get(idx)
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    /// Lowest-index unit whose interior contains `p`.
    pub fn locate(&self, p: GeoPoint) -> Option<usize> {
        let q = AABB::from_point([p.lon, p.lat]);
        self.tree
            .locate_in_envelope_intersecting(&q)
            .map(|e| e.idx)
            .filter(|&i| self.units[i].contains(p))
            .min()
    }

    /// Unit with the nearest centroid.  Ties resolve to the lower index.
    pub fn nearest(&self, p: GeoPoint) -> Option<usize> {
        wn_core::nearest_site(p, self.units.iter().map(|u| u.centroid)).map(|(i, _)| i)
    }

    /// [`locate`](Self::locate), falling back to [`nearest`](Self::nearest)
    /// for points outside every unit.
    pub fn locate_or_nearest(&self, p: GeoPoint) -> Option<usize> {
        self.locate(p).or_else(|| self.nearest(p))
    }
}

impl Default for BoundarySet {
    fn default() -> Self {
        Self::empty()
    }
}
