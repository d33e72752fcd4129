//! Unit tests for wn-spatial.
//!
//! All geometry is hand-built; no boundary file is needed.

#[cfg(test)]
mod helpers {
    use geo::{LineString, MultiPolygon, Polygon};
    use wn_core::GeoPoint;

    /// Kilometres per degree at the equator on the projection sphere.
    pub const KM_PER_DEG: f64 = 111.194_926_644_558_73;

    /// Points on the equator at the given eastward offsets (km).
    pub fn line(xs_km: &[f64]) -> Vec<GeoPoint> {
        xs_km.iter().map(|x| GeoPoint::new(0.0, x / KM_PER_DEG)).collect()
    }

    /// Tight square of `n` points around `center`, ~50 m apart.
    pub fn blob(center: GeoPoint, n: usize) -> Vec<GeoPoint> {
        (0..n)
            .map(|i| {
                let dx = (i % 4) as f64 * 0.0005;
                let dy = (i / 4) as f64 * 0.0005;
                GeoPoint::new(center.lat + dy, center.lon + dx)
            })
            .collect()
    }

    /// Axis-aligned square in lon/lat.
    pub fn square(min_lon: f64, min_lat: f64, size: f64) -> MultiPolygon<f64> {
        let ring = LineString::from(vec![
            (min_lon, min_lat),
            (min_lon + size, min_lat),
            (min_lon + size, min_lat + size),
            (min_lon, min_lat + size),
            (min_lon, min_lat),
        ]);
        MultiPolygon::new(vec![Polygon::new(ring, vec![])])
    }
}

// ── PointIndex ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use wn_core::{GeoPoint, LocalProjection};

    use super::helpers::line;
    use crate::PointIndex;

    #[test]
    fn within_returns_sorted_positions() {
        let pts = line(&[3.0, 0.0, 1.0, 10.0]);
        let idx = PointIndex::new(&pts, LocalProjection::new(GeoPoint::new(0.0, 0.0)));
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.within(GeoPoint::new(0.0, 0.0), 3.5), vec![0, 1, 2]);
        assert_eq!(idx.count_within(GeoPoint::new(0.0, 0.0), 0.5), 1);
    }

    #[test]
    fn empty_index() {
        let idx = PointIndex::new(&[], LocalProjection::new(GeoPoint::new(0.0, 0.0)));
        assert!(idx.is_empty());
        assert!(idx.within(GeoPoint::new(0.0, 0.0), 100.0).is_empty());
    }
}

// ── DBSCAN ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dbscan {
    use wn_core::GeoPoint;

    use super::helpers::{blob, line};
    use crate::{Dbscan, SpatialError};

    #[test]
    fn two_blobs_and_noise() {
        let mut pts = blob(GeoPoint::new(12.97, 77.59), 12);
        pts.extend(blob(GeoPoint::new(13.05, 77.65), 12));
        pts.push(GeoPoint::new(12.80, 77.40));

        let labels = Dbscan::new(0.5, 5).unwrap().run(&pts);
        assert_eq!(labels.cluster_count, 2);
        assert!(labels.labels[..12].iter().all(|l| *l == Some(0)));
        assert!(labels.labels[12..24].iter().all(|l| *l == Some(1)));
        assert_eq!(labels.noise(), vec![24]);

        let groups = labels.clusters();
        assert_eq!(groups[0], (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn sparse_input_is_all_noise() {
        let pts = line(&[0.0, 5.0, 10.0, 15.0]);
        let labels = Dbscan::new(1.0, 2).unwrap().run(&pts);
        assert_eq!(labels.cluster_count, 0);
        assert_eq!(labels.noise().len(), 4);
    }

    #[test]
    fn neighbourhood_counts_self() {
        let pts = line(&[0.0, 50.0]);
        let labels = Dbscan::new(1.0, 1).unwrap().run(&pts);
        assert_eq!(labels.cluster_count, 2);
        assert_eq!(labels.labels, vec![Some(0), Some(1)]);
    }

    #[test]
    fn shared_border_point_joins_first_seeded_cluster() {
        // Index 4 sits 0.95 km from both groups but is not itself core.
        let pts = line(&[2.1, 2.2, 2.3, 2.4, 1.15, -0.1, 0.0, 0.1, 0.2]);
        let labels = Dbscan::new(1.0, 4).unwrap().run(&pts);
        assert_eq!(labels.cluster_count, 2);
        assert_eq!(labels.labels[4], Some(0));
        assert!(labels.labels[5..].iter().all(|l| *l == Some(1)));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut pts = blob(GeoPoint::new(12.97, 77.59), 16);
        pts.extend(line(&[0.0, 0.3]).into_iter().map(|p| GeoPoint::new(12.98 + p.lat, 77.60 + p.lon)));
        let d = Dbscan::new(0.4, 3).unwrap();
        assert_eq!(d.run(&pts), d.run(&pts));
    }

    #[test]
    fn empty_input() {
        let labels = Dbscan::new(1.0, 3).unwrap().run(&[]);
        assert_eq!(labels.cluster_count, 0);
        assert!(labels.labels.is_empty());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(Dbscan::new(0.0, 3), Err(SpatialError::InvalidParameter(_))));
        assert!(matches!(Dbscan::new(f64::NAN, 3), Err(SpatialError::InvalidParameter(_))));
        assert!(matches!(Dbscan::new(1.0, 0), Err(SpatialError::InvalidParameter(_))));
    }
}

// ── Boundaries ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod boundary {
    use geo::MultiPolygon;
    use wn_core::GeoPoint;

    use super::helpers::square;
    use crate::{BoundarySet, BoundaryUnit, SpatialError};

    fn two_units() -> BoundarySet {
        BoundarySet::new(vec![
            BoundaryUnit::new("560001", Some("West".into()), square(77.50, 12.90, 0.1)).unwrap(),
            BoundaryUnit::new("560002", Some("East".into()), square(77.60, 12.90, 0.1)).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn centroid_is_lat_lon() {
        let u = BoundaryUnit::new("X", None, square(77.50, 12.90, 0.1)).unwrap();
        assert!((u.centroid.lat - 12.95).abs() < 1e-9);
        assert!((u.centroid.lon - 77.55).abs() < 1e-9);
    }

    #[test]
    fn locate_inside() {
        let set = two_units();
        assert_eq!(set.locate(GeoPoint::new(12.95, 77.55)), Some(0));
        assert_eq!(set.locate(GeoPoint::new(12.95, 77.65)), Some(1));
        assert_eq!(set.locate(GeoPoint::new(13.50, 77.65)), None);
    }

    #[test]
    fn outside_falls_back_to_nearest_centroid() {
        let set = two_units();
        assert_eq!(set.locate_or_nearest(GeoPoint::new(12.95, 77.80)), Some(1));
        assert_eq!(set.locate_or_nearest(GeoPoint::new(12.95, 77.30)), Some(0));
    }

    #[test]
    fn overlap_resolves_to_lowest_index() {
        let set = BoundarySet::new(vec![
            BoundaryUnit::new("A", None, square(77.50, 12.90, 0.2)).unwrap(),
            BoundaryUnit::new("B", None, square(77.55, 12.95, 0.05)).unwrap(),
        ])
        .unwrap();
        assert_eq!(set.locate(GeoPoint::new(12.97, 77.57)), Some(0));
    }

    #[test]
    fn code_lookup() {
        let set = two_units();
        assert_eq!(set.position("560002"), Some(1));
        assert_eq!(set.position("999999"), None);
        assert_eq!(set.get(0).map(|u| u.code.as_str()), Some("560001"));
    }

    #[test]
    fn duplicate_codes_rejected() {
        let err = BoundarySet::new(vec![
            BoundaryUnit::new("A", None, square(77.50, 12.90, 0.1)).unwrap(),
            BoundaryUnit::new("A", None, square(77.60, 12.90, 0.1)).unwrap(),
        ]);
        assert!(matches!(err, Err(SpatialError::DuplicateCode(c)) if c == "A"));
    }

    #[test]
    fn empty_geometry_rejected() {
        let err = BoundaryUnit::new("Z", None, MultiPolygon::new(vec![]));
        assert!(matches!(err, Err(SpatialError::InvalidGeometry { .. })));
    }

    #[test]
    fn empty_set() {
        let set = BoundarySet::empty();
        assert!(set.is_empty());
        assert_eq!(set.locate_or_nearest(GeoPoint::new(12.9, 77.5)), None);
    }
}
