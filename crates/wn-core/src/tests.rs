//! Unit tests for wn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{OrderId, WarehouseId};

    #[test]
    fn index_roundtrip() {
        let id = OrderId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(OrderId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(WarehouseId(0) < WarehouseId(1));
        assert!(OrderId(100) > OrderId(99));
    }

    #[test]
    fn invalid_sentinel_is_default() {
        assert_eq!(WarehouseId::default(), WarehouseId::INVALID);
        assert_eq!(OrderId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(WarehouseId(7).to_string(), "WarehouseId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{BoundingBox, GeoPoint, LocalProjection, nearest_site};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(12.9716, 77.5946);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(12.0, 77.5);
        let b = GeoPoint::new(13.0, 77.5);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.5, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(12.9610, 77.6387);
        let b = GeoPoint::new(13.0358, 77.5970);
        assert_eq!(a.distance_km(b), b.distance_km(a));
    }

    #[test]
    fn coincidence_threshold() {
        let a = GeoPoint::new(12.9610, 77.6387);
        // ~33 m north
        let b = GeoPoint::new(12.9613, 77.6387);
        assert!(a.coincides_with(b, 50.0));
        assert!(!a.coincides_with(b, 10.0));
    }

    #[test]
    fn centroid_of_points() {
        let c = GeoPoint::centroid([GeoPoint::new(12.0, 77.0), GeoPoint::new(13.0, 78.0)]).unwrap();
        assert_eq!(c, GeoPoint::new(12.5, 77.5));
        assert!(GeoPoint::centroid(std::iter::empty()).is_none());
    }

    #[test]
    fn bbox_contains_is_inclusive() {
        let bbox = BoundingBox::new(12.0, 13.0, 77.0, 78.0);
        assert!(bbox.contains(GeoPoint::new(12.0, 77.0)));
        assert!(bbox.contains(GeoPoint::new(13.0, 78.0)));
        assert!(!bbox.contains(GeoPoint::new(13.01, 77.5)));
        assert!(!bbox.contains(GeoPoint::new(f64::NAN, 77.5)));
    }

    #[test]
    fn bbox_well_formed() {
        assert!(BoundingBox::new(12.0, 13.0, 77.0, 78.0).is_well_formed());
        assert!(!BoundingBox::new(13.0, 12.0, 77.0, 78.0).is_well_formed());
        assert!(!BoundingBox::new(12.0, 13.0, f64::INFINITY, 78.0).is_well_formed());
    }

    #[test]
    fn projection_tracks_haversine() {
        let origin = GeoPoint::new(12.97, 77.59);
        let proj = LocalProjection::new(origin);
        let p = GeoPoint::new(13.01, 77.63);
        let [x, y] = proj.project(p);
        let planar = (x * x + y * y).sqrt();
        let great_circle = origin.distance_km(p);
        assert!((planar - great_circle).abs() / great_circle < 0.005);
        assert_eq!(proj.project(origin), [0.0, 0.0]);
    }

    #[test]
    fn nearest_site_prefers_lower_index_on_tie() {
        let sites = [GeoPoint::new(12.0, 77.1), GeoPoint::new(12.0, 76.9)];
        let (idx, _) = nearest_site(GeoPoint::new(12.0, 77.0), sites).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn nearest_site_empty() {
        assert!(nearest_site(GeoPoint::new(12.0, 77.0), std::iter::empty()).is_none());
    }
}

#[cfg(test)]
mod order {
    use crate::{BoundingBox, CoreError, GeoPoint, OrderId, OrderRecord};

    #[test]
    fn validate_rejects_outside_region() {
        let region = BoundingBox::new(12.7, 13.2, 77.3, 77.9);
        let ok = OrderRecord::new(OrderId(1), 0, GeoPoint::new(12.9, 77.6), GeoPoint::new(13.0, 77.5));
        assert!(ok.validate(&region).is_ok());

        let bad = OrderRecord::new(OrderId(2), 0, GeoPoint::new(12.9, 77.6), GeoPoint::new(0.0, 0.0));
        assert!(matches!(bad.validate(&region), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn day_index() {
        let o = OrderRecord::new(OrderId(0), 86_400 * 3 + 5, GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0));
        assert_eq!(o.day(), 3);
        let early = OrderRecord::new(OrderId(0), -1, GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0));
        assert_eq!(early.day(), -1);
    }
}

#[cfg(test)]
mod config {
    use crate::{ClusteringConfig, CoreError, DeliveryRadius, NetworkConfig, PlacementConfig};

    #[test]
    fn min_points_scales_with_radius() {
        let c = ClusteringConfig::default();
        assert_eq!(c.min_points(DeliveryRadius::Km2), 32);
        assert_eq!(c.min_points(DeliveryRadius::Km3), 70);
        assert_eq!(c.min_points(DeliveryRadius::Km5), 195);
    }

    #[test]
    fn min_points_track_neighbourhood_area() {
        let c = ClusteringConfig::default();
        for r in DeliveryRadius::ALL {
            let area = std::f64::consts::PI * c.neighborhood_km(r).powi(2);
            let density = c.min_points(r) as f64 / area;
            // 70 orders per 3 km disc, give or take the rounding of one order
            assert!((density - 70.0 / (std::f64::consts::PI * 9.0)).abs() < 1.0 / area, "{r}: {density}");
        }
    }

    #[test]
    fn min_points_never_decreases() {
        let c = ClusteringConfig { base_min_points: 7, reference_radius_km: 3.0, neighborhood_scale: 1.0 };
        let pts: Vec<usize> = DeliveryRadius::ALL.iter().map(|&r| c.min_points(r)).collect();
        assert!(pts.windows(2).all(|w| w[0] <= w[1]), "{pts:?}");
    }

    #[test]
    fn radius_from_km() {
        assert_eq!(DeliveryRadius::try_from(5).unwrap(), DeliveryRadius::Km5);
        assert!(matches!(DeliveryRadius::try_from(4), Err(CoreError::Config(_))));
        assert_eq!(DeliveryRadius::Km2.to_string(), "2 km");
    }

    #[test]
    fn auxiliary_capacity_floor_and_buffer() {
        let p = PlacementConfig::default();
        assert_eq!(p.auxiliary_capacity(10), 200);
        assert_eq!(p.auxiliary_capacity(300), 390);
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = NetworkConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.main_hubs.len(), 5);
    }

    #[test]
    fn validate_rejects_empty_hubs() {
        let mut cfg = NetworkConfig::default();
        cfg.main_hubs.sites.clear();
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn validate_rejects_hub_outside_region() {
        let mut cfg = NetworkConfig::default();
        cfg.main_hubs.sites[0].location.lat = 20.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_target() {
        let cfg = NetworkConfig::default().with_target_daily_orders(Some(0));
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod warehouse {
    use crate::{AuxiliarySize, GeoPoint, MainHubConfig, OrderId, Warehouse, WarehouseId};

    #[test]
    fn size_tiers() {
        assert_eq!(AuxiliarySize::for_capacity(200), AuxiliarySize::Small);
        assert_eq!(AuxiliarySize::for_capacity(300), AuxiliarySize::Medium);
        assert_eq!(AuxiliarySize::for_capacity(399), AuxiliarySize::Medium);
        assert_eq!(AuxiliarySize::for_capacity(400), AuxiliarySize::Large);
    }

    #[test]
    fn main_and_auxiliary_constructors() {
        let hubs = MainHubConfig::bengaluru();
        let main = Warehouse::main(WarehouseId(0), &hubs.sites[0], 3.0);
        assert!(main.is_main());
        assert_eq!(main.size(), None);
        assert_eq!(main.parent, None);

        let aux = Warehouse::auxiliary(WarehouseId(5), 1, GeoPoint::new(13.1, 77.6), 260, 3.0, WarehouseId(1), 8.2);
        assert!(!aux.is_main());
        assert_eq!(aux.code, "AX1");
        assert_eq!(aux.size(), Some(AuxiliarySize::Small));
        assert_eq!(aux.parent, Some(WarehouseId(1)));
    }

    #[test]
    fn served_ids_are_sorted() {
        let hubs = MainHubConfig::bengaluru();
        let w = Warehouse::main(WarehouseId(0), &hubs.sites[0], 3.0)
            .with_served(vec![OrderId(3), OrderId(1), OrderId(2)]);
        assert_eq!(w.served_order_ids, [OrderId(1), OrderId(2), OrderId(3)]);
    }
}

#[cfg(test)]
mod synth {
    use crate::{GeoPoint, NetworkConfig, OrderSynth};

    #[test]
    fn same_seed_same_orders() {
        let region = NetworkConfig::bengaluru_region();
        let a = OrderSynth::new(9).uniform(&region, 50);
        let b = OrderSynth::new(9).uniform(&region, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn ids_are_sequential_and_points_in_region() {
        let region = NetworkConfig::bengaluru_region();
        let mut synth = OrderSynth::new(1).with_days(7);
        let mut orders = synth.uniform(&region, 20);
        orders.extend(synth.pocket(GeoPoint::new(13.0, 77.6), 0.003, 10));
        assert_eq!(synth.generated(), 30);
        for (i, o) in orders.iter().enumerate() {
            assert_eq!(o.id.index(), i);
            assert!(o.validate(&region).is_ok());
        }
    }

    #[test]
    fn disc_stays_within_radius() {
        let center = GeoPoint::new(12.97, 77.59);
        let orders = OrderSynth::new(3).disc(center, center, 2.0, 200);
        assert!(orders.iter().all(|o| o.delivery_point.distance_km(center) <= 2.01));
    }
}
