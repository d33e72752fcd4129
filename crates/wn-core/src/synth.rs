//! Deterministic synthetic order generator.
//!
//! Used by tests and the demo binary to build reproducible order sets
//! without a data file.  Every call draws from one seeded `SmallRng`, so the
//! same seed and the same call sequence always yield identical orders.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{BoundingBox, GeoPoint, OrderId, OrderRecord};

/// Kilometres per degree of latitude, rounded for sampling offsets.
const KM_PER_DEG: f64 = 111.195;

/// Seconds in one day.
const DAY_SECS: i64 = 86_400;

/// Seeded order factory.  Ids are assigned sequentially from zero.
pub struct OrderSynth {
    rng: SmallRng,
    next_id: u32,
    /// Timestamp of day 0, 00:00.
    epoch: i64,
    /// Number of distinct days timestamps are spread over.
    days: u32,
}

impl OrderSynth {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_id: 0,
            epoch: 1_704_067_200, // 2024-01-01T00:00:00Z
            days: 1,
        }
    }

    /// Spread generated timestamps uniformly over `days` days (min 1).
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days.max(1);
        self
    }

    /// Number of orders generated so far.
    pub fn generated(&self) -> u32 {
        self.next_id
    }

    /// `count` orders with both points uniform in `bbox`.
    pub fn uniform(&mut self, bbox: &BoundingBox, count: usize) -> Vec<OrderRecord> {
        (0..count)
            .map(|_| {
                let pickup = self.point_in(bbox);
                let delivery = self.point_in(bbox);
                self.record(pickup, delivery)
            })
            .collect()
    }

    /// `count` orders whose delivery points fall inside a square of
    /// half-width `half_deg` degrees around `center`.  Pickups are drawn
    /// from the same square.
    pub fn pocket(&mut self, center: GeoPoint, half_deg: f64, count: usize) -> Vec<OrderRecord> {
        (0..count)
            .map(|_| {
                let pickup = self.jitter(center, half_deg);
                let delivery = self.jitter(center, half_deg);
                self.record(pickup, delivery)
            })
            .collect()
    }

    /// `count` orders delivered within `radius_km` of `center`, picked up at
    /// `pickup`.
    pub fn disc(
        &mut self,
        pickup: GeoPoint,
        center: GeoPoint,
        radius_km: f64,
        count: usize,
    ) -> Vec<OrderRecord> {
        (0..count)
            .map(|_| {
                let delivery = self.point_in_disc(center, radius_km);
                self.record(pickup, delivery)
            })
            .collect()
    }

    fn record(&mut self, pickup: GeoPoint, delivery: GeoPoint) -> OrderRecord {
        let id = OrderId(self.next_id);
        self.next_id += 1;
        let day = self.rng.gen_range(0..self.days) as i64;
        let second = self.rng.gen_range(0..DAY_SECS);
        OrderRecord::new(id, self.epoch + day * DAY_SECS + second, pickup, delivery)
    }

    fn point_in(&mut self, bbox: &BoundingBox) -> GeoPoint {
        GeoPoint::new(
            self.rng.gen_range(bbox.min_lat..=bbox.max_lat),
            self.rng.gen_range(bbox.min_lon..=bbox.max_lon),
        )
    }

    fn jitter(&mut self, center: GeoPoint, half_deg: f64) -> GeoPoint {
        GeoPoint::new(
            center.lat + self.rng.gen_range(-half_deg..=half_deg),
            center.lon + self.rng.gen_range(-half_deg..=half_deg),
        )
    }

    fn point_in_disc(&mut self, center: GeoPoint, radius_km: f64) -> GeoPoint {
        // sqrt keeps the areal density uniform
        let r = radius_km * self.rng.r#gen::<f64>().sqrt();
        let theta = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let d_lat = r * theta.sin() / KM_PER_DEG;
        let d_lon = r * theta.cos() / (KM_PER_DEG * center.lat.to_radians().cos());
        GeoPoint::new(center.lat + d_lat, center.lon + d_lon)
    }
}
