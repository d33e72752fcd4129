//! First-mile trip consolidation.
//!
//! Orders picked up at the same coordinates form one pickup site.  Within
//! each hub, sites are grouped greedily in first-seen order: the first
//! remaining site opens a trip and every remaining site within the
//! consolidation radius of it joins.  Each trip becomes one first-mile leg.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use wn_core::{GeoPoint, WarehouseId};

use crate::LegDemand;

/// One order's pickup, already assigned to its main hub.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickupPoint {
    pub hub: WarehouseId,
    pub location: GeoPoint,
    /// Distance from the pickup point to the hub.
    pub distance_km: f64,
}

/// A group of pickup sites served by one first-mile trip.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupTrip {
    pub hub: WarehouseId,
    /// The site that opened the trip.
    pub anchor: GeoPoint,
    pub sites: usize,
    pub orders: usize,
    /// Farthest site-to-hub distance in the trip.
    pub distance_km: f64,
}

impl PickupTrip {
    pub fn leg(&self) -> LegDemand {
        LegDemand { warehouse_id: self.hub, orders: self.orders, distance_km: self.distance_km }
    }
}

struct Site {
    hub: WarehouseId,
    location: GeoPoint,
    orders: usize,
    distance_km: f64,
}

/// Group `points` into first-mile trips, hub by hub in ascending id order.
///
/// A radius of zero gives one trip per distinct site.
pub fn consolidate_pickups(points: &[PickupPoint], radius_km: f64) -> Vec<PickupTrip> {
    let mut index: FxHashMap<(WarehouseId, u64, u64), usize> = FxHashMap::default();
    let mut sites: Vec<Site> = Vec::new();

    for p in points {
        let key = (p.hub, p.location.lat.to_bits(), p.location.lon.to_bits());
        match index.entry(key) {
            Entry::Occupied(e) => {
                let site = &mut sites[*e.get()];
                site.orders += 1;
                site.distance_km = site.distance_km.max(p.distance_km);
            }
            Entry::Vacant(e) => {
                e.insert(sites.len());
                sites.push(Site { hub: p.hub, location: p.location, orders: 1, distance_km: p.distance_km });
            }
        }
    }

    // stable: first-seen order survives within each hub
    sites.sort_by_key(|s| s.hub);

    let mut trips = Vec::new();
    for group in sites.chunk_by(|a, b| a.hub == b.hub) {
        let mut remaining: Vec<&Site> = group.iter().collect();
        while let Some(&anchor) = remaining.first() {
            let (joined, rest): (Vec<&Site>, Vec<&Site>) = remaining[1..]
                .iter()
                .copied()
                .partition(|s| anchor.location.distance_km(s.location) <= radius_km);

            trips.push(PickupTrip {
                hub: anchor.hub,
                anchor: anchor.location,
                sites: 1 + joined.len(),
                orders: anchor.orders + joined.iter().map(|s| s.orders).sum::<usize>(),
                distance_km: joined.iter().map(|s| s.distance_km).fold(anchor.distance_km, f64::max),
            });
            remaining = rest;
        }
    }
    trips
}
