//! Vehicle counts per transport leg.
//!
//! ```text
//! count = ceil(sized_volume / (orders_per_trip × trips_per_day))
//! ```
//!
//! with the vehicle type picked from the leg's suitability table by sized
//! volume and leg distance.  Zero volume needs zero vehicles.  With a
//! [`LastMileMix`](crate::LastMileMix) configured, each last-mile leg is
//! split into a bike part and an auto part, sized separately.

use tracing::info;

use wn_core::WarehouseId;

use crate::{FleetConfig, FleetResult, Mile, VehicleType, VolumePlan};

/// Guards `ceil` against volumes a rounding error above a whole load.
const LOAD_EPSILON: f64 = 1e-9;

/// Sample volume and distance of one leg, before scaling.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegDemand {
    pub warehouse_id: WarehouseId,
    /// Sample orders moving on this leg per day.
    pub orders: usize,
    pub distance_km: f64,
}

/// Leg demands of one network, grouped by mile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FleetDemand {
    /// One per main hub, or one per consolidated pickup trip.
    pub first_mile: Vec<LegDemand>,
    /// One per auxiliary: restocking from the parent hub.
    pub middle_mile: Vec<LegDemand>,
    /// One per territory: deliveries from its warehouse.
    pub last_mile: Vec<LegDemand>,
}

impl FleetDemand {
    pub fn legs(&self, mile: Mile) -> &[LegDemand] {
        match mile {
            Mile::FirstMile => &self.first_mile,
            Mile::MiddleMile => &self.middle_mile,
            Mile::LastMile => &self.last_mile,
        }
    }
}

/// Sized fleet of one leg.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetLeg {
    pub mile: Mile,
    pub warehouse_id: WarehouseId,
    /// Sized daily volume.
    pub volume: f64,
    pub distance_km: f64,
    pub vehicle_type: VehicleType,
    pub count: u32,
}

/// Vehicles of one type on one mile, summed over legs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetPlan {
    pub mile: Mile,
    pub vehicle_type: VehicleType,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSizing {
    /// Per-leg detail, mile by mile in input order.
    pub legs: Vec<FleetLeg>,
    /// Non-zero totals, ordered by mile then vehicle type.
    pub plans: Vec<FleetPlan>,
}

impl FleetSizing {
    pub fn vehicles(&self, mile: Mile) -> u32 {
        self.plans.iter().filter(|p| p.mile == mile).map(|p| p.count).sum()
    }

    pub fn total_vehicles(&self) -> u32 {
        self.plans.iter().map(|p| p.count).sum()
    }
}

pub struct FleetSizer<'a> {
    config: &'a FleetConfig,
}

impl<'a> FleetSizer<'a> {
    pub fn new(config: &'a FleetConfig) -> Self {
        Self { config }
    }

    pub fn size(&self, demand: &FleetDemand, volume: &VolumePlan) -> FleetResult<FleetSizing> {
        self.config.validate()?;

        let mut sizing = FleetSizing::default();
        for mile in Mile::ALL {
            let leg_cfg = self.config.leg(mile);
            let mut totals = [0u32; 4];

            for leg in demand.legs(mile) {
                let mut sized = volume.scale(leg.orders);
                if mile == Mile::MiddleMile {
                    sized *= self.config.restock_factor;
                }

                match self.config.last_mile_mix.filter(|_| mile == Mile::LastMile) {
                    Some(mix) => {
                        let bikes = sized * mix.bike_share(leg.distance_km);
                        let autos = (sized - bikes).max(0.0);
                        self.push_leg(&mut sizing, &mut totals, mile, leg, bikes, VehicleType::Bike);
                        self.push_leg(&mut sizing, &mut totals, mile, leg, autos, VehicleType::Auto);
                    }
                    None => {
                        let vehicle_type = leg_cfg.table.select(sized, leg.distance_km);
                        self.push_leg(&mut sizing, &mut totals, mile, leg, sized, vehicle_type);
                    }
                }
            }

            sizing.plans.extend(
                VehicleType::ALL
                    .into_iter()
                    .zip(totals)
                    .filter(|(_, count)| *count > 0)
                    .map(|(vehicle_type, count)| FleetPlan { mile, vehicle_type, count }),
            );
        }

        info!(
            first_mile = sizing.vehicles(Mile::FirstMile),
            middle_mile = sizing.vehicles(Mile::MiddleMile),
            last_mile = sizing.vehicles(Mile::LastMile),
            sizing_factor = volume.sizing_factor,
            "fleet sized"
        );
        Ok(sizing)
    }

    fn push_leg(
        &self,
        sizing: &mut FleetSizing,
        totals: &mut [u32; 4],
        mile: Mile,
        leg: &LegDemand,
        volume: f64,
        vehicle_type: VehicleType,
    ) {
        let per_vehicle = self.config.catalog.spec(vehicle_type).orders_per_trip as f64
            * self.config.leg(mile).trips_per_day as f64;
        let count = vehicles_for(volume, per_vehicle);

        totals[vehicle_type as usize] += count;
        sizing.legs.push(FleetLeg {
            mile,
            warehouse_id: leg.warehouse_id,
            volume,
            distance_km: leg.distance_km,
            vehicle_type,
            count,
        });
    }
}

fn vehicles_for(volume: f64, per_vehicle: f64) -> u32 {
    if !(volume > 0.0) {
        return 0;
    }
    (volume / per_vehicle - LOAD_EPSILON).ceil().max(1.0) as u32
}
