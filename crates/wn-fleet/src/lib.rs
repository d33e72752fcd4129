//! `wn-fleet` — fleet sizing and cost estimation for a designed network.
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`vehicle`] | `Mile`, `VehicleType`, `VehicleCatalog`, `SuitabilityTable`, `LastMileMix` |
//! | [`config`]  | `FleetConfig`, `LegConfig`, `CostConfig`, `AuxiliaryRent`    |
//! | [`volume`]  | `VolumePlan` (sample → planned daily volume)                 |
//! | [`pickup`]  | `consolidate_pickups`, `PickupPoint`, `PickupTrip`           |
//! | [`sizer`]   | `FleetSizer`, `FleetDemand`, `FleetPlan`, `FleetSizing`      |
//! | [`cost`]    | `CostEstimator`, `CostBreakdown`, `WarehouseCostLine`        |
//! | [`error`]   | `FleetError`, `FleetResult<T>`                               |
//!
//! Every figure is non-negative, and a zero-volume plan yields zero vehicles
//! and `cost_per_order = None`.

pub mod config;
pub mod cost;
pub mod error;
pub mod pickup;
pub mod sizer;
pub mod vehicle;
pub mod volume;


pub use config::{AuxiliaryRent, CostConfig, FleetConfig, LegConfig};
pub use cost::{CostBreakdown, CostEstimator, WarehouseCostLine};
pub use error::{FleetError, FleetResult};
pub use pickup::{PickupPoint, PickupTrip, consolidate_pickups};
pub use sizer::{FleetDemand, FleetLeg, FleetPlan, FleetSizer, FleetSizing, LegDemand};
pub use vehicle::{
    LastMileMix, Mile, SuitabilityTable, VehicleCatalog, VehicleMix, VehicleRule, VehicleSpec, VehicleType,
};
pub use volume::VolumePlan;
