//! `wn-core` — foundational types for the warehouse network designer.
//!
//! This crate is a dependency of every other `wn-*` crate.  It intentionally
//! has no `wn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `OrderId`, `WarehouseId`                                  |
//! | [`geo`]       | `GeoPoint`, `BoundingBox`, `LocalProjection`, `nearest_site` |
//! | [`order`]     | `OrderRecord`                                             |
//! | [`warehouse`] | `Warehouse`, `WarehouseKind`, `AuxiliarySize`             |
//! | [`config`]    | `NetworkConfig`, `DeliveryRadius`, `CapacityMode`, …      |
//! | [`synth`]     | `OrderSynth` (seeded synthetic order generator)           |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod order;
pub mod synth;
pub mod warehouse;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    CapacityMode, ClusteringConfig, DeliveryRadius, MainHubConfig, MainHubSite, NetworkConfig,
    PlacementConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint, LocalProjection, nearest_site};
pub use ids::{OrderId, WarehouseId};
pub use order::OrderRecord;
pub use synth::OrderSynth;
pub use warehouse::{AuxiliarySize, Warehouse, WarehouseKind};
