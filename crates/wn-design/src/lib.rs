//! `wn-design` — the network design stages.
//!
//! Each stage is a pure function of its inputs and returns a fresh value for
//! the next stage; nothing is mutated across stages.
//!
//! | Module        | Stage                                                      |
//! |---------------|------------------------------------------------------------|
//! | [`hubs`]      | `MainHubAssigner`: nearest main hub, per-hub load, gaps    |
//! | [`clusters`]  | `DemandClusterer`: DBSCAN over gap orders                  |
//! | [`placement`] | `AuxiliaryPlacementEngine` + `PlacementPolicy`             |
//! | [`territory`] | `TerritoryAssigner`: boundary units or nearest-warehouse   |
//! | [`error`]     | `DesignError`, `DesignResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Rayon for DBSCAN core counts and per-order territory lookup. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on stage outputs.       |

pub mod clusters;
pub mod error;
pub mod hubs;
pub mod placement;
pub mod territory;


pub use clusters::{Cluster, ClusterParams, ClusteringOutcome, DemandClusterer};
pub use error::{DesignError, DesignResult};
pub use hubs::{HubAssignment, HubLoad, MainHubAssigner};
pub use placement::{
    AuxiliaryPlacementEngine, CoverageFirst, DistancePenalized, PlacementDecision, PlacementOutcome,
    PlacementPolicy, PlacementVerdict,
};
pub use territory::{Territory, TerritoryAssigner, TerritoryPlan, TerritoryShape};
