//! `wn-spatial` — point indexing, density clustering, and boundary lookup.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`index`]    | `PointIndex` (R-tree over projected points)                |
//! | [`dbscan`]   | `Dbscan`, `DbscanLabels`                                   |
//! | [`boundary`] | `BoundaryUnit`, `BoundarySet` (R-tree + polygon tests)     |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Counts DBSCAN neighbourhoods with Rayon.                  |
//! | `serde`    | Derives `Serialize`/`Deserialize` on label types.         |

pub mod boundary;
pub mod dbscan;
pub mod error;
pub mod index;

#[cfg(test)]
mod tests;

pub use boundary::{BoundarySet, BoundaryUnit};
pub use dbscan::{Dbscan, DbscanLabels};
pub use error::{SpatialError, SpatialResult};
pub use index::PointIndex;
