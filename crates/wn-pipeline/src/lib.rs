//! `wn-pipeline` — one end-to-end network design run.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`builder`]  | `NetworkDesignerBuilder` (validates every configuration)   |
//! | [`designer`] | `NetworkDesigner::design`: hubs → clusters → placement → territories → fleet → cost |
//! | [`observer`] | `DesignObserver`, `NoopObserver`, `TracingObserver`        |
//! | [`result`]   | `NetworkDesignResult`, `CoverageStats`                     |
//! | [`error`]    | `PipelineError`, `PipelineResult<T>`                       |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use wn_core::{DeliveryRadius, NetworkConfig};
//! use wn_pipeline::{NetworkDesignerBuilder, NoopObserver};
//!
//! let config = NetworkConfig::default().with_radius(DeliveryRadius::Km3);
//! let designer = NetworkDesignerBuilder::coverage_first(config).build()?;
//! let result = designer.design(&orders, &mut NoopObserver)?;
//! println!("{} auxiliaries, ₹{:.0}/month", result.auxiliary_count(), result.costs.total);
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Rayon inside DBSCAN and territory lookup; same results.  |
//! | `serde`    | `Serialize`/`Deserialize` on `NetworkDesignResult`.      |

pub mod builder;
pub mod designer;
pub mod error;
pub mod observer;
pub mod result;


pub use builder::NetworkDesignerBuilder;
pub use designer::NetworkDesigner;
pub use error::{PipelineError, PipelineResult};
pub use observer::{DesignObserver, NoopObserver, TracingObserver};
pub use result::{CoverageStats, NetworkDesignResult};
