//! `wn-io` — inputs and outputs around a network design run.
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`orders`]  | order CSV ingestion with per-row rejection reports          |
//! | [`profile`] | orders per calendar day, busiest and median day             |
//! | [`geojson`] | administrative boundary units from a `FeatureCollection`    |
//! | [`row`]     | flat result rows shared by all writers                      |
//! | [`writer`]  | `ResultWriter` trait                                        |
//! | [`observer`]| `ResultWriterObserver` (writes on run completion)           |
//!
//! Result backends are selected by Cargo feature:
//!
//! | Feature   | Backend | Files created                                                  |
//! |-----------|---------|----------------------------------------------------------------|
//! | *(none)*  | CSV     | `warehouses.csv`, `territory_orders.csv`, `fleet.csv`, `costs.csv` |
//! | `sqlite`  | SQLite  | `network.db`                                                   |
//! | `parquet` | Parquet | `warehouses.parquet`, `territory_orders.parquet`, `fleet.parquet`, `costs.parquet` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use wn_io::{CsvResultWriter, ResultWriterObserver, load_orders_csv};
//!
//! let load = load_orders_csv(Path::new("orders.csv"), &config.region)?;
//! let mut obs = ResultWriterObserver::new(CsvResultWriter::new(Path::new("./out"))?);
//! let result = designer.design(&load.orders, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod observer;
pub mod orders;
pub mod profile;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvResultWriter;
pub use error::{IoError, IoResult};
pub use geojson::{load_boundaries, parse_boundaries};
pub use observer::ResultWriterObserver;
pub use orders::{OrderLoad, RejectedRow, load_orders_csv, load_orders_reader, parse_timestamp};
pub use profile::{DailyProfile, DayCount, orders_on_day};
pub use row::{AssignmentRow, CostRow, FleetRow, ResultRows, WarehouseRow};
pub use writer::ResultWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteResultWriter;

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetResultWriter;
