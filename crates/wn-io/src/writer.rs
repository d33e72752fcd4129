//! The `ResultWriter` trait implemented by all backend writers.

use wn_pipeline::NetworkDesignResult;

use crate::{AssignmentRow, CostRow, FleetRow, IoResult, ResultRows, WarehouseRow};

/// Trait implemented by the CSV, SQLite, and Parquet writers.
pub trait ResultWriter {
    fn write_warehouses(&mut self, rows: &[WarehouseRow]) -> IoResult<()>;

    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> IoResult<()>;

    fn write_fleet(&mut self, rows: &[FleetRow]) -> IoResult<()>;

    fn write_costs(&mut self, rows: &[CostRow]) -> IoResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> IoResult<()>;

    /// Write every table of `result`.  Does not call [`finish`](Self::finish).
    fn write_result(&mut self, result: &NetworkDesignResult) -> IoResult<()> {
        let rows = ResultRows::from(result);
        self.write_warehouses(&rows.warehouses)?;
        self.write_assignments(&rows.assignments)?;
        self.write_fleet(&rows.fleet)?;
        self.write_costs(&rows.costs)
    }
}
