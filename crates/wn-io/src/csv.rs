//! CSV result backend.
//!
//! Creates four files in the configured output directory:
//! - `warehouses.csv`
//! - `territory_orders.csv`
//! - `fleet.csv`
//! - `costs.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ResultWriter;
use crate::{AssignmentRow, CostRow, FleetRow, IoResult, WarehouseRow};

pub const WAREHOUSE_HEADER: [&str; 15] = [
    "warehouse_id",
    "code",
    "kind",
    "lat",
    "lon",
    "capacity_orders_per_day",
    "coverage_radius_km",
    "parent_id",
    "distance_to_parent_km",
    "boundary_code",
    "served_orders",
    "handled_orders_per_day",
    "headcount",
    "monthly_rent",
    "monthly_labor",
];

/// Writes a design result to four CSV files.
pub struct CsvResultWriter {
    warehouses:  Writer<File>,
    assignments: Writer<File>,
    fleet:       Writer<File>,
    costs:       Writer<File>,
    finished:    bool,
}

impl CsvResultWriter {
    /// Create the four CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let mut warehouses = Writer::from_path(dir.join("warehouses.csv"))?;
        warehouses.write_record(WAREHOUSE_HEADER)?;

        let mut assignments = Writer::from_path(dir.join("territory_orders.csv"))?;
        assignments.write_record(["order_id", "warehouse_id"])?;

        let mut fleet = Writer::from_path(dir.join("fleet.csv"))?;
        fleet.write_record(["mile", "warehouse_id", "volume", "distance_km", "vehicle_type", "vehicles"])?;

        let mut costs = Writer::from_path(dir.join("costs.csv"))?;
        costs.write_record(["item", "value"])?;

        Ok(Self { warehouses, assignments, fleet, costs, finished: false })
    }
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl ResultWriter for CsvResultWriter {
    fn write_warehouses(&mut self, rows: &[WarehouseRow]) -> IoResult<()> {
        for row in rows {
            self.warehouses.write_record(&[
                row.warehouse_id.to_string(),
                row.code.clone(),
                row.kind.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.capacity.to_string(),
                row.radius_km.to_string(),
                opt(row.parent_id),
                row.parent_km.to_string(),
                row.boundary_code.clone().unwrap_or_default(),
                row.served_orders.to_string(),
                row.handled_per_day.to_string(),
                row.headcount.to_string(),
                row.monthly_rent.to_string(),
                row.monthly_labor.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> IoResult<()> {
        for row in rows {
            self.assignments.write_record(&[row.order_id.to_string(), row.warehouse_id.to_string()])?;
        }
        Ok(())
    }

    fn write_fleet(&mut self, rows: &[FleetRow]) -> IoResult<()> {
        for row in rows {
            self.fleet.write_record(&[
                row.mile.to_string(),
                row.warehouse_id.to_string(),
                row.volume.to_string(),
                row.distance_km.to_string(),
                row.vehicle_type.to_string(),
                row.vehicles.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_costs(&mut self, rows: &[CostRow]) -> IoResult<()> {
        for row in rows {
            self.costs.write_record(&[row.item.to_string(), opt(row.value)])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.warehouses.flush()?;
        self.assignments.flush()?;
        self.fleet.flush()?;
        self.costs.flush()?;
        Ok(())
    }
}
