//! Parquet result backend (feature `parquet`).
//!
//! Creates four files in the configured output directory:
//! - `warehouses.parquet`
//! - `territory_orders.parquet`
//! - `fleet.parquet`
//! - `costs.parquet` (`item`, nullable `value`)

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::ResultWriter;
use crate::{AssignmentRow, CostRow, FleetRow, IoResult, WarehouseRow};

fn warehouse_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("warehouse_id",            DataType::UInt32,  false),
        Field::new("code",                    DataType::Utf8,    false),
        Field::new("kind",                    DataType::Utf8,    false),
        Field::new("lat",                     DataType::Float64, false),
        Field::new("lon",                     DataType::Float64, false),
        Field::new("capacity_orders_per_day", DataType::UInt32,  false),
        Field::new("coverage_radius_km",      DataType::Float64, false),
        Field::new("parent_id",               DataType::UInt32,  true),
        Field::new("distance_to_parent_km",   DataType::Float64, false),
        Field::new("boundary_code",           DataType::Utf8,    true),
        Field::new("served_orders",           DataType::UInt32,  false),
        Field::new("handled_orders_per_day",  DataType::Float64, false),
        Field::new("headcount",               DataType::UInt32,  false),
        Field::new("monthly_rent",            DataType::Float64, false),
        Field::new("monthly_labor",           DataType::Float64, false),
    ]))
}

fn assignment_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("order_id",     DataType::UInt32, false),
        Field::new("warehouse_id", DataType::UInt32, false),
    ]))
}

fn fleet_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("mile",         DataType::Utf8,    false),
        Field::new("warehouse_id", DataType::UInt32,  false),
        Field::new("volume",       DataType::Float64, false),
        Field::new("distance_km",  DataType::Float64, false),
        Field::new("vehicle_type", DataType::Utf8,    false),
        Field::new("vehicles",     DataType::UInt32,  false),
    ]))
}

fn cost_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("item",  DataType::Utf8,    false),
        Field::new("value", DataType::Float64, true),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

fn open(dir: &Path, name: &str, schema: &Arc<Schema>) -> IoResult<Option<ArrowWriter<File>>> {
    let file = File::create(dir.join(name))?;
    Ok(Some(ArrowWriter::try_new(file, Arc::clone(schema), Some(snappy_props()))?))
}

/// Writes a design result to four Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footers; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetResultWriter {
    warehouses:  Option<ArrowWriter<File>>,
    assignments: Option<ArrowWriter<File>>,
    fleet:       Option<ArrowWriter<File>>,
    costs:       Option<ArrowWriter<File>>,
    wh_schema:   Arc<Schema>,
    as_schema:   Arc<Schema>,
    fl_schema:   Arc<Schema>,
    co_schema:   Arc<Schema>,
}

impl ParquetResultWriter {
    /// Create the four Parquet files in `dir`.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let wh_schema = warehouse_schema();
        let as_schema = assignment_schema();
        let fl_schema = fleet_schema();
        let co_schema = cost_schema();

        Ok(Self {
            warehouses:  open(dir, "warehouses.parquet", &wh_schema)?,
            assignments: open(dir, "territory_orders.parquet", &as_schema)?,
            fleet:       open(dir, "fleet.parquet", &fl_schema)?,
            costs:       open(dir, "costs.parquet", &co_schema)?,
            wh_schema,
            as_schema,
            fl_schema,
            co_schema,
        })
    }
}

impl ResultWriter for ParquetResultWriter {
    fn write_warehouses(&mut self, rows: &[WarehouseRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.warehouses.as_mut() else {
            return Ok(());
        };

        let mut ids        = UInt32Builder::new();
        let mut codes      = StringBuilder::new();
        let mut kinds      = StringBuilder::new();
        let mut lats       = Float64Builder::new();
        let mut lons       = Float64Builder::new();
        let mut capacities = UInt32Builder::new();
        let mut radii      = Float64Builder::new();
        let mut parents    = UInt32Builder::new();
        let mut parent_km  = Float64Builder::new();
        let mut units      = StringBuilder::new();
        let mut served     = UInt32Builder::new();
        let mut handled    = Float64Builder::new();
        let mut headcount  = UInt32Builder::new();
        let mut rent       = Float64Builder::new();
        let mut labor      = Float64Builder::new();

        for row in rows {
            ids.append_value(row.warehouse_id);
            codes.append_value(&row.code);
            kinds.append_value(row.kind);
            lats.append_value(row.lat);
            lons.append_value(row.lon);
            capacities.append_value(row.capacity);
            radii.append_value(row.radius_km);
            parents.append_option(row.parent_id);
            parent_km.append_value(row.parent_km);
            units.append_option(row.boundary_code.as_deref());
            served.append_value(row.served_orders);
            handled.append_value(row.handled_per_day);
            headcount.append_value(row.headcount);
            rent.append_value(row.monthly_rent);
            labor.append_value(row.monthly_labor);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.wh_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(codes.finish()),
                Arc::new(kinds.finish()),
                Arc::new(lats.finish()),
                Arc::new(lons.finish()),
                Arc::new(capacities.finish()),
                Arc::new(radii.finish()),
                Arc::new(parents.finish()),
                Arc::new(parent_km.finish()),
                Arc::new(units.finish()),
                Arc::new(served.finish()),
                Arc::new(handled.finish()),
                Arc::new(headcount.finish()),
                Arc::new(rent.finish()),
                Arc::new(labor.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.assignments.as_mut() else {
            return Ok(());
        };

        let mut orders     = UInt32Builder::new();
        let mut warehouses = UInt32Builder::new();
        for row in rows {
            orders.append_value(row.order_id);
            warehouses.append_value(row.warehouse_id);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.as_schema),
            vec![Arc::new(orders.finish()), Arc::new(warehouses.finish())],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_fleet(&mut self, rows: &[FleetRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.fleet.as_mut() else {
            return Ok(());
        };

        let mut miles      = StringBuilder::new();
        let mut warehouses = UInt32Builder::new();
        let mut volumes    = Float64Builder::new();
        let mut distances  = Float64Builder::new();
        let mut types      = StringBuilder::new();
        let mut vehicles   = UInt32Builder::new();

        for row in rows {
            miles.append_value(row.mile);
            warehouses.append_value(row.warehouse_id);
            volumes.append_value(row.volume);
            distances.append_value(row.distance_km);
            types.append_value(row.vehicle_type);
            vehicles.append_value(row.vehicles);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.fl_schema),
            vec![
                Arc::new(miles.finish()),
                Arc::new(warehouses.finish()),
                Arc::new(volumes.finish()),
                Arc::new(distances.finish()),
                Arc::new(types.finish()),
                Arc::new(vehicles.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_costs(&mut self, rows: &[CostRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.costs.as_mut() else {
            return Ok(());
        };

        let mut items  = StringBuilder::new();
        let mut values = Float64Builder::new();
        for row in rows {
            items.append_value(row.item);
            values.append_option(row.value);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.co_schema),
            vec![Arc::new(items.finish()), Arc::new(values.finish())],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        for slot in [&mut self.warehouses, &mut self.assignments, &mut self.fleet, &mut self.costs] {
            if let Some(w) = slot.take() {
                w.close()?;
            }
        }
        Ok(())
    }
}
