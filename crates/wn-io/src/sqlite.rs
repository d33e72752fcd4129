//! SQLite result backend (feature `sqlite`).
//!
//! Creates a single `network.db` file in the configured output directory with
//! four tables: `warehouses`, `territory_orders`, `fleet`, and `costs`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::ResultWriter;
use crate::{AssignmentRow, CostRow, FleetRow, IoResult, WarehouseRow};

/// Writes a design result to an SQLite database.
pub struct SqliteResultWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteResultWriter {
    /// Open (or create) `network.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let conn = Connection::open(dir.join("network.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS warehouses (
                 warehouse_id           INTEGER PRIMARY KEY,
                 code                   TEXT    NOT NULL,
                 kind                   TEXT    NOT NULL,
                 lat                    REAL    NOT NULL,
                 lon                    REAL    NOT NULL,
                 capacity_orders_per_day INTEGER NOT NULL,
                 coverage_radius_km     REAL    NOT NULL,
                 parent_id              INTEGER,
                 distance_to_parent_km  REAL    NOT NULL,
                 boundary_code          TEXT,
                 served_orders          INTEGER NOT NULL,
                 handled_orders_per_day REAL    NOT NULL,
                 headcount              INTEGER NOT NULL,
                 monthly_rent           REAL    NOT NULL,
                 monthly_labor          REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS territory_orders (
                 order_id     INTEGER PRIMARY KEY,
                 warehouse_id INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS fleet (
                 mile         TEXT    NOT NULL,
                 warehouse_id INTEGER NOT NULL,
                 volume       REAL    NOT NULL,
                 distance_km  REAL    NOT NULL,
                 vehicle_type TEXT    NOT NULL,
                 vehicles     INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS costs (
                 item  TEXT PRIMARY KEY,
                 value REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl ResultWriter for SqliteResultWriter {
    fn write_warehouses(&mut self, rows: &[WarehouseRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO warehouses VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.warehouse_id,
                    row.code,
                    row.kind,
                    row.lat,
                    row.lon,
                    row.capacity,
                    row.radius_km,
                    row.parent_id,
                    row.parent_km,
                    row.boundary_code,
                    row.served_orders,
                    row.handled_per_day,
                    row.headcount,
                    row.monthly_rent,
                    row.monthly_labor,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_assignments(&mut self, rows: &[AssignmentRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO territory_orders (order_id, warehouse_id) VALUES (?1, ?2)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.order_id, row.warehouse_id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_fleet(&mut self, rows: &[FleetRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO fleet (mile, warehouse_id, volume, distance_km, vehicle_type, vehicles) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.mile,
                    row.warehouse_id,
                    row.volume,
                    row.distance_km,
                    row.vehicle_type,
                    row.vehicles,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_costs(&mut self, rows: &[CostRow]) -> IoResult<()> {
        for row in rows {
            self.conn.execute(
                "INSERT OR REPLACE INTO costs (item, value) VALUES (?1, ?2)",
                rusqlite::params![row.item, row.value],
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
