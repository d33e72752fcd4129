//! Unit tests for wn-io.

#[cfg(test)]
mod helpers {
    use tempfile::TempDir;

    use wn_core::{NetworkConfig, OrderRecord, OrderSynth};
    use wn_pipeline::{NetworkDesignResult, NetworkDesignerBuilder, NoopObserver};

    pub fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// 40 orders tight around each of the five hubs: no gaps at 3 km.
    pub fn orders() -> Vec<OrderRecord> {
        let cfg = NetworkConfig::default();
        let mut synth = OrderSynth::new(7);
        cfg.main_hubs.sites.iter().flat_map(|s| synth.pocket(s.location, 0.01, 40)).collect()
    }

    pub fn design(orders: &[OrderRecord]) -> NetworkDesignResult {
        NetworkDesignerBuilder::coverage_first(NetworkConfig::default())
            .build()
            .unwrap()
            .design(orders, &mut NoopObserver)
            .unwrap()
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod orders {
    use std::io::Write;

    use wn_core::{NetworkConfig, OrderId};

    use super::helpers::tmp;
    use crate::{IoError, load_orders_csv, load_orders_reader, parse_timestamp};

    const SAMPLE: &str = "\
created_date,pickup_long,pickup_lat,order_long,order_lat,customer
2024-01-02 10:00:00,77.60,12.97,77.62,12.98,acme
2024-01-01 09:00:00,77.59,12.96,77.61,12.99,
not-a-date,77.59,12.96,77.61,12.99,x
2024-01-01 11:00:00,abc,12.96,77.61,12.99,x
2024-01-01 12:00:00,77.59,12.96,80.00,12.99,x
";

    #[test]
    fn accepted_rows_sorted_and_numbered() {
        let load = load_orders_reader(SAMPLE.as_bytes(), &NetworkConfig::bengaluru_region()).unwrap();
        assert_eq!(load.orders.len(), 2);

        let first = &load.orders[0];
        assert_eq!(first.id, OrderId(0));
        assert_eq!(first.timestamp, 1_704_067_200 + 9 * 3600);
        assert_eq!(first.customer, None);
        assert_eq!(first.pickup_point.lat, 12.96);
        assert_eq!(first.delivery_point.lon, 77.61);

        assert_eq!(load.orders[1].id, OrderId(1));
        assert_eq!(load.orders[1].customer.as_deref(), Some("acme"));
    }

    #[test]
    fn bad_rows_reported_with_line_numbers() {
        let load = load_orders_reader(SAMPLE.as_bytes(), &NetworkConfig::bengaluru_region()).unwrap();
        let lines: Vec<u64> = load.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, [4, 5, 6]);
        assert!(load.rejected[0].reason.contains("created_date"));
        assert!(load.rejected[1].reason.contains("pickup_long"));
        assert!(load.rejected[2].reason.contains("delivery point"));
    }

    #[test]
    fn headers_matched_loosely() {
        let data = " Order_Lat ,order_long,PICKUP_LAT,pickup_long,created_date\n12.98,77.62,12.97,77.60,2024-01-01\n";
        let load = load_orders_reader(data.as_bytes(), &NetworkConfig::bengaluru_region()).unwrap();
        assert_eq!(load.orders.len(), 1);
        assert_eq!(load.orders[0].delivery_point.lat, 12.98);
        assert_eq!(load.orders[0].pickup_point.lon, 77.60);
    }

    #[test]
    fn missing_column_is_an_error() {
        let data = "created_date,pickup_long,pickup_lat,order_long\n";
        let err = load_orders_reader(data.as_bytes(), &NetworkConfig::bengaluru_region());
        assert!(matches!(err, Err(IoError::MissingColumn("order_lat"))));
    }

    #[test]
    fn timestamp_layouts() {
        assert_eq!(parse_timestamp("2024-01-01 00:00:00"), Some(1_704_067_200));
        assert_eq!(parse_timestamp("2024-01-01"), Some(1_704_067_200));
        assert_eq!(parse_timestamp("2024-01-01T05:30:00+05:30"), Some(1_704_067_200));
        assert_eq!(parse_timestamp("01/01/2024 10:00"), Some(1_704_067_200 + 36_000));
        assert_eq!(parse_timestamp("2024-01-01 00:00:01.500"), Some(1_704_067_201));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn loads_from_file() {
        let dir = tmp();
        let path = dir.path().join("orders.csv");
        std::fs::File::create(&path).unwrap().write_all(SAMPLE.as_bytes()).unwrap();
        let load = load_orders_csv(&path, &NetworkConfig::bengaluru_region()).unwrap();
        assert_eq!(load.orders.len(), 2);
        assert_eq!(load.rejected.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tmp();
        let err = load_orders_csv(&dir.path().join("absent.csv"), &NetworkConfig::bengaluru_region());
        assert!(matches!(err, Err(IoError::Io(_))));
    }
}

// ── Profile ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod profile {
    use wn_core::{GeoPoint, OrderId, OrderRecord};

    use crate::{DailyProfile, orders_on_day};

    const DAY: i64 = 86_400;
    const JAN_1: i64 = 19_723;

    fn at(id: u32, day: i64) -> OrderRecord {
        let p = GeoPoint::new(12.97, 77.59);
        OrderRecord::new(OrderId(id), day * DAY + 3_600, p, p)
    }

    /// Jan 1: 3 orders, Jan 2: 1, Jan 3: 2.
    fn sample() -> Vec<OrderRecord> {
        vec![
            at(0, JAN_1 + 2),
            at(1, JAN_1),
            at(2, JAN_1 + 1),
            at(3, JAN_1),
            at(4, JAN_1 + 2),
            at(5, JAN_1),
        ]
    }

    #[test]
    fn counts_per_day() {
        let p = DailyProfile::from_orders(&sample());
        let counts: Vec<(i64, usize)> = p.days.iter().map(|d| (d.day, d.orders)).collect();
        assert_eq!(counts, [(JAN_1, 3), (JAN_1 + 1, 1), (JAN_1 + 2, 2)]);
        assert_eq!(p.total_orders(), 6);
        assert_eq!(p.days[0].date_label(), "2024-01-01");
    }

    #[test]
    fn busiest_and_median() {
        let p = DailyProfile::from_orders(&sample());
        assert_eq!(p.busiest_day().unwrap().day, JAN_1);
        assert_eq!(p.median_orders(), Some(2));
        assert_eq!(p.median_day().unwrap().day, JAN_1 + 2);
        assert_eq!(p.peak_to_typical_ratio(), Some(1.5));
    }

    #[test]
    fn even_day_count_median_ties_to_earliest() {
        let orders = vec![at(0, JAN_1), at(1, JAN_1), at(2, JAN_1), at(3, JAN_1), at(4, JAN_1 + 1), at(5, JAN_1 + 1)];
        let p = DailyProfile::from_orders(&orders);
        assert_eq!(p.median_orders(), Some(3));
        assert_eq!(p.median_day().unwrap().day, JAN_1);
    }

    #[test]
    fn empty_profile() {
        let p = DailyProfile::from_orders(&[]);
        assert!(p.is_empty());
        assert_eq!(p.busiest_day(), None);
        assert_eq!(p.median_day(), None);
        assert_eq!(p.peak_to_typical_ratio(), None);
    }

    #[test]
    fn sample_for_one_day() {
        let day = orders_on_day(&sample(), JAN_1 + 2);
        let ids: Vec<u32> = day.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, [0, 4]);
    }
}

// ── GeoJSON ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson {
    use wn_core::GeoPoint;

    use super::helpers::tmp;
    use crate::{IoError, load_boundaries, parse_boundaries};

    const COLLECTION: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature",
          "properties": { "pin_code": 560001, "area_name": "Central" },
          "geometry": { "type": "Polygon",
            "coordinates": [[[77.55, 12.95], [77.65, 12.95], [77.65, 13.0], [77.55, 13.0], [77.55, 12.95]]] } },
        { "type": "Feature",
          "properties": { "code": "560064" },
          "geometry": { "type": "MultiPolygon",
            "coordinates": [[[[77.55, 13.05, 0.0], [77.65, 13.05, 0.0], [77.65, 13.15, 0.0], [77.55, 13.15, 0.0], [77.55, 13.05, 0.0]]]] } },
        { "type": "Feature",
          "properties": { "pin_code": "560099" },
          "geometry": { "type": "LineString", "coordinates": [[77.5, 12.9], [77.6, 12.9]] } },
        { "type": "Feature",
          "properties": { "area_name": "Nameless" },
          "geometry": { "type": "Polygon",
            "coordinates": [[[77.7, 12.9], [77.8, 12.9], [77.8, 13.0], [77.7, 12.9]]] } },
        { "type": "Feature",
          "properties": { "pin_code": "560001", "area_name": "Duplicate" },
          "geometry": { "type": "Polygon",
            "coordinates": [[[77.7, 12.9], [77.8, 12.9], [77.8, 13.0], [77.7, 12.9]]] } }
      ]
    }"#;

    #[test]
    fn polygons_and_multipolygons_loaded() {
        let set = parse_boundaries(COLLECTION).unwrap();
        assert_eq!(set.len(), 2);

        let central = set.get(set.position("560001").unwrap()).unwrap();
        assert_eq!(central.name.as_deref(), Some("Central"));
        assert!((central.centroid.lat - 12.975).abs() < 1e-6);

        assert_eq!(set.locate(GeoPoint::new(12.97, 77.60)), set.position("560001"));
        assert_eq!(set.locate(GeoPoint::new(13.10, 77.60)), set.position("560064"));
        assert_eq!(set.locate(GeoPoint::new(12.95, 77.75)), None);
    }

    #[test]
    fn malformed_rings_skipped() {
        let json = r#"{ "features": [
            { "properties": { "pin_code": "1" },
              "geometry": { "type": "Polygon", "coordinates": [[[77.5, 12.9], [77.6, 12.9], [77.5, 12.9]]] } },
            { "properties": { "pin_code": "2" },
              "geometry": { "type": "Polygon", "coordinates": [[[77.5], [77.6, 12.9], [77.6, 13.0], [77.5]]] } },
            { "properties": { "pin_code": "1" },
              "geometry": { "type": "Polygon",
                "coordinates": [[[77.5, 12.9], [77.6, 12.9], [77.6, 13.0], [77.5, 13.0], [77.5, 12.9]]] } }
        ] }"#;
        let set = parse_boundaries(json).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.units()[0].code, "1");
        assert!((set.units()[0].centroid.lat - 12.95).abs() < 1e-6);
    }

    #[test]
    fn not_json_rejected() {
        assert!(matches!(parse_boundaries("pincodes"), Err(IoError::Json(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tmp();
        let path = dir.path().join("bengaluru.geojson");
        std::fs::write(&path, COLLECTION).unwrap();
        assert_eq!(load_boundaries(&path).unwrap().len(), 2);
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use super::helpers::{design, orders};
    use crate::ResultRows;

    #[test]
    fn tables_mirror_the_result() {
        let result = design(&orders());
        let rows = ResultRows::from(&result);

        assert_eq!(rows.warehouses.len(), 5);
        assert!(rows.warehouses.iter().all(|w| w.kind == "main" && w.parent_id.is_none()));
        assert_eq!(rows.warehouses.iter().map(|w| w.served_orders).sum::<u32>(), 200);
        assert_eq!(rows.assignments.len(), 200);
        assert_eq!(rows.fleet.len(), result.fleet.legs.len());
        assert_eq!(rows.costs.len(), 8);
        assert_eq!(rows.costs[5].item, "total");
        assert_eq!(rows.costs[5].value, Some(result.costs.total));
    }
}

// ── CSV writer ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::csv::{CsvResultWriter, WAREHOUSE_HEADER};
    use crate::writer::ResultWriter;
    use crate::ResultWriterObserver;

    use super::helpers::{design, orders, tmp};
    use wn_core::NetworkConfig;
    use wn_pipeline::NetworkDesignerBuilder;

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvResultWriter::new(dir.path()).unwrap();
        for name in ["warehouses.csv", "territory_orders.csv", "fleet.csv", "costs.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn csv_result_written() {
        let dir = tmp();
        let result = design(&orders());
        let mut w = CsvResultWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("warehouses.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, WAREHOUSE_HEADER);

        let warehouses = records(dir.path().join("warehouses.csv"));
        assert_eq!(warehouses.len(), 5);
        assert_eq!(&warehouses[0][1], "CTR");
        assert_eq!(&warehouses[0][7], ""); // no parent

        assert_eq!(records(dir.path().join("territory_orders.csv")).len(), 200);
        assert_eq!(records(dir.path().join("fleet.csv")).len(), result.fleet.legs.len());

        let costs = records(dir.path().join("costs.csv"));
        assert_eq!(&costs[7][0], "cost_per_order");
        assert!(!costs[7][1].is_empty());
    }

    #[test]
    fn undefined_unit_cost_written_empty() {
        let dir = tmp();
        let result = design(&[]);
        let mut w = CsvResultWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let costs = records(dir.path().join("costs.csv"));
        assert_eq!(&costs[7][1], "");
        assert!(records(dir.path().join("territory_orders.csv")).is_empty());
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvResultWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn observer_writes_on_completion() {
        let dir = tmp();
        let designer = NetworkDesignerBuilder::coverage_first(NetworkConfig::default()).build().unwrap();
        let mut obs = ResultWriterObserver::new(CsvResultWriter::new(dir.path()).unwrap());
        designer.design(&orders(), &mut obs).unwrap();

        assert!(obs.take_error().is_none());
        assert_eq!(records(dir.path().join("warehouses.csv")).len(), 5);
        assert_eq!(records(dir.path().join("territory_orders.csv")).len(), 200);
    }
}

// ── SQLite writer ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use crate::sqlite::SqliteResultWriter;
    use crate::writer::ResultWriter;

    use super::helpers::{design, orders, tmp};

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteResultWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("network.db").exists());
    }

    #[test]
    fn sqlite_tables_filled() {
        let dir = tmp();
        let result = design(&orders());
        let mut w = SqliteResultWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("network.db")).unwrap();
        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
        };
        assert_eq!(count("warehouses"), 5);
        assert_eq!(count("territory_orders"), 200);
        assert_eq!(count("fleet"), result.fleet.legs.len() as i64);
        assert_eq!(count("costs"), 8);

        let parent: Option<i64> =
            conn.query_row("SELECT parent_id FROM warehouses WHERE warehouse_id = 0", [], |r| r.get(0)).unwrap();
        assert_eq!(parent, None);
    }

    #[test]
    fn sqlite_undefined_unit_cost_is_null() {
        let dir = tmp();
        let mut w = SqliteResultWriter::new(dir.path()).unwrap();
        w.write_result(&design(&[])).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("network.db")).unwrap();
        let value: Option<f64> = conn
            .query_row("SELECT value FROM costs WHERE item = 'cost_per_order'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(value, None);
    }
}

// ── Parquet writer ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetResultWriter;
    use crate::writer::ResultWriter;

    use super::helpers::{design, orders, tmp};

    fn row_count(path: std::path::PathBuf) -> usize {
        let file = std::fs::File::open(path).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file).unwrap().build().unwrap();
        reader.map(|b| b.unwrap().num_rows()).sum()
    }

    #[test]
    fn parquet_result_round_trip() {
        let dir = tmp();
        let result = design(&orders());
        let mut w = ParquetResultWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        assert_eq!(row_count(dir.path().join("warehouses.parquet")), 5);
        assert_eq!(row_count(dir.path().join("territory_orders.parquet")), 200);
        assert_eq!(row_count(dir.path().join("fleet.parquet")), result.fleet.legs.len());
        assert_eq!(row_count(dir.path().join("costs.parquet")), 8);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetResultWriter::new(dir.path()).unwrap();
            w.write_result(&design(&orders())).unwrap();
            // dropped without finish(): no footer
        }
        let file = std::fs::File::open(dir.path().join("warehouses.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
