//! Order CSV ingestion.
//!
//! Expected header (order of columns is free, names are trimmed and matched
//! case-insensitively):
//!
//! ```text
//! created_date, pickup_long, pickup_lat, order_long, order_lat[, customer]
//! ```
//!
//! Rows with an unparsable date or coordinate, or with a point outside the
//! operating region, are skipped and reported.  Accepted rows are sorted by
//! creation time and numbered `OrderId(0..)` in that order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{info, warn};

use wn_core::{BoundingBox, GeoPoint, OrderId, OrderRecord};

use crate::{IoError, IoResult};

/// `strftime` layouts tried after RFC 3339, in order.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// A row that did not become an order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the source, header included.
    pub line: u64,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderLoad {
    pub orders: Vec<OrderRecord>,
    pub rejected: Vec<RejectedRow>,
}

struct Columns {
    created: usize,
    pickup_lon: usize,
    pickup_lat: usize,
    order_lon: usize,
    order_lat: usize,
    customer: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> IoResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let require = |name: &'static str| find(name).ok_or(IoError::MissingColumn(name));
        Ok(Self {
            created: require("created_date")?,
            pickup_lon: require("pickup_long")?,
            pickup_lat: require("pickup_lat")?,
            order_lon: require("order_long")?,
            order_lat: require("order_lat")?,
            customer: find("customer"),
        })
    }
}

/// Load orders from a CSV file.
pub fn load_orders_csv(path: &Path, region: &BoundingBox) -> IoResult<OrderLoad> {
    let load = load_orders_reader(File::open(path)?, region)?;
    info!(
        path = %path.display(),
        accepted = load.orders.len(),
        rejected = load.rejected.len(),
        "orders loaded"
    );
    Ok(load)
}

/// Load orders from any CSV source.
pub fn load_orders_reader<R: Read>(reader: R, region: &BoundingBox) -> IoResult<OrderLoad> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).trim(csv::Trim::All).from_reader(reader);
    let cols = Columns::locate(rdr.headers()?)?;

    let mut accepted: Vec<(i64, GeoPoint, GeoPoint, Option<String>)> = Vec::new();
    let mut rejected = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        let line = record.as_ref().ok().and_then(|r| r.position()).map_or(i as u64 + 2, |p| p.line());
        let row = record.map_err(|e| e.to_string()).and_then(|r| parse_row(&r, &cols, region));
        match row {
            Ok(parsed) => accepted.push(parsed),
            Err(reason) => {
                warn!(line, %reason, "order row rejected");
                rejected.push(RejectedRow { line, reason });
            }
        }
    }

    // Stable: rows with equal timestamps keep file order.
    accepted.sort_by_key(|(ts, ..)| *ts);
    let orders = accepted
        .into_iter()
        .enumerate()
        .map(|(i, (ts, pickup, delivery, customer))| {
            let order = OrderRecord::new(OrderId(i as u32), ts, pickup, delivery);
            match customer {
                Some(c) => order.with_customer(c),
                None => order,
            }
        })
        .collect();

    Ok(OrderLoad { orders, rejected })
}

fn parse_row(
    r: &StringRecord,
    cols: &Columns,
    region: &BoundingBox,
) -> Result<(i64, GeoPoint, GeoPoint, Option<String>), String> {
    let field = |idx: usize, name: &str| {
        r.get(idx)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("missing {name}"))
    };
    let coord = |idx: usize, name: &str| -> Result<f64, String> {
        let raw = field(idx, name)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("{name} `{raw}` is not a number"))
    };

    let raw_date = field(cols.created, "created_date")?;
    let ts = parse_timestamp(raw_date).ok_or_else(|| format!("created_date `{raw_date}` is not a date"))?;

    let pickup = GeoPoint::new(coord(cols.pickup_lat, "pickup_lat")?, coord(cols.pickup_lon, "pickup_long")?);
    let delivery = GeoPoint::new(coord(cols.order_lat, "order_lat")?, coord(cols.order_lon, "order_long")?);
    if !region.contains(pickup) {
        return Err(format!("pickup point {pickup} outside operating region"));
    }
    if !region.contains(delivery) {
        return Err(format!("delivery point {delivery} outside operating region"));
    }

    let customer = cols.customer.and_then(|c| r.get(c)).filter(|s| !s.is_empty()).map(str::to_owned);
    Ok((ts, pickup, delivery, customer))
}

/// Parse a creation timestamp into Unix seconds.  Naive values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Some(dt) = DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok()) {
        return Some(dt.and_utc().timestamp());
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}
