//! bengaluru — designs a two-tier warehouse network for Bengaluru.
//!
//! Usage:
//!
//! ```text
//! bengaluru [orders.csv] [pincodes.geojson]
//! ```
//!
//! Without an order file a synthetic week of orders is generated: pockets
//! around the five main hubs, a thin uniform background, and three dense
//! outlying neighbourhoods.  The network is designed at 2, 3 and 5 km and
//! each result is written under `output/<radius>/`.
//!
//! Set `RUST_LOG=debug` to see every placement decision.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wn_core::{BoundingBox, DeliveryRadius, GeoPoint, NetworkConfig, OrderRecord, OrderSynth};
use wn_design::CoverageFirst;
use wn_fleet::{FleetConfig, Mile};
use wn_io::{CsvResultWriter, DailyProfile, ResultWriterObserver, load_boundaries, load_orders_csv};
use wn_pipeline::{NetworkDesignResult, NetworkDesignerBuilder};
use wn_spatial::BoundarySet;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 2024;
const SYNTH_DAYS:  u32 = 7;
const OUTPUT_DIR:  &str = "output";

/// Dense neighbourhoods beyond every hub's 3 km radius: (name, centre, orders).
const OUTLYING: [(&str, GeoPoint, usize); 3] = [
    ("Yelahanka",        GeoPoint { lat: 13.1007, lon: 77.5963 }, 160),
    ("Electronic City",  GeoPoint { lat: 12.8452, lon: 77.6602 }, 180),
    ("Kengeri",          GeoPoint { lat: 12.9141, lon: 77.4830 }, 120),
];

// ── Inputs ────────────────────────────────────────────────────────────────────

fn synthetic_orders(config: &NetworkConfig) -> Vec<OrderRecord> {
    let mut synth = OrderSynth::new(SEED).with_days(SYNTH_DAYS);
    let mut orders = Vec::new();
    for site in &config.main_hubs.sites {
        orders.extend(synth.pocket(site.location, 0.015, 250));
    }
    let inner = BoundingBox::new(12.85, 13.15, 77.45, 77.80);
    orders.extend(synth.uniform(&inner, 300));
    for (_, centre, count) in OUTLYING {
        orders.extend(synth.pocket(centre, 0.004, count));
    }
    orders
}

fn load_inputs(config: &NetworkConfig) -> Result<(Vec<OrderRecord>, Option<BoundarySet>)> {
    let mut args = std::env::args().skip(1);

    let orders = match args.next() {
        Some(path) => {
            let load = load_orders_csv(Path::new(&path), &config.region)
                .with_context(|| format!("loading orders from {path}"))?;
            if !load.rejected.is_empty() {
                println!("Rejected {} rows (first at line {})", load.rejected.len(), load.rejected[0].line);
            }
            load.orders
        }
        None => synthetic_orders(config),
    };

    let boundaries = args
        .next()
        .map(|path| load_boundaries(Path::new(&path)).with_context(|| format!("loading boundaries from {path}")))
        .transpose()?;

    Ok((orders, boundaries))
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_summary(r: &NetworkDesignResult, elapsed_ms: f64) {
    println!("── {} ({} policy, {elapsed_ms:.1} ms) ──", r.delivery_radius, r.policy);
    println!(
        "  warehouses: {} main + {} auxiliary | DBSCAN eps {:.1} km, min {} pts",
        r.main_count(),
        r.auxiliary_count(),
        r.cluster_params.eps_km,
        r.cluster_params.min_points,
    );
    for w in r.auxiliaries() {
        println!(
            "    {:<5} {}  cap {:>4}/day  {:>4} orders  {:.1} km from {}",
            w.code,
            w.centroid,
            w.capacity_orders_per_day,
            w.served_order_ids.len(),
            w.distance_to_parent_km,
            w.parent.and_then(|p| r.warehouse(p)).map_or("-", |p| p.code.as_str()),
        );
    }

    let share = r.coverage.within_radius_share.map_or(0.0, |s| s * 100.0);
    println!(
        "  coverage: {share:.1}% within radius | gaps {} | clustered {} | noise {}",
        r.coverage.gap_orders, r.coverage.clustered_orders, r.coverage.noise_orders,
    );
    println!(
        "  fleet: first {} | middle {} | last {} vehicles",
        r.fleet.vehicles(Mile::FirstMile),
        r.fleet.vehicles(Mile::MiddleMile),
        r.fleet.vehicles(Mile::LastMile),
    );
    let cpo = r.costs.cost_per_order.map_or_else(|| "n/a".to_string(), |c| format!("₹{c:.2}"));
    println!(
        "  monthly: rent ₹{:.0} + labour ₹{:.0} + transport ₹{:.0} = ₹{:.0} ({cpo}/order)",
        r.costs.rent,
        r.costs.labor,
        r.costs.transport(),
        r.costs.total,
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== bengaluru — warehouse network design ===");
    let base = NetworkConfig::default();
    let (orders, boundaries) = load_inputs(&base)?;

    // Plan for a typical day and size peaks by the observed busiest/median spread.
    let profile = DailyProfile::from_orders(&orders);
    let mut fleet = FleetConfig::default();
    if let (Some(busiest), Some(median)) = (profile.busiest_day(), profile.median_day()) {
        println!(
            "Orders: {} over {} days | busiest {} ({}) | median {} ({})",
            orders.len(),
            profile.days.len(),
            busiest.date_label(),
            busiest.orders,
            median.date_label(),
            median.orders,
        );
        if let Some(ratio) = profile.peak_to_typical_ratio().filter(|r| *r >= 1.0) {
            fleet.peak_multiplier = ratio;
        }
    }
    let target = profile.median_orders().and_then(|m| u32::try_from(m).ok());
    info!(target_daily_orders = ?target, peak_multiplier = fleet.peak_multiplier, "volume plan");

    for radius in DeliveryRadius::ALL {
        let config = base.clone().with_radius(radius).with_target_daily_orders(target);
        let mut builder = NetworkDesignerBuilder::new(config, CoverageFirst).fleet_config(fleet.clone());
        if let Some(set) = &boundaries {
            builder = builder.boundaries(set.clone());
        }
        let designer = builder.build()?;

        let dir = Path::new(OUTPUT_DIR).join(format!("{}km", radius.km()));
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        let mut obs = ResultWriterObserver::new(CsvResultWriter::new(&dir)?);

        let t0 = Instant::now();
        let result = designer.design(&orders, &mut obs)?;
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1_000.0;
        if let Some(e) = obs.take_error() {
            eprintln!("output error: {e}");
        }

        let json = BufWriter::new(File::create(dir.join("result.json"))?);
        serde_json::to_writer_pretty(json, &result)?;

        print_summary(&result, elapsed_ms);
    }

    println!();
    println!("Results written to ./{OUTPUT_DIR}/");
    Ok(())
}
