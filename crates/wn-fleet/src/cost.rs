//! Monthly cost model.
//!
//! ```text
//! rent      = Σ main rent + Σ auxiliary rent by size tier
//! labor     = Σ (base headcount + ceil(handled / orders_per_worker)) × wage
//! transport = Σ count × vehicle daily cost × operating days   (per mile)
//! ```
//!
//! `handled` is a warehouse's sized daily volume.  `cost_per_order` divides
//! the total by the planned monthly orders and is `None` when that is zero.

use tracing::info;

use wn_core::{Warehouse, WarehouseId, WarehouseKind};

use crate::{CostConfig, FleetError, FleetResult, FleetSizing, Mile, VehicleCatalog, VolumePlan};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarehouseCostLine {
    pub warehouse_id: WarehouseId,
    pub code: String,
    pub kind: WarehouseKind,
    pub handled_orders_per_day: f64,
    pub headcount: u32,
    pub rent: f64,
    pub labor: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostBreakdown {
    pub rent: f64,
    pub labor: f64,
    pub transport_first: f64,
    pub transport_middle: f64,
    pub transport_last: f64,
    pub total: f64,
    pub monthly_orders: f64,
    /// `None` when no volume is planned.
    pub cost_per_order: Option<f64>,
    pub lines: Vec<WarehouseCostLine>,
}

impl CostBreakdown {
    pub fn transport(&self) -> f64 {
        self.transport_first + self.transport_middle + self.transport_last
    }
}

pub struct CostEstimator<'a> {
    config: &'a CostConfig,
    catalog: &'a VehicleCatalog,
}

impl<'a> CostEstimator<'a> {
    pub fn new(config: &'a CostConfig, catalog: &'a VehicleCatalog) -> Self {
        Self { config, catalog }
    }

    /// `handled[i]` is the sized daily volume of `warehouses[i]`.
    pub fn estimate(
        &self,
        warehouses: &[Warehouse],
        handled: &[f64],
        fleet: &FleetSizing,
        volume: &VolumePlan,
    ) -> FleetResult<CostBreakdown> {
        self.config.validate()?;
        if handled.len() != warehouses.len() {
            return Err(FleetError::InvalidInput(format!(
                "{} handled volumes for {} warehouses",
                handled.len(),
                warehouses.len()
            )));
        }
        if let Some(v) = handled.iter().find(|v| !(**v >= 0.0)) {
            return Err(FleetError::InvalidInput(format!("handled volume {v} is not a non-negative number")));
        }

        let lines: Vec<WarehouseCostLine> = warehouses
            .iter()
            .zip(handled)
            .map(|(w, &h)| self.line(w, h))
            .collect();

        let days = self.config.operating_days as f64;
        let transport = |mile: Mile| -> f64 {
            fleet
                .plans
                .iter()
                .filter(|p| p.mile == mile)
                .map(|p| p.count as f64 * self.catalog.spec(p.vehicle_type).daily_cost * days)
                .sum()
        };

        let rent: f64 = lines.iter().map(|l| l.rent).sum();
        let labor: f64 = lines.iter().map(|l| l.labor).sum();
        let transport_first = transport(Mile::FirstMile);
        let transport_middle = transport(Mile::MiddleMile);
        let transport_last = transport(Mile::LastMile);
        let total = rent + labor + transport_first + transport_middle + transport_last;

        let monthly_orders = volume.daily_orders * days;
        let cost_per_order = (monthly_orders > 0.0).then(|| total / monthly_orders);

        info!(total, rent, labor, monthly_orders, "cost estimate complete");
        Ok(CostBreakdown {
            rent,
            labor,
            transport_first,
            transport_middle,
            transport_last,
            total,
            monthly_orders,
            cost_per_order,
            lines,
        })
    }

    fn line(&self, w: &Warehouse, handled: f64) -> WarehouseCostLine {
        let (rent, base) = match w.size() {
            None => (self.config.main_monthly_rent, self.config.main_base_headcount),
            Some(size) => (self.config.auxiliary_rent.for_size(size), self.config.auxiliary_base_headcount),
        };
        let extra = (handled / self.config.orders_per_worker).ceil() as u32;
        let headcount = base + extra;
        WarehouseCostLine {
            warehouse_id: w.id,
            code: w.code.clone(),
            kind: w.kind,
            handled_orders_per_day: handled,
            headcount,
            rent,
            labor: headcount as f64 * self.config.monthly_wage,
        }
    }
}
