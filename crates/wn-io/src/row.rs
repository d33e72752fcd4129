//! Flat row types written by the result backends.

use wn_core::WarehouseKind;
use wn_pipeline::NetworkDesignResult;

/// One warehouse with its monthly cost line.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseRow {
    pub warehouse_id:      u32,
    pub code:              String,
    /// `"main"` or `"auxiliary"`.
    pub kind:              &'static str,
    pub lat:               f64,
    pub lon:               f64,
    pub capacity:          u32,
    pub radius_km:         f64,
    pub parent_id:         Option<u32>,
    pub parent_km:         f64,
    pub boundary_code:     Option<String>,
    pub served_orders:     u32,
    pub handled_per_day:   f64,
    pub headcount:         u32,
    pub monthly_rent:      f64,
    pub monthly_labor:     f64,
}

/// Territory membership of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentRow {
    pub order_id:     u32,
    pub warehouse_id: u32,
}

/// One sized transport leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetRow {
    pub mile:         &'static str,
    pub warehouse_id: u32,
    pub volume:       f64,
    pub distance_km:  f64,
    pub vehicle_type: &'static str,
    pub vehicles:     u32,
}

/// One named monthly figure.  `value` is `None` for an undefined ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRow {
    pub item:  &'static str,
    pub value: Option<f64>,
}

/// All tables of one design run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRows {
    pub warehouses:  Vec<WarehouseRow>,
    pub assignments: Vec<AssignmentRow>,
    pub fleet:       Vec<FleetRow>,
    pub costs:       Vec<CostRow>,
}

impl From<&NetworkDesignResult> for ResultRows {
    fn from(r: &NetworkDesignResult) -> Self {
        let warehouses = r
            .warehouses
            .iter()
            .zip(&r.costs.lines)
            .map(|(w, line)| WarehouseRow {
                warehouse_id:    w.id.0,
                code:            w.code.clone(),
                kind:            match w.kind {
                    WarehouseKind::Main => "main",
                    WarehouseKind::Auxiliary => "auxiliary",
                },
                lat:             w.centroid.lat,
                lon:             w.centroid.lon,
                capacity:        w.capacity_orders_per_day,
                radius_km:       w.coverage_radius_km,
                parent_id:       w.parent.map(|p| p.0),
                parent_km:       w.distance_to_parent_km,
                boundary_code:   w.boundary_code.clone(),
                served_orders:   w.served_order_ids.len() as u32,
                handled_per_day: line.handled_orders_per_day,
                headcount:       line.headcount,
                monthly_rent:    line.rent,
                monthly_labor:   line.labor,
            })
            .collect();

        let assignments = r
            .order_assignments()
            .into_iter()
            .map(|(o, w)| AssignmentRow { order_id: o.0, warehouse_id: w.0 })
            .collect();

        let fleet = r
            .fleet
            .legs
            .iter()
            .map(|l| FleetRow {
                mile:         l.mile.as_str(),
                warehouse_id: l.warehouse_id.0,
                volume:       l.volume,
                distance_km:  l.distance_km,
                vehicle_type: l.vehicle_type.as_str(),
                vehicles:     l.count,
            })
            .collect();

        let c = &r.costs;
        let costs = vec![
            CostRow { item: "rent",             value: Some(c.rent) },
            CostRow { item: "labor",            value: Some(c.labor) },
            CostRow { item: "transport_first",  value: Some(c.transport_first) },
            CostRow { item: "transport_middle", value: Some(c.transport_middle) },
            CostRow { item: "transport_last",   value: Some(c.transport_last) },
            CostRow { item: "total",            value: Some(c.total) },
            CostRow { item: "monthly_orders",   value: Some(c.monthly_orders) },
            CostRow { item: "cost_per_order",   value: c.cost_per_order },
        ];

        Self { warehouses, assignments, fleet, costs }
    }
}
