//! Fleet and cost tunables.

use wn_core::{AuxiliarySize, CapacityMode};

use crate::{FleetError, FleetResult, LastMileMix, Mile, SuitabilityTable, VehicleCatalog, VehicleType};

/// Per-leg operating pattern.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegConfig {
    pub trips_per_day: u32,
    pub table: SuitabilityTable,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    pub catalog: VehicleCatalog,
    pub first_mile: LegConfig,
    pub middle_mile: LegConfig,
    pub last_mile: LegConfig,
    /// Middle-mile volume as a multiple of the auxiliary's delivery volume.
    pub restock_factor: f64,
    /// Volume multiplier applied in [`CapacityMode::Peak`].
    pub peak_multiplier: f64,
    /// Pickup sites of one hub within this distance of a trip's first site
    /// share a first-mile trip.  `None` runs one first-mile leg per hub.
    pub pickup_consolidation_km: Option<f64>,
    /// Bike/auto split of last-mile volume.  `None` sizes each last-mile
    /// leg with a single vehicle type from the suitability table.
    pub last_mile_mix: Option<LastMileMix>,
}

impl FleetConfig {
    pub fn leg(&self, mile: Mile) -> &LegConfig {
        match mile {
            Mile::FirstMile => &self.first_mile,
            Mile::MiddleMile => &self.middle_mile,
            Mile::LastMile => &self.last_mile,
        }
    }

    pub fn mode_multiplier(&self, mode: CapacityMode) -> f64 {
        match mode {
            CapacityMode::Peak => self.peak_multiplier,
            CapacityMode::Typical => 1.0,
        }
    }

    pub fn validate(&self) -> FleetResult<()> {
        for mile in Mile::ALL {
            if self.leg(mile).trips_per_day == 0 {
                return Err(FleetError::Config(format!("{mile}: trips_per_day must be positive")));
            }
        }
        for vehicle in VehicleType::ALL {
            let spec = self.catalog.spec(vehicle);
            if spec.orders_per_trip == 0 || !(spec.daily_cost >= 0.0) {
                return Err(FleetError::Config(format!(
                    "{vehicle}: orders_per_trip must be positive and daily_cost non-negative"
                )));
            }
        }
        if !(self.restock_factor >= 0.0) || !(self.peak_multiplier >= 1.0) {
            return Err(FleetError::Config(
                "restock_factor must be ≥ 0 and peak_multiplier ≥ 1".into(),
            ));
        }
        if let Some(r) = self.pickup_consolidation_km {
            if !(r >= 0.0) || !r.is_finite() {
                return Err(FleetError::Config(format!(
                    "pickup_consolidation_km must be finite and non-negative, got {r}"
                )));
            }
        }
        if let Some(mix) = &self.last_mile_mix {
            if !(0.0..=1.0).contains(&mix.shift) || !(0.5..=1.0).contains(&mix.max_share) {
                return Err(FleetError::Config(
                    "last-mile mix shift must be in [0, 1] and max_share in [0.5, 1]".into(),
                ));
            }
            if !(mix.bike_preferred_km <= mix.auto_preferred_km) {
                return Err(FleetError::Config(
                    "last-mile mix bike_preferred_km must not exceed auto_preferred_km".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            catalog: VehicleCatalog::default(),
            first_mile: LegConfig { trips_per_day: 4, table: SuitabilityTable::hub_default() },
            middle_mile: LegConfig { trips_per_day: 3, table: SuitabilityTable::hub_default() },
            last_mile: LegConfig { trips_per_day: 8, table: SuitabilityTable::last_mile_default() },
            restock_factor: 1.0,
            peak_multiplier: 1.3,
            pickup_consolidation_km: Some(6.0),
            last_mile_mix: None,
        }
    }
}

// ── CostConfig ────────────────────────────────────────────────────────────────

/// Monthly rent of an auxiliary by size tier.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuxiliaryRent {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

impl AuxiliaryRent {
    pub fn for_size(&self, size: AuxiliarySize) -> f64 {
        match size {
            AuxiliarySize::Small => self.small,
            AuxiliarySize::Medium => self.medium,
            AuxiliarySize::Large => self.large,
        }
    }
}

/// Monthly cost model.  All amounts in the same currency unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostConfig {
    pub main_monthly_rent: f64,
    pub auxiliary_rent: AuxiliaryRent,
    /// Fixed staff per main hub (manager plus floor staff).
    pub main_base_headcount: u32,
    pub auxiliary_base_headcount: u32,
    /// Daily orders one extra worker handles.
    pub orders_per_worker: f64,
    pub monthly_wage: f64,
    pub operating_days: u32,
}

impl CostConfig {
    pub fn validate(&self) -> FleetResult<()> {
        let amounts = [
            self.main_monthly_rent,
            self.auxiliary_rent.small,
            self.auxiliary_rent.medium,
            self.auxiliary_rent.large,
            self.monthly_wage,
        ];
        if amounts.iter().any(|a| !(*a >= 0.0)) {
            return Err(FleetError::Config("rent and wage amounts must be non-negative".into()));
        }
        if !(self.orders_per_worker > 0.0) || self.operating_days == 0 {
            return Err(FleetError::Config(
                "orders_per_worker and operating_days must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            main_monthly_rent:        35_000.0,
            auxiliary_rent:           AuxiliaryRent { small: 12_000.0, medium: 15_000.0, large: 18_000.0 },
            main_base_headcount:      3,
            auxiliary_base_headcount: 1,
            orders_per_worker:        150.0,
            monthly_wage:             9_000.0,
            operating_days:           30,
        }
    }
}
