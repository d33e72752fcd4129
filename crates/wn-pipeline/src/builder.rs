//! Fluent builder for constructing a [`NetworkDesigner`].

use wn_core::NetworkConfig;
use wn_design::{CoverageFirst, PlacementPolicy};
use wn_fleet::{CostConfig, FleetConfig};
use wn_spatial::BoundarySet;

use crate::{NetworkDesigner, PipelineError, PipelineResult};

/// Fluent builder for [`NetworkDesigner<P>`].
///
/// # Required inputs
///
/// - [`NetworkConfig`]: radius, capacity mode, target volume, main hubs, …
/// - `P: PlacementPolicy`: e.g. [`CoverageFirst`] or
///   [`wn_design::DistancePenalized`]
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                  |
/// |---------------------|------------------------------------------|
/// | `.boundaries(b)`    | none: territories fall back to circles   |
/// | `.fleet_config(f)`  | `FleetConfig::default()`                 |
/// | `.cost_config(c)`   | `CostConfig::default()`                  |
///
/// # Example
///
/// ```rust,ignore
/// let designer = NetworkDesignerBuilder::new(config, CoverageFirst)
///     .boundaries(load_boundaries(Path::new("pincodes.geojson"))?)
///     .build()?;
/// let result = designer.design(&orders, &mut NoopObserver)?;
/// ```
pub struct NetworkDesignerBuilder<P: PlacementPolicy> {
    config:     NetworkConfig,
    policy:     P,
    boundaries: Option<BoundarySet>,
    fleet:      Option<FleetConfig>,
    cost:       Option<CostConfig>,
}

impl NetworkDesignerBuilder<CoverageFirst> {
    /// Builder with the default coverage-first placement rule.
    pub fn coverage_first(config: NetworkConfig) -> Self {
        Self::new(config, CoverageFirst)
    }
}

impl<P: PlacementPolicy> NetworkDesignerBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: NetworkConfig, policy: P) -> Self {
        Self {
            config,
            policy,
            boundaries: None,
            fleet:      None,
            cost:       None,
        }
    }

    /// Supply administrative boundary units for territory assignment.
    ///
    /// An empty set behaves like no set at all.
    pub fn boundaries(mut self, boundaries: BoundarySet) -> Self {
        self.boundaries = Some(boundaries);
        self
    }

    pub fn fleet_config(mut self, fleet: FleetConfig) -> Self {
        self.fleet = Some(fleet);
        self
    }

    pub fn cost_config(mut self, cost: CostConfig) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Validate all inputs and construct the designer.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if any configuration is rejected by
    /// its own `validate`.
    pub fn build(self) -> PipelineResult<NetworkDesigner<P>> {
        self.config.validate()?;

        let fleet = self.fleet.unwrap_or_default();
        fleet.validate().map_err(|e| PipelineError::Config(e.to_string()))?;

        let cost = self.cost.unwrap_or_default();
        cost.validate().map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(NetworkDesigner {
            config: self.config,
            policy: self.policy,
            boundaries: self.boundaries.filter(|b| !b.is_empty()),
            fleet,
            cost,
        })
    }
}
