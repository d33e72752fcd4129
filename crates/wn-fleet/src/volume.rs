//! Scaling from the observed order sample to the planned daily volume.

/// How sample counts translate into planned daily volumes.
///
/// ```text
/// daily_orders  = target_daily_orders or observed
/// sizing_factor = daily_orders / observed × mode multiplier
/// ```
///
/// The mode multiplier comes from
/// [`FleetConfig::mode_multiplier`](crate::FleetConfig::mode_multiplier).
/// An empty sample yields a zero plan regardless of the target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumePlan {
    pub observed_orders: usize,
    /// Planned orders per day (before the capacity-mode multiplier).
    pub daily_orders: f64,
    /// Multiplier from a sample count to a sized daily volume.
    pub sizing_factor: f64,
}

impl VolumePlan {
    pub fn new(observed_orders: usize, target: Option<u32>, mode_multiplier: f64) -> Self {
        if observed_orders == 0 {
            return Self::default();
        }
        let observed = observed_orders as f64;
        let daily_orders = target.map_or(observed, f64::from);
        Self {
            observed_orders,
            daily_orders,
            sizing_factor: daily_orders / observed * mode_multiplier,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observed_orders == 0
    }

    /// Sized daily volume for `count` sample orders.
    #[inline]
    pub fn scale(&self, count: usize) -> f64 {
        count as f64 * self.sizing_factor
    }
}
