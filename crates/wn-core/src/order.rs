//! Order records — the immutable input of every design run.

use crate::{BoundingBox, CoreError, CoreResult, GeoPoint, OrderId};

/// One geocoded delivery order.
///
/// Records are read-only once ingested.  The ingestion layer guarantees both
/// points lie inside the operating region; [`validate`](Self::validate)
/// exists so the pipeline can report a contract violation as a single
/// [`CoreError::InvalidInput`] instead of clustering bad geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRecord {
    pub id: OrderId,
    /// Unix timestamp (seconds) of order creation.
    pub timestamp: i64,
    pub pickup_point: GeoPoint,
    pub delivery_point: GeoPoint,
    pub customer: Option<String>,
}

impl OrderRecord {
    pub fn new(id: OrderId, timestamp: i64, pickup_point: GeoPoint, delivery_point: GeoPoint) -> Self {
        Self { id, timestamp, pickup_point, delivery_point, customer: None }
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Check both points against the operating region.
    pub fn validate(&self, region: &BoundingBox) -> CoreResult<()> {
        if !region.contains(self.pickup_point) {
            return Err(CoreError::InvalidInput(format!(
                "order {}: pickup point {} outside operating region",
                self.id, self.pickup_point
            )));
        }
        if !region.contains(self.delivery_point) {
            return Err(CoreError::InvalidInput(format!(
                "order {}: delivery point {} outside operating region",
                self.id, self.delivery_point
            )));
        }
        Ok(())
    }

    /// Calendar day index (days since the Unix epoch, UTC).
    #[inline]
    pub fn day(&self) -> i64 {
        self.timestamp.div_euclid(86_400)
    }
}
