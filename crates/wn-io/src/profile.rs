//! Calendar-day profile of an order sample.
//!
//! Capacity can be planned for the busiest day or for a typical day.  The
//! typical day is the day whose count is closest to the median daily count.

use chrono::DateTime;

use wn_core::OrderRecord;

/// Orders on one calendar day (UTC).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DayCount {
    /// Days since the Unix epoch.
    pub day: i64,
    pub orders: usize,
}

impl DayCount {
    /// `YYYY-MM-DD`, or the raw day index if out of chrono's range.
    pub fn date_label(&self) -> String {
        DateTime::from_timestamp(self.day * 86_400, 0)
            .map_or_else(|| self.day.to_string(), |dt| dt.date_naive().to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DailyProfile {
    /// One entry per day with orders, ascending by day.
    pub days: Vec<DayCount>,
}

impl DailyProfile {
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        let mut day_of: Vec<i64> = orders.iter().map(OrderRecord::day).collect();
        day_of.sort_unstable();

        let mut days: Vec<DayCount> = Vec::new();
        for d in day_of {
            match days.last_mut() {
                Some(last) if last.day == d => last.orders += 1,
                _ => days.push(DayCount { day: d, orders: 1 }),
            }
        }
        Self { days }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_orders(&self) -> usize {
        self.days.iter().map(|d| d.orders).sum()
    }

    /// Day with the most orders; the earliest on a tie.
    pub fn busiest_day(&self) -> Option<DayCount> {
        self.days.iter().copied().reduce(|best, d| if d.orders > best.orders { d } else { best })
    }

    /// Median daily count, rounded down.
    pub fn median_orders(&self) -> Option<usize> {
        let mut counts: Vec<usize> = self.days.iter().map(|d| d.orders).collect();
        if counts.is_empty() {
            return None;
        }
        counts.sort_unstable();
        let mid = counts.len() / 2;
        Some(if counts.len() % 2 == 1 { counts[mid] } else { (counts[mid - 1] + counts[mid]) / 2 })
    }

    /// Day whose count is closest to the median; the earliest on a tie.
    pub fn median_day(&self) -> Option<DayCount> {
        let median = self.median_orders()?;
        self.days.iter().copied().min_by_key(|d| d.orders.abs_diff(median))
    }

    /// Busiest-day count over median count.  `None` without orders.
    pub fn peak_to_typical_ratio(&self) -> Option<f64> {
        let peak = self.busiest_day()?.orders as f64;
        let median = self.median_orders().filter(|&m| m > 0)? as f64;
        Some(peak / median)
    }
}

/// Orders created on `day`, in input order.
pub fn orders_on_day(orders: &[OrderRecord], day: i64) -> Vec<OrderRecord> {
    orders.iter().filter(|o| o.day() == day).cloned().collect()
}
