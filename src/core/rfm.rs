use crate::domain::model::{Document, OrderView};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Day length used for recency bucketing. Recency counts whole days,
/// truncated toward zero.
pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RfmReport {
    pub recency_avg: i64,
    pub frequency_avg: i64,
    pub monetary_avg: i64,
}

impl RfmReport {
    pub const ZERO: Self = Self {
        recency_avg: 0,
        frequency_avg: 0,
        monetary_avg: 0,
    };
}

/// Average recency, frequency and monetary value across all customers and
/// orders, as of `now`.
///
/// Customers without any matching order contribute no recency sample. The
/// monetary average reads `amount` first and falls back to `totalAmount`,
/// counting orders with neither as zero.
pub fn compute_rfm(customers: &[Document], orders: &[Document], now: DateTime<Utc>) -> RfmReport {
    if customers.is_empty() || orders.is_empty() {
        return RfmReport::ZERO;
    }

    let views: Vec<OrderView> = orders.iter().map(OrderView::from).collect();

    let samples: Vec<i64> = customers
        .iter()
        .filter_map(|customer| {
            views
                .iter()
                .filter(|order| order.customer_id.as_deref() == Some(customer.id.as_str()))
                .map(|order| order.created_at)
                .max()
                .map(|last| (now - last).num_milliseconds() / MS_PER_DAY)
        })
        .collect();

    let recency_avg = if samples.is_empty() {
        0
    } else {
        samples.iter().sum::<i64>() / samples.len() as i64
    };

    let frequency_avg = (orders.len() / customers.len()) as i64;

    let total: f64 = views
        .iter()
        .map(|order| order.amount.or(order.total_amount).unwrap_or(0.0))
        .sum();
    let monetary_avg = (total / orders.len() as f64).trunc() as i64;

    RfmReport {
        recency_avg,
        frequency_avg,
        monetary_avg,
    }
}
