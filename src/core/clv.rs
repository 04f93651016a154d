use crate::domain::model::{Document, OrderView};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClvRecord {
    pub customer_id: String,
    pub total_value: f64,
    pub frequency: u64,
    pub avg_order_value: f64,
    /// Alias of `total_value`, kept for API compatibility.
    pub clv: f64,
}

/// Groups orders by customer and sums lifetime value. Orders without a
/// `customerId` are skipped entirely. Output order is first-seen order of
/// each customer id, so results are deterministic for a given snapshot.
///
/// Unlike RFM's monetary average, lifetime value reads `totalAmount` only.
pub fn compute_clv(orders: &[Document]) -> Vec<ClvRecord> {
    let mut by_customer: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<ClvRecord> = Vec::new();

    for order in orders {
        let view = OrderView::from(order);
        let Some(customer_id) = view.customer_id else {
            continue;
        };
        let value = view.total_amount.unwrap_or(0.0);

        match by_customer.get(&customer_id) {
            Some(&index) => {
                records[index].total_value += value;
                records[index].frequency += 1;
            }
            None => {
                by_customer.insert(customer_id.clone(), records.len());
                records.push(ClvRecord {
                    customer_id,
                    total_value: value,
                    frequency: 1,
                    avg_order_value: 0.0,
                    clv: 0.0,
                });
            }
        }
    }

    for record in &mut records {
        record.avg_order_value = if record.frequency > 0 {
            record.total_value / record.frequency as f64
        } else {
            0.0
        };
        record.clv = record.total_value;
    }

    records
}
