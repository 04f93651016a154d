use crate::core::clv::{compute_clv, ClvRecord};
use crate::core::nps::{compute_nps, NpsReport};
use crate::core::rfm::{compute_rfm, RfmReport};
use crate::domain::model::collections;
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use chrono::Utc;
use std::sync::Arc;

/// Computes the analytics reports from fresh collection snapshots. Each call
/// re-reads the store; there is no cache and no state between invocations.
pub struct MetricsEngine {
    store: Arc<dyn DocumentStore>,
}

impl MetricsEngine {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn rfm(&self) -> Result<RfmReport> {
        let customers = self.store.fetch_all(collections::CUSTOMERS).await?;
        let orders = self.store.fetch_all(collections::ORDERS).await?;
        tracing::debug!(
            customers = customers.len(),
            orders = orders.len(),
            "computing RFM"
        );
        Ok(compute_rfm(&customers, &orders, Utc::now()))
    }

    pub async fn clv(&self) -> Result<Vec<ClvRecord>> {
        let orders = self.store.fetch_all(collections::ORDERS).await?;
        let customers = self.store.fetch_all(collections::CUSTOMERS).await?;
        if orders.is_empty() || customers.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(orders = orders.len(), "computing CLV");
        Ok(compute_clv(&orders))
    }

    pub async fn nps(&self) -> Result<NpsReport> {
        let feedback = self.store.fetch_all(collections::FEEDBACK).await?;
        tracing::debug!(feedback = feedback.len(), "computing NPS");
        Ok(compute_nps(&feedback))
    }
}
