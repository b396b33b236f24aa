//! Health metric history.

use std::sync::Arc;

use chrono::Utc;
use nutri_database::{HealthMetric, HealthMetricValues, MetricRepo, NewHealthMetric};
use tracing::info;

use super::ensure_owner;
use crate::types::UserResult;

/// Number of records returned by a history read
pub const METRICS_PAGE_SIZE: usize = 30;

#[derive(Clone)]
pub struct MetricService {
    metrics: Arc<dyn MetricRepo>,
}

impl MetricService {
    pub fn new(metrics: Arc<dyn MetricRepo>) -> Self {
        Self { metrics }
    }

    pub async fn recent(&self, caller_id: &str, user_id: &str) -> UserResult<Vec<HealthMetric>> {
        ensure_owner(caller_id, user_id)?;
        Ok(self.metrics.list_recent(user_id, METRICS_PAGE_SIZE).await?)
    }

    /// Owner and timestamp are always set here, never taken from the body
    pub async fn record(
        &self,
        caller_id: &str,
        user_id: &str,
        values: HealthMetricValues,
    ) -> UserResult<HealthMetric> {
        ensure_owner(caller_id, user_id)?;

        let metric = NewHealthMetric {
            user_id: user_id.to_string(),
            values,
            recorded_at: Utc::now().to_rfc3339(),
        };
        let created = self.metrics.create(&metric).await?;
        info!(%user_id, metric_id = %created.id, "health metric recorded");
        Ok(created)
    }
}
