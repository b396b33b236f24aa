//! Repository for health metrics

use async_trait::async_trait;

use super::{first_row, MetricRepo, METRICS_TABLE};
use crate::connection::SupabaseClient;
use crate::entities::{HealthMetric, NewHealthMetric};
use crate::types::StoreResult;

#[derive(Clone)]
pub struct MetricRepository {
    client: SupabaseClient,
}

impl MetricRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricRepo for MetricRepository {
    async fn list_recent(&self, user_id: &str, limit: usize) -> StoreResult<Vec<HealthMetric>> {
        self.client
            .from(METRICS_TABLE)
            .select("*")
            .eq("usuario_id", user_id)
            .order("data_registro", false)
            .limit(limit)
            .fetch()
            .await
    }

    async fn create(&self, metric: &NewHealthMetric) -> StoreResult<HealthMetric> {
        let rows = self.client.from(METRICS_TABLE).insert(metric).await?;
        first_row(rows, METRICS_TABLE)
    }
}
