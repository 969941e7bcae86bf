use super::invoke;
use crate::{
    data::{CalculatedMetric, ComponentQuery},
    Client, Payload, Result,
};
use serde::Deserialize;
use serde_json::json;

/// Fields requested by [`CalculatedMetrics::list`].
pub const CALCULATED_METRIC_FIELDS: [&str; 13] = [
    "id",
    "name",
    "description",
    "owner",
    "modified",
    "reportSuiteID",
    "polarity",
    "precision",
    "type",
    "definition",
    "shares",
    "tags",
    "compatibility",
];

/// `CalculatedMetrics.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct CalculatedMetrics<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct Saved {
    #[serde(rename = "calculatedMetricID")]
    calculated_metric_id: String,
}

impl<'a> CalculatedMetrics<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists calculated metrics matching the query.
    pub async fn get(&self, query: &ComponentQuery) -> Result<Vec<CalculatedMetric>> {
        invoke(self.client, "CalculatedMetrics.Get", Some(Payload::object(query))).await
    }

    /// Lists calculated metrics with every field of [`CALCULATED_METRIC_FIELDS`].
    pub async fn list(&self) -> Result<Vec<CalculatedMetric>> {
        self.get(&ComponentQuery::with_fields(CALCULATED_METRIC_FIELDS))
            .await
    }

    /// Creates or updates a calculated metric and returns its id.
    pub async fn save(&self, metric: &CalculatedMetric) -> Result<String> {
        let saved: Saved = invoke(
            self.client,
            "CalculatedMetrics.Save",
            Some(Payload::object(metric)),
        )
        .await?;
        Ok(saved.calculated_metric_id)
    }

    /// Deletes a calculated metric.
    pub async fn delete(&self, calculated_metric_id: &str) -> Result<bool> {
        let payload = json!({ "calculatedMetricID": calculated_metric_id });
        invoke(self.client, "CalculatedMetrics.Delete", Some(payload.into())).await
    }
}
