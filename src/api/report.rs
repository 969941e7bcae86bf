use super::invoke;
use crate::{
    data::{
        CompatibilityQuery, ReportDescription, ReportElement, ReportMetric, ReportQueueItem,
        ReportResponse,
    },
    mapping::JsonObject,
    Client, Payload, Result,
};
use serde::Deserialize;
use serde_json::json;

/// `Report.*` methods.
///
/// Reports are usually queued, then polled with [`get`](Self::get) until it
/// stops failing with [`Error::ReportNotReady`](crate::Error::ReportNotReady).
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct Queued {
    #[serde(rename = "reportID")]
    report_id: i64,
}

#[derive(Deserialize)]
struct Ran {
    #[serde(rename = "reportResponse")]
    report_response: ReportResponse,
}

fn description_payload(description: &ReportDescription) -> Payload {
    Payload::from(json!({ "reportDescription": description.data() }))
}

impl<'a> Report<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Queues a report and returns its id.
    pub async fn queue(&self, description: &ReportDescription) -> Result<i64> {
        let queued: Queued =
            invoke(self.client, "Report.Queue", Some(description_payload(description))).await?;
        Ok(queued.report_id)
    }

    /// Fetches a queued report.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ReportNotReady`](crate::Error::ReportNotReady)
    /// while the report is still running and with
    /// [`Error::InvalidReportId`](crate::Error::InvalidReportId) for unknown ids.
    pub async fn get(&self, report_id: i64) -> Result<ReportResponse> {
        let payload = json!({ "reportID": report_id });
        invoke(self.client, "Report.Get", Some(payload.into())).await
    }

    /// Cancels a queued report.
    pub async fn cancel(&self, report_id: i64) -> Result<bool> {
        let payload = json!({ "reportID": report_id });
        invoke(self.client, "Report.Cancel", Some(payload.into())).await
    }

    /// Lists queued reports.
    pub async fn get_queue(&self) -> Result<Vec<ReportQueueItem>> {
        invoke(self.client, "Report.GetQueue", None).await
    }

    /// Runs a small report synchronously.
    pub async fn run(&self, description: &ReportDescription) -> Result<ReportResponse> {
        let ran: Ran =
            invoke(self.client, "Report.Run", Some(description_payload(description))).await?;
        Ok(ran.report_response)
    }

    /// Lists metrics compatible with the query.
    pub async fn get_metrics(&self, query: &CompatibilityQuery) -> Result<Vec<ReportMetric>> {
        invoke(self.client, "Report.GetMetrics", Some(Payload::object(query))).await
    }

    /// Lists elements compatible with the query.
    pub async fn get_elements(&self, query: &CompatibilityQuery) -> Result<Vec<ReportElement>> {
        invoke(self.client, "Report.GetElements", Some(Payload::object(query))).await
    }

    /// Checks a description without queueing it.
    pub async fn validate(&self, description: &ReportDescription) -> Result<bool> {
        invoke(self.client, "Report.Validate", Some(description_payload(description))).await
    }
}
