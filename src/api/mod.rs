//! Typed wrappers around the remote methods, grouped as the API groups them.
//!
//! Each handle borrows the [`Client`](crate::Client) and is obtained from it,
//! for example `client.report().queue(&description)`.

mod bookmark;
mod calculated_metrics;
mod company;
mod report;
mod segments;

pub use bookmark::Bookmark;
pub use calculated_metrics::{CalculatedMetrics, CALCULATED_METRIC_FIELDS};
pub use company::{Company, DEFAULT_REPORT_SUITE_TYPES};
pub use report::Report;
pub use segments::{Segments, SEGMENT_FIELDS};

use crate::{Client, Payload, RequestMetadata, Result};
use serde::de::DeserializeOwned;

/// Calls `method` and returns only the decoded body.
async fn invoke<T: DeserializeOwned>(
    client: &Client,
    method: &str,
    payload: Option<Payload>,
) -> Result<T> {
    client
        .call::<T>(RequestMetadata::new(method), payload)
        .await
        .map(|response| response.data)
}
