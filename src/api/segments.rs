use super::invoke;
use crate::{
    data::{ComponentQuery, Segment},
    Client, Payload, Result,
};
use serde::Deserialize;
use serde_json::json;

/// Fields requested by [`Segments::list`].
pub const SEGMENT_FIELDS: [&str; 11] = [
    "tags",
    "shares",
    "description",
    "owner",
    "modified",
    "compatibility",
    "favorite",
    "reportSuiteID",
    "definition",
    "name",
    "id",
];

/// `Segments.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Segments<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct Saved {
    #[serde(rename = "segmentID")]
    segment_id: String,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists segments matching the query.
    pub async fn get(&self, query: &ComponentQuery) -> Result<Vec<Segment>> {
        invoke(self.client, "Segments.Get", Some(Payload::object(query))).await
    }

    /// Lists segments with every field of [`SEGMENT_FIELDS`].
    pub async fn list(&self) -> Result<Vec<Segment>> {
        self.get(&ComponentQuery::with_fields(SEGMENT_FIELDS)).await
    }

    /// Creates or updates a segment and returns its id.
    pub async fn save(&self, segment: &Segment) -> Result<String> {
        let saved: Saved = invoke(self.client, "Segments.Save", Some(Payload::object(segment))).await?;
        Ok(saved.segment_id)
    }

    /// Deletes a segment.
    pub async fn delete(&self, segment_id: &str) -> Result<bool> {
        let payload = json!({ "segmentID": segment_id });
        invoke(self.client, "Segments.Delete", Some(payload.into())).await
    }
}
