//! Calculated metrics.

use super::SegmentShare;
use crate::mapping::{Timestamp, Value};

/// Calculated metrics share the same sharing model as segments.
pub type CalculatedMetricShare = SegmentShare;

crate::json_object! {
    /// A node of a calculated metric formula.
    pub struct CalculatedMetricDefinition {
        "function" => function: String,
        "parameters" => parameters: Value,
        "metric" => metric: Value,
        "description" => description: String,
        "calculatedMetric" => calculated_metric: Box<CalculatedMetricDefinition>,
        "segments" => segments: Value,
    }
}

crate::json_object! {
    /// A saved calculated metric.
    pub struct CalculatedMetric {
        "id" => metric_id: String,
        "name" => name: String,
        "description" => description: String,
        "polarity" => polarity: String,
        "precision" => precision: i64,
        "type" => metric_type: String,
        "modified" => modified: Timestamp,
        "shares" => shares: Vec<CalculatedMetricShare>,
        "definition" => definition: CalculatedMetricDefinition,
        "compatibility" => compatibility: Vec<String>,
        "template" => template: bool,
        "approved" => approved: bool,
        "favorite" => favorite: bool,
        "reportSuiteID" => rsid: String,
        "owner" => owner: String,
        "tags" => tags: Vec<String>,
        "internal" => internal: bool,
    }
}
