//! Report descriptions, queue entries and report results.

use crate::mapping::Timestamp;
use chrono::NaiveDate;

crate::json_object! {
    /// A metric requested in a report description.
    pub struct ReportDescriptionMetric {
        "id" => metric_id: String,
    }
}

impl ReportDescriptionMetric {
    /// Requests the metric with this id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            metric_id: Some(id.into()),
        }
    }
}

crate::json_object! {
    /// A keyword search applied to an element or segment.
    pub struct ReportDescriptionSearch {
        "type" => search_type: String,
        "keywords" => keywords: Vec<String>,
        "searches" => searches: Vec<ReportDescriptionSearch>,
    }
}

crate::json_object! {
    /// An inline segment definition.
    pub struct ReportDescriptionSegment {
        "id" => segment_id: String,
        "element" => element: String,
        "search" => search: ReportDescriptionSearch,
        "classification" => classification: String,
        "selected" => selected: Vec<String>,
    }
}

crate::json_object! {
    /// An element (dimension) requested in a report description.
    pub struct ReportDescriptionElement {
        "id" => element_id: String,
        "classification" => classification: String,
        "top" => top: i64,
        "startingWith" => starting_with: i64,
        "search" => search: ReportDescriptionSearch,
        "selected" => selected: Vec<String>,
        "parentID" => parent_id: String,
        "checkpoints" => checkpoints: Vec<String>,
        "pattern" => pattern: Vec<Vec<String>>,
    }
}

impl ReportDescriptionElement {
    /// Requests the element with this id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            element_id: Some(id.into()),
            ..Default::default()
        }
    }
}

crate::json_object! {
    /// Delivery of a finished report to an FTP server.
    pub struct Ftp {
        "host" => host: String,
        "port" => port: i64,
        "directory" => directory: String,
        "username" => username: String,
        "password" => password: String,
        "filename" => filename: String,
    }
}

crate::json_object! {
    /// Everything needed to queue or run a report.
    pub struct ReportDescription {
        "reportSuiteID" => rsid: String,
        "date" => date: NaiveDate,
        "dateFrom" => date_from: NaiveDate,
        "dateTo" => date_to: NaiveDate,
        "dateGranularity" => date_granularity: String,
        "source" => source: String,
        "metrics" => metrics: Vec<ReportDescriptionMetric>,
        "elements" => elements: Vec<ReportDescriptionElement>,
        "locale" => locale: String,
        "sortMethod" => sort_method: String,
        "sortBy" => sort_by: String,
        "segments" => segments: Vec<ReportDescriptionSegment>,
        "anomalyDetection" => anomaly_detection: bool,
        "currentData" => current_data: bool,
        "expedite" => expedite: bool,
        "elementDataEncoding" => element_data_encoding: String,
        "ftp" => ftp: Ftp,
        "segment_id" => segment_id: String,
    }
}

impl ReportDescription {
    /// Starts a description for a report suite.
    pub fn new(rsid: impl Into<String>) -> Self {
        Self {
            rsid: Some(rsid.into()),
            ..Default::default()
        }
    }

    /// Sets the reporting period.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    /// Appends a metric by id.
    pub fn metric(mut self, id: impl Into<String>) -> Self {
        self.metrics
            .get_or_insert_with(Vec::new)
            .push(ReportDescriptionMetric::new(id));
        self
    }

    /// Appends an element by id.
    pub fn element(mut self, id: impl Into<String>) -> Self {
        self.elements
            .get_or_insert_with(Vec::new)
            .push(ReportDescriptionElement::new(id));
        self
    }
}

crate::json_object! {
    /// An entry of the report queue.
    pub struct ReportQueueItem {
        "reportSuiteID" => rsid: String,
        "reportID" => report_id: i64,
        "type" => report_type: String,
        "queueTime" => queue_time: Timestamp,
        "status" => status: String,
        "priority" => priority: i64,
        "estimate" => estimate: i64,
        "user" => user: String,
    }
}

crate::json_object! {
    /// A metric as described by the service.
    pub struct ReportMetric {
        "id" => metric_id: String,
        "name" => name: String,
        "type" => metric_type: String,
        "decimals" => decimals: i64,
        "formula" => formula: String,
        "latency" => latency: i64,
        "current" => current: bool,
    }
}

crate::json_object! {
    /// An element as described by the service.
    pub struct ReportElement {
        "id" => element_id: String,
        "name" => name: String,
        "classification" => classification: String,
        "top" => top: i64,
        "startingWith" => starting_with: i64,
        "correlation" => correlation: bool,
        "subrelation" => subrelation: bool,
        "hierarchy_levels" => hierarchy_levels: i64,
        "max_pathing_steps" => max_pathing_steps: i64,
    }
}

crate::json_object! {
    /// A segment applied to a report.
    pub struct ReportSegment {
        "id" => segment_id: String,
        "name" => name: String,
    }
}

crate::json_object! {
    /// One step of a pathing row.
    pub struct ReportDataPath {
        "name" => name: String,
        "url" => url: String,
    }
}

crate::json_object! {
    /// A row of report data, possibly broken down further.
    pub struct ReportData {
        "name" => name: String,
        "url" => url: String,
        "path" => path: Vec<ReportDataPath>,
        "parentID" => parent_id: String,
        "year" => year: i64,
        "month" => month: i64,
        "day" => day: i64,
        "hour" => hour: i64,
        "minute" => minute: i64,
        "trend" => trend: f64,
        "counts" => counts: Vec<f64>,
        "upperBounds" => upper_bounds: Vec<f64>,
        "lowerBounds" => lower_bounds: Vec<f64>,
        "forecasts" => forecasts: Vec<f64>,
        "breakdownTotal" => breakdown_total: Vec<f64>,
        "breakdown" => breakdown: Vec<ReportData>,
    }
}

crate::json_object! {
    /// The report suite a report was run against.
    pub struct ReportReportSuite {
        "id" => rsid: String,
        "name" => name: String,
    }
}

crate::json_object! {
    /// A finished report.
    pub struct Report {
        "type" => report_type: String,
        "reportSuite" => report_suite: ReportReportSuite,
        "period" => period: String,
        "elements" => elements: Vec<ReportElement>,
        "metrics" => metrics: Vec<ReportMetric>,
        "segments" => segments: Vec<ReportSegment>,
        "data" => report_data: Vec<ReportData>,
        "totals" => totals: Vec<f64>,
        "version" => version: String,
    }
}

crate::json_object! {
    /// The response to fetching or running a report.
    pub struct ReportResponse {
        "rsid" => rsid: String,
        "waitSeconds" => wait_seconds: f64,
        "runSeconds" => run_seconds: f64,
        "report" => report: Report,
        "retryDelay" => retry_delay: f64,
    }
}

crate::json_object! {
    /// Which metrics or elements are compatible with a given selection.
    pub struct CompatibilityQuery {
        "reportSuiteID" => rsid: String,
        "existingElements" => existing_elements: Vec<String>,
        "existingMetrics" => existing_metrics: Vec<String>,
        "reportType" => report_type: String,
    }
}

impl CompatibilityQuery {
    /// Queries a report suite.
    pub fn new(rsid: impl Into<String>) -> Self {
        Self {
            rsid: Some(rsid.into()),
            ..Default::default()
        }
    }
}
