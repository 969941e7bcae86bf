//! Typed entities exchanged with the API.
//!
//! All of them are declared with [`json_object!`](crate::json_object) and
//! share the behaviour of [`JsonObject`](crate::JsonObject).

mod bookmark;
mod calculated_metric;
mod company;
mod report;
mod segment;

pub use bookmark::{
    Bookmark, BookmarkFolder, Dashboard, DashboardBookmark, DashboardPage, DisplayInfo,
    GetReportDescriptionResponse,
};
pub use calculated_metric::{CalculatedMetric, CalculatedMetricDefinition, CalculatedMetricShare};
pub use company::{CompanyReportSuite, TrackingServerData};
pub use report::{
    CompatibilityQuery, Ftp, Report, ReportData, ReportDataPath, ReportDescription,
    ReportDescriptionElement, ReportDescriptionMetric, ReportDescriptionSearch,
    ReportDescriptionSegment, ReportElement, ReportMetric, ReportQueueItem, ReportReportSuite,
    ReportResponse, ReportSegment,
};
pub use segment::{
    ComponentQuery, Segment, SegmentContainer, SegmentDefinition, SegmentFilters, SegmentRule,
    SegmentRuleRestriction, SegmentShare,
};
