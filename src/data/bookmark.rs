//! Bookmarks, folders and dashboards.

use super::ReportDescription;

crate::json_object! {
    /// A saved report.
    pub struct Bookmark {
        "name" => name: String,
        "id" => bookmark_id: i64,
        "rsid" => rsid: String,
    }
}

crate::json_object! {
    /// A folder of bookmarks.
    pub struct BookmarkFolder {
        "name" => name: String,
        "id" => folder_id: i64,
        "owner" => owner: String,
        "bookmarks" => bookmarks: Vec<Bookmark>,
    }
}

crate::json_object! {
    /// Where and how a bookmark is shown on a dashboard page.
    pub struct DisplayInfo {
        "row" => row: i64,
        "col" => col: i64,
        "rowspan" => rowspan: i64,
        "colspan" => colspan: i64,
        "graph" => graph: bool,
        "table" => table: bool,
        "summary" => summary: bool,
    }
}

crate::json_object! {
    pub struct DashboardBookmark {
        "name" => name: String,
        "id" => bookmark_id: i64,
        "rsid" => rsid: String,
        "displayInfo" => display_info: DisplayInfo,
    }
}

crate::json_object! {
    pub struct DashboardPage {
        "grid" => grid: String,
        "bookmarks" => bookmarks: Vec<DashboardBookmark>,
    }
}

crate::json_object! {
    /// A dashboard and its pages.
    pub struct Dashboard {
        "name" => name: String,
        "id" => dashboard_id: i64,
        "owner" => owner: String,
        "pages" => pages: Vec<DashboardPage>,
    }
}

crate::json_object! {
    /// The report description behind a bookmark.
    pub struct GetReportDescriptionResponse {
        "name" => name: String,
        "type" => report_type: String,
        "reportDescription" => report_description: ReportDescription,
    }
}
