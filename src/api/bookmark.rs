use super::invoke;
use crate::{
    data::{BookmarkFolder, Dashboard, GetReportDescriptionResponse},
    Client, Result,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// `Bookmark.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Bookmark<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct Folders {
    folders: Vec<BookmarkFolder>,
}

#[derive(Deserialize)]
struct Dashboards {
    dashboards: Vec<Dashboard>,
}

fn paging(
    limit_key: &str,
    limit: Option<i64>,
    offset_key: &str,
    offset: Option<i64>,
) -> Map<String, Value> {
    let mut body = Map::new();
    if let Some(limit) = limit {
        body.insert(limit_key.to_string(), json!(limit));
    }
    if let Some(offset) = offset {
        body.insert(offset_key.to_string(), json!(offset));
    }
    body
}

impl<'a> Bookmark<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists bookmark folders.
    pub async fn get_bookmarks(
        &self,
        folder_limit: Option<i64>,
        folder_offset: Option<i64>,
    ) -> Result<Vec<BookmarkFolder>> {
        let body = paging("folder_limit", folder_limit, "folder_offset", folder_offset);
        let folders: Folders =
            invoke(self.client, "Bookmark.GetBookmarks", Some(body.into())).await?;
        Ok(folders.folders)
    }

    /// Lists dashboards.
    pub async fn get_dashboards(
        &self,
        dashboard_limit: Option<i64>,
        dashboard_offset: Option<i64>,
    ) -> Result<Vec<Dashboard>> {
        let body = paging(
            "dashboard_limit",
            dashboard_limit,
            "dashboard_offset",
            dashboard_offset,
        );
        let dashboards: Dashboards =
            invoke(self.client, "Bookmark.GetDashboards", Some(body.into())).await?;
        Ok(dashboards.dashboards)
    }

    /// Returns the report description saved in a bookmark.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::BookmarkNotSupported`](crate::Error::BookmarkNotSupported)
    /// for bookmarks the API cannot describe.
    pub async fn get_report_description(
        &self,
        bookmark_id: i64,
    ) -> Result<GetReportDescriptionResponse> {
        let payload = json!({ "bookmark_id": bookmark_id });
        invoke(self.client, "Bookmark.GetReportDescription", Some(payload.into())).await
    }
}
