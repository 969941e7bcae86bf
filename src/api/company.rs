use super::invoke;
use crate::{
    auth::LOGIN_KEY_METHOD,
    data::{CompanyReportSuite, TrackingServerData},
    Client, Payload, Result,
};
use serde::Deserialize;
use serde_json::json;

/// Report suite kinds listed when no types are given.
pub const DEFAULT_REPORT_SUITE_TYPES: &[&str] = &["standard", "rollup"];

/// `Company.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Company<'a> {
    client: &'a Client,
}

#[derive(Deserialize)]
struct ReportSuites {
    report_suites: Vec<CompanyReportSuite>,
}

impl<'a> Company<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Returns the endpoint URL that serves `company`.
    ///
    /// Without a company the call is sent as a plain `GET`.
    pub async fn get_endpoint(&self, company: Option<&str>) -> Result<String> {
        let payload = company.map(|company| Payload::from(json!({ "company": company })));
        invoke(self.client, "Company.GetEndpoint", payload).await
    }

    /// Returns the shared secret of a user. The request is not signed.
    pub async fn get_login_key(
        &self,
        company: Option<&str>,
        login: &str,
        password: &str,
    ) -> Result<String> {
        let payload = json!({
            "company": company,
            "login": login,
            "password": password,
        });
        invoke(self.client, LOGIN_KEY_METHOD, Some(payload.into())).await
    }

    /// Lists the company's report suites.
    ///
    /// `types` limits the kinds of suites returned (`standard`, `virtual`,
    /// `rollup`). An empty slice asks for [`DEFAULT_REPORT_SUITE_TYPES`].
    pub async fn get_report_suites(
        &self,
        types: &[&str],
        search: Option<&str>,
    ) -> Result<Vec<CompanyReportSuite>> {
        let types = if types.is_empty() {
            DEFAULT_REPORT_SUITE_TYPES
        } else {
            types
        };
        let mut body = serde_json::Map::new();
        body.insert("types".to_string(), json!(types));
        if let Some(search) = search {
            body.insert("search".to_string(), json!(search));
        }

        let suites: ReportSuites =
            invoke(self.client, "Company.GetReportSuites", Some(body.into())).await?;
        Ok(suites.report_suites)
    }

    /// Returns the tracking server of a report suite.
    pub async fn get_tracking_server(&self, rsid: &str) -> Result<TrackingServerData> {
        let payload = json!({ "rsid": rsid });
        invoke(self.client, "Company.GetTrackingServer", Some(payload.into())).await
    }

    /// Lists the API versions the company may use.
    pub async fn get_version_access(&self) -> Result<Vec<String>> {
        invoke(self.client, "Company.GetVersionAccess", None).await
    }
}
