//! Company-level data.

crate::json_object! {
    /// A report suite visible to the company.
    pub struct CompanyReportSuite {
        "rsid" => rsid: String,
        "site_title" => site_title: String,
        "virtual" => is_virtual: bool,
    }
}

crate::json_object! {
    /// The tracking server of a report suite.
    pub struct TrackingServerData {
        "namespace" => namespace: String,
        "tracking_server" => tracking_server: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::JsonObject;

    #[test]
    fn test_report_suite() {
        let suite =
            CompanyReportSuite::from_data(r#"{"rsid": "suite", "site_title": "Site", "virtual": false}"#)
                .unwrap();

        assert_eq!(suite.is_virtual, Some(false));
        assert_eq!(
            format!("{:?}", suite),
            r#"CompanyReportSuite(rsid="suite", site_title="Site", is_virtual=false)"#
        );
    }
}
