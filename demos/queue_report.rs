//! Queue a report, poll until it is ready, and print its rows.
//!
//! Credentials come from the environment:
//!
//! - `OMNITURE_USER` and `OMNITURE_COMPANY`
//! - `OMNITURE_SECRET` (the shared secret)
//! - `OMNITURE_RSID` (the report suite to query)
//!
//! Run with: `cargo run --example queue_report`

use chrono::{Duration as Days, Utc};
use omniture::data::ReportDescription;
use omniture::{Client, Error};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("omniture=info")
        .init();

    let client = Client::builder()
        .user(std::env::var("OMNITURE_USER")?)
        .company(std::env::var("OMNITURE_COMPANY")?)
        .secret(std::env::var("OMNITURE_SECRET")?)
        .timeout(Duration::from_secs(60))
        .build()
        .await?;

    println!("Connected to {}", client.endpoint());

    let today = Utc::now().date_naive();
    let description = ReportDescription::new(std::env::var("OMNITURE_RSID")?)
        .between(today - Days::days(7), today)
        .metric("pageviews")
        .element("page");

    let report_id = client.report().queue(&description).await?;
    println!("Queued report {}", report_id);

    let response = loop {
        match client.report().get(report_id).await {
            Ok(response) => break response,
            Err(Error::ReportNotReady(_)) => {
                println!("Not ready yet, waiting...");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
            Err(e) => return Err(e.into()),
        }
    };

    let rows = response
        .report
        .and_then(|report| report.report_data)
        .unwrap_or_default();

    for row in rows {
        println!(
            "{:<60} {:?}",
            row.name.unwrap_or_default(),
            row.counts.unwrap_or_default()
        );
    }

    Ok(())
}
