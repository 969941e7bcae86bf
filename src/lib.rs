//! # omniture - a client for the Omniture REST API
//!
//! `omniture` talks to the Omniture (Adobe Analytics 1.4) REST API. It signs
//! requests with WSSE tokens, finds the data-center host serving a company,
//! classifies the service's JSON error bodies into typed errors, and maps every
//! request and response onto typed entities.
//!
//! ## Quick Start
//!
//! ```no_run
//! use omniture::data::ReportDescription;
//! use omniture::{Client, Error};
//! use chrono::NaiveDate;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     // Discovers the company's host, then signs every call
//!     let client = Client::builder()
//!         .user("analyst")
//!         .company("Example Corp")
//!         .secret("shared-secret")
//!         .timeout(Duration::from_secs(30))
//!         .build()
//!         .await?;
//!
//!     let description = ReportDescription::new("my-suite")
//!         .between(
//!             NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
//!             NaiveDate::from_ymd_opt(2017, 1, 31).unwrap(),
//!         )
//!         .metric("pageviews")
//!         .element("page");
//!
//!     let report_id = client.report().queue(&description).await?;
//!
//!     let response = loop {
//!         match client.report().get(report_id).await {
//!             Ok(response) => break response,
//!             Err(Error::ReportNotReady(_)) => tokio::time::sleep(Duration::from_secs(5)).await,
//!             Err(e) => return Err(e),
//!         }
//!     };
//!     println!("{:?}", response.report);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **WSSE signing** - every call except the login-key lookup carries an `X-WSSE` header
//! - **Host discovery** - candidate hosts are probed until one names the company's endpoint
//! - **Authentication recovery** - a rejected call looks up the shared secret once and is resent
//! - **Typed errors** - report-not-ready, invalid report id, authentication and bookmark failures
//! - **Typed entities** - report descriptions, reports, bookmarks, dashboards, segments and
//!   calculated metrics, all declared with [`json_object!`]
//! - **Structured logging** - requests and responses are traced with `tracing`
//!
//! ## Raw calls
//!
//! Methods without a typed wrapper can be called directly:
//!
//! ```no_run
//! use omniture::{Client, Payload, RequestMetadata};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), omniture::Error> {
//! # let client = Client::builder().host("api.omniture.com").build().await?;
//! let metadata = RequestMetadata::new("ReportSuite.GetSiteTitle").with_echo(true);
//! let response = client
//!     .call::<serde_json::Value>(metadata, Some(Payload::from(json!({"rsid_list": ["my-suite"]}))))
//!     .await?;
//! println!("{}", response.raw_body);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
mod client;
pub mod data;
pub mod error;
pub mod mapping;
pub mod metadata;
mod response;
mod version;

pub use client::{Client, ClientBuilder, DEFAULT_HOSTS};
pub use error::{ApiError, Error, ErrorCode, Result};
pub use mapping::{JsonObject, Timestamp, WireValue};
pub use metadata::{Payload, RequestMetadata};
pub use response::Response;
pub use version::{ApiVersion, DEFAULT_VERSION};
