//! Error types for Omniture API calls.
//!
//! Failures fall into three groups:
//!
//! - transport problems ([`Error::Network`], and [`Error::HttpError`] when a
//!   failed response carries no recognisable error body),
//! - API failures classified from the JSON error body returned with a non-2xx
//!   status ([`Error::ReportNotReady`], [`Error::InvalidReportId`],
//!   [`Error::Authentication`], [`Error::BookmarkNotSupported`] and the
//!   generic [`Error::BadRequest`]),
//! - local problems building requests or mapping JSON to typed entities.
//!
//! Every classified variant carries the parsed [`ApiError`] so callers can
//! inspect the code and description the service sent.

use crate::mapping::{is_blank, JsonObject, Value, WireValue};
use http::{HeaderMap, StatusCode};
use std::fmt;

/// The numeric error code the service uses for an unknown report id.
pub const INVALID_REPORT_ID_CODE: i64 = 5021;

/// The `error` member of an API error body.
///
/// The service reports most failures with a short string and a few with a
/// number. Codes this crate does not recognise are kept as-is and surface as
/// [`Error::BadRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// A textual code such as `"Bad Request"` or `"report_not_ready"`.
    Text(String),
    /// A numeric code such as `5021`.
    Numeric(i64),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Text(text) => f.write_str(text),
            ErrorCode::Numeric(code) => write!(f, "{code}"),
        }
    }
}

impl WireValue for ErrorCode {
    fn to_wire(&self) -> Value {
        match self {
            ErrorCode::Text(text) => Value::String(text.clone()),
            ErrorCode::Numeric(code) => Value::from(*code),
        }
    }

    fn from_wire(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(ErrorCode::Text(text)),
            Value::Number(_) => i64::from_wire(value).map(ErrorCode::Numeric),
            other => Err(Error::Coercion {
                expected: "error code",
                found: other.to_string(),
            }),
        }
    }
}

crate::json_object! {
    /// The JSON body the service returns alongside a failed call.
    pub struct ApiError {
        "error" => error: ErrorCode,
        "error_description" => description: String,
        "error_uri" => uri: String,
    }
}

impl ApiError {
    /// Parses a failed response body.
    ///
    /// Members outside the error table are ignored, as are members whose
    /// values have the wrong shape. Returns `None` when the body is not a JSON
    /// object or carries no usable `error` member.
    pub fn from_body(body: &str) -> Option<Self> {
        let Ok(Value::Object(members)) = serde_json::from_str::<Value>(body) else {
            return None;
        };

        let mut api_error = ApiError::default();
        for (key, value) in members {
            if is_blank(&value) {
                continue;
            }
            let Some(field) = Self::field(key.trim()) else {
                continue;
            };
            if let Err(e) = api_error.assign(field.key, value) {
                tracing::debug!(key = field.key, error = %e, "Ignoring error body member");
            }
        }

        api_error.error.is_some().then_some(api_error)
    }

    /// Returns the description, or an empty string if none was sent.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// The main error type for Omniture API calls.
///
/// # Examples
///
/// ```no_run
/// use omniture::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .user("analyst")
///     .company("Example Corp")
///     .secret("shared-secret")
///     .build()
///     .await?;
///
/// match client.report().get(1234).await {
///     Ok(response) => println!("Report: {:?}", response.report),
///     Err(Error::ReportNotReady(body)) => println!("Still running: {}", body.description()),
///     Err(Error::InvalidReportId(_)) => println!("No such report"),
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed, timeout, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server returned a non-2xx status without a recognisable error body.
    #[error("HTTP error {status}: {raw_response}")]
    HttpError {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: HeaderMap,
    },

    /// A successful response body did not match the expected type.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// The queued report has not finished yet; ask again later.
    #[error("Report not ready: {0}")]
    ReportNotReady(ApiError),

    /// The report id is unknown to the service.
    #[error("Invalid report ID: {0}")]
    InvalidReportId(ApiError),

    /// The service rejected the request's credentials.
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// The bookmark cannot be turned into a report description.
    #[error("Bookmark not supported: {0}")]
    BookmarkNotSupported(ApiError),

    /// Any other API failure.
    #[error("Bad request: {0}")]
    BadRequest(ApiError),

    /// The API version could not be rendered as a non-empty string.
    #[error("Invalid API version: {0}")]
    InvalidVersion(String),

    /// Invalid configuration was provided, such as an unusable header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was produced from the configured scheme, host or version.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Input handed to the mapping layer was not valid JSON.
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// A wire object contained a key the entity does not map.
    #[error("{entity} has no attribute mapped to key \"{key}\"")]
    UnmappedKey {
        /// The entity being populated
        entity: &'static str,
        /// The offending wire key
        key: String,
    },

    /// A mapped wire value had the wrong shape.
    #[error("{entity}.{key}: expected {expected}, found {found}")]
    InvalidValue {
        /// The entity being populated
        entity: &'static str,
        /// The wire key whose value was rejected
        key: String,
        /// What the attribute accepts
        expected: &'static str,
        /// The rejected JSON
        found: String,
    },

    /// A JSON value could not be converted to the requested type.
    #[error("Expected {expected}, found {found}")]
    Coercion {
        /// What the conversion accepts
        expected: &'static str,
        /// The rejected JSON
        found: String,
    },
}

impl Error {
    /// Returns `true` for the bad-request family.
    ///
    /// That is every classified failure except [`Error::ReportNotReady`].
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Error::InvalidReportId(_)
                | Error::Authentication(_)
                | Error::BookmarkNotSupported(_)
                | Error::BadRequest(_)
        )
    }

    /// Returns `true` if the failure happened at the transport level.
    ///
    /// Host discovery moves on to the next candidate for these errors only.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Network(_) | Error::HttpError { .. })
    }

    /// Returns `true` if the request exceeded its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_timeout())
    }

    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::HttpError { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::HttpError { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the parsed error body of a classified API failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::ReportNotReady(body)
            | Error::InvalidReportId(body)
            | Error::Authentication(body)
            | Error::BookmarkNotSupported(body)
            | Error::BadRequest(body) => Some(body),
            _ => None,
        }
    }

    /// Attaches the entity and key to a bare coercion failure.
    pub(crate) fn in_field(self, entity: &'static str, key: &str) -> Error {
        match self {
            Error::Coercion { expected, found } => Error::InvalidValue {
                entity,
                key: key.to_string(),
                expected,
                found,
            },
            other => other,
        }
    }
}

/// Maps a parsed error body to its error kind.
///
/// ```
/// use omniture::error::{classify, ApiError};
/// use omniture::{Error, JsonObject};
///
/// let body = ApiError::from_data(
///     r#"{"error": "Bad Request", "error_description": "Unable to validate authentication."}"#,
/// ).unwrap();
///
/// assert!(matches!(classify(body), Error::Authentication(_)));
/// ```
pub fn classify(api_error: ApiError) -> Error {
    let description = api_error.description();
    let kind: fn(ApiError) -> Error = match &api_error.error {
        Some(ErrorCode::Text(code)) if code == "report_not_ready" => Error::ReportNotReady,
        Some(ErrorCode::Numeric(INVALID_REPORT_ID_CODE)) => Error::InvalidReportId,
        Some(ErrorCode::Text(code)) if code == "Bad Request" => {
            if description.contains("authentication") {
                Error::Authentication
            } else if description == "This bookmark is not supported" {
                Error::BookmarkNotSupported
            } else {
                Error::BadRequest
            }
        }
        _ => Error::BadRequest,
    };
    kind(api_error)
}

/// Builds the error for a non-2xx response.
///
/// Bodies that parse as an [`ApiError`] are classified; anything else is
/// reported as a plain [`Error::HttpError`].
pub(crate) fn from_failed_response(
    status: StatusCode,
    headers: HeaderMap,
    raw_response: String,
) -> Error {
    match ApiError::from_body(&raw_response) {
        Some(api_error) => classify(api_error),
        None => Error::HttpError {
            status,
            raw_response,
            headers,
        },
    }
}

/// A specialized `Result` type for Omniture API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> ApiError {
        ApiError::from_data(json).unwrap()
    }

    #[test]
    fn test_report_not_ready() {
        let err = classify(body(r#"{"error": "report_not_ready", "error_description": "Report not ready"}"#));
        assert!(matches!(err, Error::ReportNotReady(_)));
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_invalid_report_id_numeric_code() {
        let err = classify(body(r#"{"error": 5021, "error_description": "Report not found"}"#));
        assert!(matches!(err, Error::InvalidReportId(_)));
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_textual_5021_is_not_invalid_report_id() {
        let err = classify(body(r#"{"error": "5021"}"#));
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn test_authentication() {
        let err = classify(body(
            r#"{"error": "Bad Request", "error_description": "Unable to validate authentication."}"#,
        ));
        assert!(matches!(err, Error::Authentication(_)));
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_bookmark_not_supported_requires_exact_description() {
        let err = classify(body(
            r#"{"error": "Bad Request", "error_description": "This bookmark is not supported"}"#,
        ));
        assert!(matches!(err, Error::BookmarkNotSupported(_)));

        let err = classify(body(
            r#"{"error": "Bad Request", "error_description": "This bookmark is not supported."}"#,
        ));
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn test_unknown_codes_are_bad_requests() {
        let err = classify(body(r#"{"error": 42, "error_uri": "https://example.com/42"}"#));

        match err {
            Error::BadRequest(api_error) => {
                assert_eq!(api_error.error, Some(ErrorCode::Numeric(42)));
                assert_eq!(api_error.uri.as_deref(), Some("https://example.com/42"));
                assert_eq!(api_error.description(), "");
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_bodies_stay_http_errors() {
        for raw in ["", "   ", "<html>oops</html>", r#"{"message": "nope"}"#, r#"{"error_description": "no code"}"#] {
            let err = from_failed_response(StatusCode::BAD_REQUEST, HeaderMap::new(), raw.to_string());
            assert!(
                matches!(err, Error::HttpError { .. }),
                "{raw:?} should not be classified"
            );
            assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
            assert_eq!(err.raw_response(), Some(raw));
        }
    }

    #[test]
    fn test_extra_members_do_not_prevent_classification() {
        let err = from_failed_response(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            r#"{"error": "report_not_ready", "error_description": "Report not ready", "status": 400}"#
                .to_string(),
        );
        assert!(matches!(err, Error::ReportNotReady(_)));

        let err = from_failed_response(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            r#"{"error": "Bad Request", "error_description": "Unable to validate authentication.", "trace_id": "x"}"#
                .to_string(),
        );
        assert!(matches!(err, Error::Authentication(_)));
        assert!(!err.is_connectivity());
        assert_eq!(err.api_error().unwrap().description(), "Unable to validate authentication.");
    }

    #[test]
    fn test_ill_typed_members_are_ignored() {
        let api_error = ApiError::from_body(
            r#"{"error": 5021, "error_description": "Report not found", "error_uri": {"href": "x"}}"#,
        )
        .unwrap();
        assert_eq!(api_error.error, Some(ErrorCode::Numeric(5021)));
        assert_eq!(api_error.uri, None);

        assert!(ApiError::from_body(r#"{"error": {"code": 1}, "error_description": "odd"}"#).is_none());
    }

    #[test]
    fn test_api_error_accessor() {
        let err = from_failed_response(
            StatusCode::BAD_REQUEST,
            HeaderMap::new(),
            r#"{"error": "Bad Request", "error_description": "Missing reportID"}"#.to_string(),
        );

        let api_error = err.api_error().unwrap();
        assert_eq!(api_error.description(), "Missing reportID");
        assert_eq!(
            err.to_string(),
            r#"Bad request: {"error":"Bad Request","error_description":"Missing reportID"}"#
        );
    }

    #[test]
    fn test_in_field_only_wraps_coercions() {
        let err = Error::Coercion {
            expected: "integer",
            found: "\"x\"".to_string(),
        }
        .in_field("Report", "totals");
        assert!(matches!(err, Error::InvalidValue { entity: "Report", .. }));

        let err = Error::MalformedJson("eof".to_string()).in_field("Report", "totals");
        assert!(matches!(err, Error::MalformedJson(_)));
    }
}
