//! Per-call request metadata and payloads.

use crate::{
    mapping::{JsonObject, Map, Value},
    Error, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::time::Duration;

/// Metadata for a single remote method call.
///
/// The remote method (for example `"Report.Queue"`) selects the operation;
/// everything else tunes how this one call is sent.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    /// The remote method name, sent as the `method` query parameter.
    pub method: String,

    /// Extra headers for this call. They replace computed headers of the same name.
    pub headers: HeaderMap,

    /// Timeout for this call, overriding the client default.
    pub timeout: Option<Duration>,

    /// Log the composed request before sending it.
    pub echo: bool,
}

impl RequestMetadata {
    /// Creates metadata for the given remote method.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets the timeout for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Logs the composed request text at `info` level before sending.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }
}

/// The body of a call. A call without a payload is sent as `GET`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON-encoded body.
    Json(Value),
    /// URL-encoded form body, in the given order.
    Form(Vec<(String, String)>),
    /// Text sent as-is.
    Text(String),
    /// Bytes sent as-is.
    Bytes(Vec<u8>),
}

impl Payload {
    /// Serializes any serde value into a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if serialization fails.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| Error::SerializationFailed(e.to_string()))
    }

    /// Uses an entity's wire form as a JSON payload.
    pub fn object<T: JsonObject>(entity: &T) -> Self {
        Payload::Json(Value::Object(entity.data()))
    }

    /// Builds a form payload from key/value pairs.
    pub fn form<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Payload::Form(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// The content type implied by the payload, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Payload::Json(_) => Some("application/json"),
            Payload::Form(_) => Some("application/x-www-form-urlencoded"),
            Payload::Text(_) | Payload::Bytes(_) => None,
        }
    }

    /// Encodes the payload as the request body.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Payload::Json(value) => value.to_string().into_bytes(),
            Payload::Form(pairs) => url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish()
                .into_bytes(),
            Payload::Text(text) => text.clone().into_bytes(),
            Payload::Bytes(bytes) => bytes.clone(),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Json(Value::Object(map))
    }
}

impl From<Vec<(String, String)>> for Payload {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Payload::Form(pairs)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}
