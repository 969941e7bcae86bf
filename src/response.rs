//! The result of a successful remote method call.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A decoded response together with the details of the exchange.
///
/// `attempts` is `1` for ordinary calls and `2` when the first attempt was
/// rejected for authentication, the shared secret was looked up again and the
/// request was retransmitted.
///
/// # Examples
///
/// ```no_run
/// use omniture::{Client, RequestMetadata};
///
/// # async fn example() -> Result<(), omniture::Error> {
/// let client = Client::builder()
///     .user("analyst")
///     .company("Example Corp")
///     .secret("shared-secret")
///     .build()
///     .await?;
///
/// let response = client
///     .call::<Vec<String>>(RequestMetadata::new("Company.GetVersionAccess"), None)
///     .await?;
///
/// println!("Versions: {:?}", response.data);
/// println!("Took {:?}, re-authenticated: {}", response.latency, response.was_reauthenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The decoded response body.
    pub data: T,

    /// The response body exactly as received.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from the first send until the final response, including any
    /// secret lookup in between.
    pub latency: Duration,

    /// How many times the request was sent.
    pub attempts: usize,
}

impl<T> Response<T> {
    /// Creates a new `Response`.
    pub fn new(
        data: T,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            data,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Transforms the decoded body, keeping the exchange details.
    ///
    /// ```
    /// # use omniture::Response;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = Response::new(
    ///     vec!["1.3".to_string(), "1.4".to_string()],
    ///     r#"["1.3","1.4"]"#.to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(80),
    ///     1,
    /// );
    ///
    /// let newest = response.map(|versions| versions.last().cloned());
    /// assert_eq!(newest.data.as_deref(), Some("1.4"));
    /// ```
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            data: f(self.data),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the request had to be re-signed with a fresh secret.
    pub fn was_reauthenticated(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name, if it is valid text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Drops the exchange details.
    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> std::ops::Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
