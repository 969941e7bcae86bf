//! The authenticated client: host discovery, request signing, dispatch and
//! authentication recovery.
//!
//! The [`Client`] type is the entry point for every remote method call.
//! Use [`ClientBuilder`] to configure credentials and connect.

use crate::{
    api::{Bookmark, CalculatedMetrics, Company, Report, Segments},
    auth::{UsernameToken, LOGIN_KEY_METHOD, WSSE_HEADER},
    error::from_failed_response,
    metadata::{Payload, RequestMetadata},
    version::ApiVersion,
    Error, Response, Result,
};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use url::Url;

/// Hosts probed, in order, when no host is configured.
pub const DEFAULT_HOSTS: [&str; 6] = [
    "api.omniture.com",
    "api1.omniture.com",
    "api2.omniture.com",
    "api3.omniture.com",
    "api4.omniture.com",
    "api5.omniture.com",
];

/// A client for the Omniture REST API.
///
/// Every call is a `method` query parameter on the versioned endpoint,
/// optionally with a body. Calls are signed with a WSSE token whenever a user
/// and shared secret are known. When the service rejects a call for
/// authentication the client looks up the user's shared secret once, stores
/// it, and sends the call again.
///
/// The client is cheap to clone; clones share the connection pool, the cookie
/// jar and the stored secret.
///
/// # Examples
///
/// ```no_run
/// use omniture::Client;
///
/// # async fn example() -> Result<(), omniture::Error> {
/// let client = Client::builder()
///     .user("analyst")
///     .company("Example Corp")
///     .secret("shared-secret")
///     .build()
///     .await?;
///
/// println!("Using {}", client.endpoint());
///
/// for suite in client.company().get_report_suites(&[], None).await? {
///     println!("{:?}", suite.rsid);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    scheme: String,
    host: String,
    version: ApiVersion,
    company: Option<String>,
    user: Option<String>,
    secret: RwLock<Option<String>>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

/// A successful exchange before decoding.
struct Exchange {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The host all calls are sent to.
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// The API version in use.
    pub fn version(&self) -> &ApiVersion {
        &self.inner.version
    }

    /// The configured company name.
    pub fn company_name(&self) -> Option<&str> {
        self.inner.company.as_deref()
    }

    /// The configured user name.
    pub fn user(&self) -> Option<&str> {
        self.inner.user.as_deref()
    }

    /// The shared secret currently used for signing.
    ///
    /// This changes after a successful authentication recovery.
    pub fn secret(&self) -> Option<String> {
        self.inner
            .secret
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The endpoint URL, `{scheme}://{host}/admin/{version}/rest/`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}://{}/admin/{}/rest/",
            self.inner.scheme, self.inner.host, self.inner.version
        )
    }

    /// Company methods: endpoints, login keys, report suites, tracking servers.
    pub fn company(&self) -> Company<'_> {
        Company::new(self)
    }

    /// Report methods: queueing, fetching and validating reports.
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }

    /// Bookmark and dashboard methods.
    pub fn bookmark(&self) -> Bookmark<'_> {
        Bookmark::new(self)
    }

    /// Segment methods.
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(self)
    }

    /// Calculated metric methods.
    pub fn calculated_metrics(&self) -> CalculatedMetrics<'_> {
        CalculatedMetrics::new(self)
    }

    /// Calls a remote method and decodes the JSON response.
    ///
    /// The call is sent as `POST` with the encoded payload when one is given,
    /// and as `GET` otherwise. The future resolves once the full response has
    /// been received, including a transparent re-authentication and resend
    /// when the first attempt is rejected for authentication.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use omniture::{Client, Payload, RequestMetadata};
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), omniture::Error> {
    /// let client = Client::builder().user("analyst").secret("s").build().await?;
    ///
    /// let response = client
    ///     .call::<serde_json::Value>(
    ///         RequestMetadata::new("Report.Cancel"),
    ///         Some(Payload::from(json!({"reportID": 1234}))),
    ///     )
    ///     .await?;
    /// println!("Cancelled: {}", response.data);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<Res>(
        &self,
        metadata: RequestMetadata,
        payload: Option<Payload>,
    ) -> Result<Response<Res>>
    where
        Res: DeserializeOwned,
    {
        let start_time = Instant::now();
        let (exchange, attempts) = self.dispatch(&metadata, payload.as_ref()).await?;
        let latency = start_time.elapsed();

        match serde_json::from_str::<Res>(&exchange.body) {
            Ok(data) => Ok(Response::new(
                data,
                exchange.body,
                exchange.status,
                exchange.headers,
                latency,
                attempts,
            )),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    method = %metadata.method,
                    raw_response = %exchange.body,
                    "Failed to deserialize response"
                );

                Err(Error::DeserializationFailed {
                    raw_response: exchange.body,
                    serde_error: e.to_string(),
                    status: exchange.status,
                })
            }
        }
    }

    /// Calls a remote method and returns the raw response text.
    pub async fn call_text(
        &self,
        metadata: RequestMetadata,
        payload: Option<Payload>,
    ) -> Result<Response<String>> {
        let start_time = Instant::now();
        let (exchange, attempts) = self.dispatch(&metadata, payload.as_ref()).await?;

        Ok(Response::new(
            exchange.body.clone(),
            exchange.body,
            exchange.status,
            exchange.headers,
            start_time.elapsed(),
            attempts,
        ))
    }

    /// Sends a call, recovering once from an authentication rejection.
    async fn dispatch(
        &self,
        metadata: &RequestMetadata,
        payload: Option<&Payload>,
    ) -> Result<(Exchange, usize)> {
        let first = self.exchange(metadata, payload, 1).await;

        match first {
            Ok(exchange) => Ok((exchange, 1)),
            Err(Error::Authentication(rejection)) if metadata.method != LOGIN_KEY_METHOD => {
                tracing::warn!(
                    method = %metadata.method,
                    description = rejection.description(),
                    "Authentication rejected, looking up shared secret"
                );

                self.recover_secret(metadata, Error::Authentication(rejection))
                    .await?;
                let exchange = self.exchange(metadata, payload, 2).await?;
                Ok((exchange, 2))
            }
            Err(e) => {
                tracing::warn!(error = %e, method = %metadata.method, "Request failed");
                Err(e)
            }
        }
    }

    /// Fetches the user's shared secret and stores it for later signing.
    ///
    /// A rejected lookup surfaces the original authentication error.
    async fn recover_secret(&self, metadata: &RequestMetadata, rejection: Error) -> Result<()> {
        let lookup = RequestMetadata {
            method: LOGIN_KEY_METHOD.to_string(),
            headers: HeaderMap::new(),
            timeout: metadata.timeout,
            echo: metadata.echo,
        };
        let payload = Payload::from(json!({
            "company": self.inner.company,
            "login": self.inner.user,
            "password": self.secret(),
        }));

        let exchange = match self.exchange(&lookup, Some(&payload), 1).await {
            Ok(exchange) => exchange,
            Err(e) if e.is_bad_request() => {
                tracing::error!(error = %e, "Shared secret lookup was rejected");
                return Err(rejection);
            }
            Err(e) => return Err(e),
        };

        let secret: String =
            serde_json::from_str(&exchange.body).map_err(|e| Error::DeserializationFailed {
                raw_response: exchange.body.clone(),
                serde_error: e.to_string(),
                status: exchange.status,
            })?;

        *self
            .inner
            .secret
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(secret);
        tracing::info!(user = ?self.inner.user, "Stored refreshed shared secret");
        Ok(())
    }

    /// Sends a single attempt and classifies failures.
    async fn exchange(
        &self,
        metadata: &RequestMetadata,
        payload: Option<&Payload>,
        attempt: usize,
    ) -> Result<Exchange> {
        let url = self.method_url(&metadata.method)?;
        let headers = self.request_headers(metadata, payload)?;
        let body = payload.map(Payload::to_bytes);
        let http_method = if body.is_some() {
            Method::POST
        } else {
            Method::GET
        };

        if metadata.echo {
            tracing::info!(
                target: "omniture::echo",
                request = %request_text(&http_method, &url, &headers, body.as_deref()),
                "Sending request"
            );
        }

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            attempt = attempt,
            "Executing API request"
        );

        let start_time = Instant::now();
        let mut request = self
            .inner
            .http_client
            .request(http_method, url)
            .headers(headers);

        if let Some(timeout) = metadata.timeout.or(self.inner.timeout) {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::info!(
            status = status.as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            method = %metadata.method,
            attempt = attempt,
            "Received API response"
        );

        if status.is_success() {
            return Ok(Exchange {
                status,
                headers,
                body,
            });
        }

        let error = from_failed_response(status, headers, body);
        if let Some(api_error) = error.api_error() {
            tracing::error!(
                status = status.as_u16(),
                code = ?api_error.error,
                description = api_error.description(),
                "API error"
            );
        } else {
            tracing::error!(status = status.as_u16(), error = %error, "HTTP error");
        }
        Err(error)
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint())?;
        if !method.is_empty() {
            url.query_pairs_mut().append_pair("method", method);
        }
        Ok(url)
    }

    /// Default headers, then computed headers, then the call's own headers.
    fn request_headers(
        &self,
        metadata: &RequestMetadata,
        payload: Option<&Payload>,
    ) -> Result<HeaderMap> {
        let mut headers = self.inner.default_headers.clone();

        if let Some(content_type) = payload.and_then(Payload::content_type) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        if metadata.method != LOGIN_KEY_METHOD {
            if let Some(token) = self.username_token() {
                let value = HeaderValue::try_from(token.header_value()).map_err(|e| {
                    Error::ConfigurationError(format!("Invalid {} header: {}", WSSE_HEADER, e))
                })?;
                headers.insert(HeaderName::from_static("x-wsse"), value);
            }
        }

        for name in metadata.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &metadata.headers {
            headers.append(name.clone(), value.clone());
        }

        Ok(headers)
    }

    fn username_token(&self) -> Option<UsernameToken> {
        let user = self.inner.user.as_deref().filter(|user| !user.is_empty())?;
        let secret = self.secret().filter(|secret| !secret.is_empty())?;
        Some(UsernameToken::generate(
            user,
            self.inner.company.as_deref(),
            &secret,
        ))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint())
            .field("company", &self.inner.company)
            .field("user", &self.inner.user)
            .finish_non_exhaustive()
    }
}

/// Renders the request as text for echo logging.
fn request_text(method: &Method, url: &Url, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut text = format!("\n{}: {}\n", method, url);
    for (name, value) in headers {
        text.push_str(&format!(
            "{}: {}\n",
            name,
            value.to_str().unwrap_or("<binary>")
        ));
    }
    text.push('\n');
    if let Some(body) = body {
        text.push_str(&String::from_utf8_lossy(body));
    }
    text
}

/// Extracts the host from an endpoint URL such as `https://api3.omniture.com/admin/1.4/rest/`.
fn host_from_endpoint(endpoint: &str) -> &str {
    let after_scheme = endpoint.rsplit("//").next().unwrap_or(endpoint);
    after_scheme.split('/').next().unwrap_or(after_scheme).trim()
}

/// Builder for configuring and connecting a [`Client`].
///
/// Without an explicit [`host`](Self::host), [`build`](Self::build) probes the
/// candidate hosts in order by asking each for the company's endpoint and
/// connects to the host that endpoint names.
///
/// # Examples
///
/// ```no_run
/// use omniture::ClientBuilder;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), omniture::Error> {
/// let client = ClientBuilder::new()
///     .user("analyst")
///     .company("Example Corp")
///     .secret("shared-secret")
///     .version("1.4")?
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "reporting-job/1.0")?
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    company: Option<String>,
    user: Option<String>,
    secret: Option<String>,
    version: ApiVersion,
    host: Option<String>,
    candidate_hosts: Vec<String>,
    scheme: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    accept_invalid_certs: bool,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            company: None,
            user: None,
            secret: None,
            version: ApiVersion::default(),
            host: None,
            candidate_hosts: DEFAULT_HOSTS.iter().map(|host| host.to_string()).collect(),
            scheme: "https".to_string(),
            default_headers: HeaderMap::new(),
            timeout: None,
            accept_invalid_certs: false,
        }
    }

    /// Sets the company name. It is appended to the signed user name.
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the user name.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the shared secret used for signing.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Sets the API version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if the version renders empty.
    pub fn version<V>(mut self, version: V) -> Result<Self>
    where
        V: TryInto<ApiVersion, Error = Error>,
    {
        self.version = version.try_into()?;
        Ok(self)
    }

    /// Uses this host and skips discovery.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Replaces the hosts probed during discovery.
    pub fn candidate_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the URL scheme, `https` by default.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Sets the default timeout for every call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every call.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Disables TLS certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Connects the client, discovering the host when none was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, if discovery gets
    /// a classified API error from a host, or if every candidate fails to
    /// connect, in which case the last connectivity error is returned.
    pub async fn build(self) -> Result<Client> {
        match &self.host {
            Some(host) => self.connect(host.clone(), self.secret.clone()),
            None => self.discover().await,
        }
    }

    async fn discover(&self) -> Result<Client> {
        let mut last_error = None;

        for candidate in &self.candidate_hosts {
            let probe = self.connect(candidate.clone(), self.secret.clone())?;
            tracing::debug!(host = %candidate, "Probing API host");

            match probe.company().get_endpoint(self.company.as_deref()).await {
                Ok(endpoint) => {
                    let host = host_from_endpoint(&endpoint);
                    if host.is_empty() || host == candidate.as_str() {
                        tracing::info!(host = %candidate, "Discovered API host");
                        return Ok(probe);
                    }

                    tracing::info!(probed = %candidate, host = %host, "Switching to company endpoint host");
                    return self.connect(host.to_string(), probe.secret());
                }
                Err(e) if e.is_connectivity() => {
                    tracing::warn!(host = %candidate, error = %e, "API host unreachable");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::ConfigurationError("No candidate hosts configured".to_string())
        }))
    }

    /// Each connection gets its own cookie jar.
    fn connect(&self, host: String, secret: Option<String>) -> Result<Client> {
        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                scheme: self.scheme.clone(),
                host,
                version: self.version.clone(),
                company: self.company.clone(),
                user: self.user.clone(),
                secret: RwLock::new(secret),
                default_headers: self.default_headers.clone(),
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
