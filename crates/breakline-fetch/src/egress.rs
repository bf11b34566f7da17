//! Egress strategies: how an outbound request leaves the process.
//!
//! Every strategy is built once from an [`EgressConfig`] and then shared,
//! read-only, by all requests. None of them retries, and none of them turns a
//! non-success status into an error: the status is handed back for the caller
//! to classify.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT,
};
use reqwest::{Client, Proxy, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Browser identity presented through proxies.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "application/json, text/plain, */*";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Default site the browser headers claim to come from.
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.surfline.com";

/// The available egress paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EgressKind {
    /// Connect straight to the upstream.
    #[default]
    Direct,
    /// HTTP(S) proxy hosted in a datacenter.
    DatacenterProxy,
    /// Rotating residential HTTP(S) proxy.
    ResidentialProxy,
    /// SOCKS5 proxy; DNS is resolved by the proxy.
    Socks5Proxy,
    /// Third-party relay that performs the request on our behalf.
    ManagedScraping,
}

impl EgressKind {
    /// Returns the configuration name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::DatacenterProxy => "datacenter_proxy",
            Self::ResidentialProxy => "residential_proxy",
            Self::Socks5Proxy => "socks5_proxy",
            Self::ManagedScraping => "managed_scraping",
        }
    }

    /// Returns true for the kinds routed through [`ProxyEndpoint`].
    #[must_use]
    pub const fn uses_proxy(self) -> bool {
        matches!(
            self,
            Self::DatacenterProxy | Self::ResidentialProxy | Self::Socks5Proxy
        )
    }
}

impl fmt::Display for EgressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EgressKind {
    type Err = EgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "direct" => Ok(Self::Direct),
            "datacenter_proxy" | "datacenter" => Ok(Self::DatacenterProxy),
            "residential_proxy" | "residential" => Ok(Self::ResidentialProxy),
            "socks5_proxy" | "socks5" => Ok(Self::Socks5Proxy),
            "managed_scraping" | "scraping" => Ok(Self::ManagedScraping),
            _ => Err(EgressError::UnknownKind(s.to_string())),
        }
    }
}

/// Proxy host and credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyEndpoint {
    /// Proxy host name.
    pub host: String,
    /// Proxy port.
    pub port: u16,
    /// Optional user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional password.
    #[serde(default)]
    pub password: Option<String>,
}

impl ProxyEndpoint {
    /// Builds the proxy URL for `scheme`, credentials included.
    ///
    /// # Errors
    ///
    /// Returns an error if the host or credentials do not form a valid URL.
    pub fn url(&self, scheme: &str) -> Result<Url, EgressError> {
        let mut url = Url::parse(&format!("{scheme}://{}:{}", self.host, self.port))
            .map_err(|e| EgressError::InvalidUrl(format!("proxy {}: {e}", self.host)))?;
        if let Some(username) = &self.username {
            url.set_username(username)
                .map_err(|()| EgressError::InvalidUrl("proxy username".into()))?;
            url.set_password(self.password.as_deref())
                .map_err(|()| EgressError::InvalidUrl("proxy password".into()))?;
        }
        Ok(url)
    }
}

impl fmt::Debug for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A managed scraping relay.
///
/// The relay is called as `GET {endpoint}?api_key=…&url=<target>`, where the
/// target carries its own query string, and answers with the upstream's
/// status and body.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapingService {
    /// Relay endpoint.
    pub endpoint: String,
    /// Relay API key.
    pub api_key: String,
}

impl fmt::Debug for ScrapingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrapingService")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Egress selection and connection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EgressConfig {
    /// Which strategy to build.
    pub kind: EgressKind,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Accept TLS certificates that fail verification. Some residential
    /// proxies re-sign upstream traffic and need this.
    pub accept_invalid_certs: bool,
    /// Site the browser headers claim to come from.
    pub site_origin: String,
    /// Extra headers, applied after the identity set.
    pub headers: BTreeMap<String, String>,
    /// Proxy endpoint for the proxy kinds.
    pub proxy: Option<ProxyEndpoint>,
    /// Relay for [`EgressKind::ManagedScraping`].
    pub scraping: Option<ScrapingService>,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self {
            kind: EgressKind::Direct,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            accept_invalid_certs: false,
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            headers: BTreeMap::new(),
            proxy: None,
            scraping: None,
        }
    }
}

impl EgressConfig {
    /// Returns the whole-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Errors raised while building or using a strategy.
#[derive(Error, Debug)]
pub enum EgressError {
    /// Unrecognized strategy name.
    #[error("Unknown egress kind: {0}")]
    UnknownKind(String),

    /// A proxy kind was selected without a proxy endpoint.
    #[error("Egress {0} requires a proxy endpoint")]
    MissingProxy(EgressKind),

    /// Managed scraping was selected without a relay.
    #[error("Egress managed_scraping requires a scraping service")]
    MissingScrapingService,

    /// A configured header name or value is invalid.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection or proxy handshake failed.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other HTTP client failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A response handed back untouched, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body as lossy UTF-8, truncated to `max` characters.
    #[must_use]
    pub fn snippet(&self, max: usize) -> String {
        String::from_utf8_lossy(&self.body).chars().take(max).collect()
    }
}

/// One outbound HTTP GET under a fixed network identity.
#[async_trait]
pub trait EgressStrategy: Send + Sync + fmt::Debug {
    /// Returns which egress path this strategy uses.
    fn kind(&self) -> EgressKind;

    /// Fetches `url` with `query` appended.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures below HTTP (timeouts, connection or
    /// proxy failures). Non-success statuses are returned as responses.
    async fn fetch(&self, url: &str, query: &[(&str, String)])
    -> Result<RawResponse, EgressError>;
}

/// Builds the strategy selected by `config`.
///
/// # Errors
///
/// Returns an error if the configuration is incomplete for the selected kind
/// or the HTTP client cannot be created.
pub fn build_strategy(config: &EgressConfig) -> Result<Arc<dyn EgressStrategy>, EgressError> {
    let strategy: Arc<dyn EgressStrategy> = match config.kind {
        EgressKind::ManagedScraping => Arc::new(ScrapingEgress::new(config)?),
        _ => Arc::new(HttpEgress::new(config)?),
    };
    tracing::debug!(kind = %config.kind, "built egress strategy");
    Ok(strategy)
}

/// Returns the identity headers for `config`.
///
/// Direct connections and relay calls announce themselves honestly: a relay
/// request goes to the scraping service, not to the upstream. Proxied paths
/// carry a browser-like header set pointing at the upstream's own site.
///
/// # Errors
///
/// Returns an error if a configured header is invalid.
pub fn identity_headers(config: &EgressConfig) -> Result<HeaderMap, EgressError> {
    let mut headers = HeaderMap::new();
    if matches!(config.kind, EgressKind::Direct | EgressKind::ManagedScraping) {
        headers.insert(USER_AGENT, header_value(&default_user_agent())?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    } else {
        let origin = config.site_origin.trim_end_matches('/');
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
        );
        headers.insert(ORIGIN, header_value(origin)?);
        headers.insert(REFERER, header_value(&format!("{origin}/"))?);
    }

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| EgressError::InvalidHeader(name.clone()))?;
        headers.insert(name, header_value(value)?);
    }
    Ok(headers)
}

fn default_user_agent() -> String {
    format!("breakline/{}", env!("CARGO_PKG_VERSION"))
}

fn header_value(value: &str) -> Result<HeaderValue, EgressError> {
    HeaderValue::from_str(value).map_err(|_| EgressError::InvalidHeader(value.to_string()))
}

/// Creates the shared HTTP client for `config`, proxy included.
fn http_client(config: &EgressConfig) -> Result<Client, EgressError> {
    let mut builder = Client::builder()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .tcp_nodelay(true)
        .gzip(true)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .default_headers(identity_headers(config)?);

    builder = match config.kind {
        EgressKind::DatacenterProxy | EgressKind::ResidentialProxy => {
            let endpoint = config
                .proxy
                .as_ref()
                .ok_or(EgressError::MissingProxy(config.kind))?;
            builder.proxy(Proxy::all(endpoint.url("http")?)?)
        }
        EgressKind::Socks5Proxy => {
            let endpoint = config
                .proxy
                .as_ref()
                .ok_or(EgressError::MissingProxy(config.kind))?;
            builder.proxy(Proxy::all(endpoint.url("socks5h")?)?)
        }
        // Ignore any proxy variables in the environment.
        EgressKind::Direct | EgressKind::ManagedScraping => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

/// Maps a client failure to the egress error taxonomy.
fn request_error(err: reqwest::Error, timeout: Duration) -> EgressError {
    if err.is_timeout() {
        EgressError::Timeout(timeout)
    } else if err.is_connect() {
        EgressError::Connect(err.to_string())
    } else {
        EgressError::Http(err)
    }
}

async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<RawResponse, EgressError> {
    let response = request
        .send()
        .await
        .map_err(|e| request_error(e, timeout))?;
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(e, timeout))?;
    Ok(RawResponse::new(status, body))
}

/// Direct and proxied requests through a preconfigured client.
#[derive(Debug, Clone)]
pub struct HttpEgress {
    kind: EgressKind,
    client: Client,
    timeout: Duration,
}

impl HttpEgress {
    /// Creates the strategy for a direct or proxy kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a proxy kind has no endpoint or the client cannot
    /// be created.
    pub fn new(config: &EgressConfig) -> Result<Self, EgressError> {
        Ok(Self {
            kind: config.kind,
            client: http_client(config)?,
            timeout: config.timeout(),
        })
    }
}

#[async_trait]
impl EgressStrategy for HttpEgress {
    fn kind(&self) -> EgressKind {
        self.kind
    }

    async fn fetch(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<RawResponse, EgressError> {
        send(self.client.get(url).query(query), self.timeout).await
    }
}

/// Requests relayed through a managed scraping service.
#[derive(Debug, Clone)]
pub struct ScrapingEgress {
    client: Client,
    service: ScrapingService,
    timeout: Duration,
}

impl ScrapingEgress {
    /// Creates the relay strategy.
    ///
    /// # Errors
    ///
    /// Returns an error if no relay is configured or the client cannot be
    /// created.
    pub fn new(config: &EgressConfig) -> Result<Self, EgressError> {
        let service = config
            .scraping
            .clone()
            .ok_or(EgressError::MissingScrapingService)?;
        Ok(Self {
            client: http_client(config)?,
            service,
            timeout: config.timeout(),
        })
    }

    /// Returns the relay request parameters for a target request.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid URL.
    pub fn relay_params(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<(&'static str, String)>, EgressError> {
        let target = Url::parse_with_params(url, query)
            .map_err(|e| EgressError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(vec![
            ("api_key", self.service.api_key.clone()),
            ("url", target.to_string()),
        ])
    }
}

#[async_trait]
impl EgressStrategy for ScrapingEgress {
    fn kind(&self) -> EgressKind {
        EgressKind::ManagedScraping
    }

    async fn fetch(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<RawResponse, EgressError> {
        let params = self.relay_params(url, query)?;
        send(
            self.client.get(&self.service.endpoint).query(&params),
            self.timeout,
        )
        .await
    }
}
