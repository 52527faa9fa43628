//! Transport and REST client
//!
//! Provides:
//! - [`Transport`], the seam that executes a [`Request`]
//! - [`HttpTransport`], the reqwest-backed implementation
//! - [`RestClient`], the explicit client context every operation receives

use super::rate_limit::HostRateLimiter;
use super::request::Request;
use super::response::Response;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::types::{Domain, HttpMethod};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, warn};

/// Executes requests.
///
/// `Ok(None)` means no response reached the client; errors are reserved
/// for requests that could not be built (bad URL, unencodable credentials).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and wait for its response
    async fn send(&self, request: &Request) -> Result<Option<Response>>;
}

// ============================================================================
// reqwest Transport
// ============================================================================

/// Transport backed by a reqwest client
pub struct HttpTransport {
    client: Client,
    rate_limiter: Option<HostRateLimiter>,
}

impl HttpTransport {
    /// Create a transport honouring the config's timeout, user agent and throttling
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: config.rate_limit.as_ref().map(HostRateLimiter::new),
        })
    }

    /// Check if throttling is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<Option<Response>> {
        let url = request.construct_url()?;

        let mut req = self
            .client
            .request(request.method().into(), url.clone())
            .header(ACCEPT, "application/json");

        if request.requires_authentication() {
            req = req.header(AUTHORIZATION, request.auth_string()?);
        }

        if !request.post_params().is_empty() {
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(request.encode_form_body());
        }

        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait_for(&url).await;
        }

        debug!("Dispatching {} {}", request.method(), url);
        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed before a response arrived: {}", request.method(), url, e);
                return Ok(None);
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => {
                debug!("{} {} -> {}", request.method(), url, status);
                Ok(Some(Response::new(status, body)))
            }
            Err(e) => {
                warn!("Reading body of {} {} failed: {}", request.method(), url, e);
                Ok(None)
            }
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// REST Client
// ============================================================================

/// Client context: account, credentials, domain resolution and transport.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct RestClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl RestClient {
    /// Create a client on the reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn account_sid(&self) -> &str {
        &self.config.account_sid
    }

    /// Scheme and host for a domain
    pub fn base_url(&self, domain: Domain) -> String {
        self.config.base_url_for(domain)
    }

    /// Start a request for `path` under `domain`, scoped to this client's account
    pub fn new_request(&self, method: HttpMethod, domain: Domain, path: &str) -> Request {
        Request::new(method, &self.base_url(domain), path, self.account_sid())
    }

    /// Execute a request.
    ///
    /// Requests without their own credentials are sent with the account
    /// SID and auth token. `Ok(None)` means no response was obtained.
    pub async fn request(&self, mut request: Request) -> Result<Option<Response>> {
        if !request.requires_authentication() {
            request.set_auth(
                self.config.account_sid.as_str(),
                self.config.auth_token.as_str(),
            );
        }

        self.transport.send(&request).await
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("account_sid", &self.config.account_sid)
            .field("base_domain", &self.config.base_domain)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
