//! Operation types and traits
//!
//! An operation is the pair {build a request from the client context, parse
//! the body of a successful response}. Resources are described by data
//! ([`Endpoint`]) rather than one type per resource.

use super::classify::classify;
use crate::error::Result;
use crate::http::{Request, Response, RestClient};
use crate::types::{Domain, HttpMethod};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of operation, each with its own expected success status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Create,
    Read,
    Fetch,
    Update,
    Delete,
}

impl OperationKind {
    /// The only status code treated as success
    pub fn expected_status(self) -> u16 {
        match self {
            OperationKind::Create => 201,
            OperationKind::Read | OperationKind::Fetch | OperationKind::Update => 200,
            OperationKind::Delete => 204,
        }
    }

    /// Noun used in failure messages ("Call creation failed: ...")
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Create => "creation",
            OperationKind::Read => "read",
            OperationKind::Fetch => "fetch",
            OperationKind::Update => "update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Endpoint descriptor: method, service domain and a fully substituted path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    #[serde(default)]
    pub domain: Domain,
    pub path: String,
}

impl Endpoint {
    /// Create an endpoint
    pub fn new(method: HttpMethod, domain: Domain, path: impl Into<String>) -> Self {
        Self {
            method,
            domain,
            path: path.into(),
        }
    }

    /// GET endpoint
    pub fn get(domain: Domain, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::GET, domain, path)
    }

    /// POST endpoint
    pub fn post(domain: Domain, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::POST, domain, path)
    }

    /// DELETE endpoint
    pub fn delete(domain: Domain, path: impl Into<String>) -> Self {
        Self::new(HttpMethod::DELETE, domain, path)
    }

    /// Start a request against this endpoint
    pub fn request(&self, client: &RestClient) -> Request {
        client.new_request(self.method, self.domain, &self.path)
    }
}

/// A single request/response operation
pub trait Operation {
    /// What a successful call yields
    type Output;

    /// Which kind of operation this is
    fn kind(&self) -> OperationKind;

    /// Resource name used in failure messages
    fn resource(&self) -> &str;

    /// Build the outbound request
    fn build_request(&self, client: &RestClient) -> Request;

    /// Parse the body of a response that carried the expected status
    fn parse(&self, response: Response) -> Result<Self::Output>;
}

impl RestClient {
    /// Run an operation: send, classify, parse.
    ///
    /// A malformed success payload is a hard failure.
    pub async fn execute<O>(&self, operation: &O) -> Result<O::Output>
    where
        O: Operation + Sync,
    {
        let request = operation.build_request(self);
        let response = self.request(request).await?;
        let response = classify(operation.kind(), operation.resource(), response)?;
        operation.parse(response)
    }
}
