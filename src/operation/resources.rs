//! Generic resource operations
//!
//! One data-driven type per operation kind instead of one type per
//! resource: the endpoint and parameters are values, the record type is a
//! serde target.

use super::types::{Endpoint, Operation, OperationKind};
use crate::error::Result;
use crate::http::{ParamMap, Request, Response, RestClient};
use crate::types::HttpMethod;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Fetch, create or update a single resource
#[derive(Debug, Clone)]
pub struct ResourceCall<E> {
    kind: OperationKind,
    resource: String,
    endpoint: Endpoint,
    params: ParamMap,
    _record: PhantomData<fn() -> E>,
}

impl<E> ResourceCall<E> {
    fn with_kind(kind: OperationKind, resource: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            kind,
            resource: resource.into(),
            endpoint,
            params: ParamMap::new(),
            _record: PhantomData,
        }
    }

    /// Fetch one resource (expects 200)
    pub fn fetch(resource: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::with_kind(OperationKind::Fetch, resource, endpoint)
    }

    /// Create a resource (expects 201)
    pub fn create(resource: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::with_kind(OperationKind::Create, resource, endpoint)
    }

    /// Update a resource (expects 200)
    pub fn update(resource: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::with_kind(OperationKind::Update, resource, endpoint)
    }

    /// Add a parameter: query string for GET endpoints, form body otherwise
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(name, value);
        self
    }

    /// Add a parameter only when a value is present
    #[must_use]
    pub fn param_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }
}

impl<E: DeserializeOwned + Send> ResourceCall<E> {
    /// Send the call through `client`
    pub async fn execute(&self, client: &RestClient) -> Result<E> {
        client.execute(self).await
    }
}

impl<E: DeserializeOwned> Operation for ResourceCall<E> {
    type Output = E;

    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn resource(&self) -> &str {
        &self.resource
    }

    fn build_request(&self, client: &RestClient) -> Request {
        let mut request = self.endpoint.request(client);
        for (name, value) in self.params.pairs() {
            if self.endpoint.method == HttpMethod::GET {
                request.add_query_param(name, value);
            } else {
                request.add_post_param(name, value);
            }
        }
        request
    }

    fn parse(&self, response: Response) -> Result<E> {
        response.json()
    }
}

/// Delete a resource (expects 204, no body)
#[derive(Debug, Clone)]
pub struct Deleter {
    resource: String,
    endpoint: Endpoint,
}

impl Deleter {
    pub fn new(resource: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            resource: resource.into(),
            endpoint,
        }
    }

    /// Send the delete through `client`; `true` once the server confirmed it
    pub async fn execute(&self, client: &RestClient) -> Result<bool> {
        client.execute(self).await
    }
}

impl Operation for Deleter {
    type Output = bool;

    fn kind(&self) -> OperationKind {
        OperationKind::Delete
    }

    fn resource(&self) -> &str {
        &self.resource
    }

    fn build_request(&self, client: &RestClient) -> Request {
        self.endpoint.request(client)
    }

    fn parse(&self, _response: Response) -> Result<bool> {
        Ok(true)
    }
}
