//! Reader protocol
//!
//! A [`Reader`] knows how to fetch the first page of a list and how to
//! follow a page's locator to the next one. [`ListReader`] is the generic,
//! endpoint-driven implementation every list resource uses.

use super::resource_set::ResourceSet;
use super::types::Page;
use crate::error::Result;
use crate::http::{ParamMap, Request, RestClient};
use crate::operation::{classify, Endpoint, OperationKind};
use crate::types::HttpMethod;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::ops::RangeBounds;
use tracing::debug;

/// Query parameter carrying the requested page size
pub const PAGE_SIZE_PARAM: &str = "PageSize";

/// Per-resource paging strategy
#[async_trait]
pub trait Reader: Send + Sync {
    /// Record type yielded by the list
    type Record: Send + Sync;

    /// Requested page size, if one was set on the reader
    fn page_size(&self) -> Option<u32>;

    /// Change the page size requested from now on
    fn set_page_size(&mut self, size: u32);

    /// Fetch the first page using the reader's own endpoint and filters
    async fn first_page(&self, client: &RestClient) -> Result<Page<Self::Record>>;

    /// Follow `page`'s locator verbatim; `None` when `page` is the last one
    async fn next_page(
        &self,
        page: &Page<Self::Record>,
        client: &RestClient,
    ) -> Result<Option<Page<Self::Record>>>;

    /// Fetch the first page and wrap it in an auto-paging resource set
    async fn read(self, client: &RestClient) -> Result<ResourceSet<Self>>
    where
        Self: Sized,
    {
        let page = self.first_page(client).await?;
        Ok(ResourceSet::new(self, client.clone(), page))
    }
}

/// Execute a list request, classify the response and parse it as a page
pub async fn resolve_page<E: DeserializeOwned>(
    client: &RestClient,
    request: Request,
    resource: &str,
    records_key: &str,
) -> Result<Page<E>> {
    let response = client.request(request).await?;
    let response = classify(OperationKind::Read, resource, response)?;
    let page = Page::from_json(records_key, &response.into_body())?;
    debug!(
        "{} page: {} records, page size {}, last page: {}",
        resource,
        page.len(),
        page.page_size(),
        !page.has_next_page()
    );
    Ok(page)
}

/// Generic list reader driven by an endpoint descriptor
#[derive(Debug, Clone)]
pub struct ListReader<E> {
    resource: String,
    endpoint: Endpoint,
    records_key: String,
    filters: ParamMap,
    page_size: Option<u32>,
    _record: PhantomData<fn() -> E>,
}

impl<E> ListReader<E> {
    /// Create a reader for a list endpoint.
    ///
    /// `records_key` names the array holding the records in each page body.
    pub fn new(
        resource: impl Into<String>,
        endpoint: Endpoint,
        records_key: impl Into<String>,
    ) -> Self {
        Self {
            resource: resource.into(),
            endpoint,
            records_key: records_key.into(),
            filters: ParamMap::new(),
            page_size: None,
            _record: PhantomData,
        }
    }

    /// Add a filter sent with the first page request
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.add(name, value);
        self
    }

    /// Add a date range filter (`<name>>` / `<name><`)
    #[must_use]
    pub fn date_range<R: RangeBounds<NaiveDate>>(mut self, name: &str, range: R) -> Self {
        self.filters.add_date_range(name, range);
        self
    }

    /// Request pages of `size` records
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn records_key(&self) -> &str {
        &self.records_key
    }

    pub fn filters(&self) -> &ParamMap {
        &self.filters
    }
}

#[async_trait]
impl<E> Reader for ListReader<E>
where
    E: DeserializeOwned + Send + Sync + 'static,
{
    type Record = E;

    fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    fn set_page_size(&mut self, size: u32) {
        self.page_size = Some(size);
    }

    async fn first_page(&self, client: &RestClient) -> Result<Page<E>> {
        let mut request = self.endpoint.request(client);
        for (name, value) in self.filters.pairs() {
            request.add_query_param(name, value);
        }

        let size = self.page_size.unwrap_or(client.config().page_size);
        request.add_query_param(PAGE_SIZE_PARAM, size.to_string());

        resolve_page(client, request, &self.resource, &self.records_key).await
    }

    async fn next_page(&self, page: &Page<E>, client: &RestClient) -> Result<Option<Page<E>>> {
        let Some(locator) = page.next_page_uri() else {
            return Ok(None);
        };

        let request = Request::new(
            HttpMethod::GET,
            &client.base_url(self.endpoint.domain),
            locator,
            client.account_sid(),
        );
        resolve_page(client, request, &self.resource, &self.records_key)
            .await
            .map(Some)
    }
}
