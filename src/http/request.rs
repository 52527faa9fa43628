//! Outbound request description
//!
//! A [`Request`] is a plain value: method, base URL, ordered multi-valued
//! query/form parameters and optional Basic-auth credentials. Nothing is
//! encoded until dispatch asks for it.

use crate::error::{Error, Result};
use crate::types::HttpMethod;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use std::ops::{Bound, RangeBounds};
use url::form_urlencoded::byte_serialize;
use url::Url;

/// Format used for date range query values (`yyyy-MM-dd`)
pub const QUERY_STRING_DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Parameter Multimap
// ============================================================================

/// Ordered multimap of request parameters.
///
/// Values keep insertion order per key and keys keep first-seen order when
/// encoded. Equality ignores key order.
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ParamMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Append the bounds of a date range as `<name>>` and `<name><`.
    ///
    /// Inclusive and exclusive bounds are treated alike; unbounded ends add
    /// nothing.
    pub fn add_date_range<R>(&mut self, name: &str, range: R)
    where
        R: RangeBounds<NaiveDate>,
    {
        if let Bound::Included(date) | Bound::Excluded(date) = range.start_bound() {
            self.add(
                format!("{name}>"),
                date.format(QUERY_STRING_DATE_FORMAT).to_string(),
            );
        }

        if let Bound::Included(date) | Bound::Excluded(date) = range.end_bound() {
            self.add(
                format!("{name}<"),
                date.format(QUERY_STRING_DATE_FORMAT).to_string(),
            );
        }
    }

    /// All values recorded for `name`
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Check if no parameters were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in encoding order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
    }

    /// Percent-encode every name and value and join the pairs with `&`
    pub fn encode(&self) -> String {
        self.pairs()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl PartialEq for ParamMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(key, values)| other.get(key) == Some(values.as_slice()))
    }
}

impl Eq for ParamMap {}

/// Form-urlencode a single key or value
fn encode_component(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}

// ============================================================================
// Request
// ============================================================================

/// An outbound HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: HttpMethod,
    url: String,
    account_sid: String,
    query_params: ParamMap,
    post_params: ParamMap,
    username: Option<String>,
    password: Option<String>,
}

impl Request {
    /// Create a request for `path` under `base_url`.
    ///
    /// A `path` that is already an absolute URL is used as-is, which is how
    /// server-issued next-page locators pass through untouched.
    pub fn new(
        method: HttpMethod,
        base_url: &str,
        path: &str,
        account_sid: impl Into<String>,
    ) -> Self {
        Self {
            method,
            url: join_url(base_url, path),
            account_sid: account_sid.into(),
            query_params: ParamMap::new(),
            post_params: ParamMap::new(),
            username: None,
            password: None,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Base URL without the encoded query string
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    pub fn query_params(&self) -> &ParamMap {
        &self.query_params
    }

    pub fn post_params(&self) -> &ParamMap {
        &self.post_params
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Set both halves of the Basic-auth credentials
    pub fn set_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.set_username(Some(username));
        self.set_password(Some(password));
    }

    /// Set or clear the Basic-auth username alone
    pub fn set_username(&mut self, username: Option<impl Into<String>>) {
        self.username = username.map(Into::into);
    }

    /// Set or clear the Basic-auth password alone
    pub fn set_password(&mut self, password: Option<impl Into<String>>) {
        self.password = password.map(Into::into);
    }

    /// True when either half of the credentials is set, even to an empty string
    pub fn requires_authentication(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }

    /// `Authorization` header value for the configured credentials.
    ///
    /// Fails when the credentials are not plain ASCII rather than sending a
    /// mangled header.
    pub fn auth_string(&self) -> Result<String> {
        let credentials = format!(
            "{}:{}",
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default()
        );
        if !credentials.is_ascii() {
            return Err(Error::config(
                "credentials must be encodable as ASCII for Basic auth",
            ));
        }
        Ok(format!("Basic {}", STANDARD.encode(credentials)))
    }

    /// Add a query parameter; repeated names produce repeated pairs
    pub fn add_query_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query_params.add(name, value);
    }

    /// Add a form parameter; repeated names produce repeated pairs
    pub fn add_post_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.post_params.add(name, value);
    }

    /// Add the bounds of a date range as `<name>>` and `<name><` query parameters
    pub fn add_query_date_range<R>(&mut self, name: &str, range: R)
    where
        R: RangeBounds<NaiveDate>,
    {
        self.query_params.add_date_range(name, range);
    }

    /// Encoded query string (without the leading `?`)
    pub fn encode_query_params(&self) -> String {
        self.query_params.encode()
    }

    /// Encoded `application/x-www-form-urlencoded` body
    pub fn encode_form_body(&self) -> String {
        self.post_params.encode()
    }

    /// Final URL: base plus `?query` when there is one
    pub fn construct_url(&self) -> Result<Url> {
        let query = self.encode_query_params();
        let full = if query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, query)
        };
        Ok(Url::parse(&full)?)
    }
}

/// Join a base URL and a path, leaving absolute URLs alone
fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}
