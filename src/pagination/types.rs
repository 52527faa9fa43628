//! Page type and paging state
//!
//! A [`Page`] is one server batch of records plus the metadata needed to
//! continue: the page size the server actually used and an opaque
//! next-page locator.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Where a resource set stands between two advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingState {
    /// Unread records remain in the buffered page
    Buffered,
    /// Buffer empty, a next page exists and auto-paging will fetch it
    BoundaryAuto,
    /// Buffer empty, a next page exists but auto-paging is off
    BoundaryManual,
    /// Buffer empty and no next page; terminal
    Exhausted,
    /// A page fetch failed; terminal
    Aborted,
}

impl PagingState {
    /// Check if no further record can ever be produced
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Aborted)
    }
}

/// One server-returned batch of records
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    records: VecDeque<E>,
    page_size: u32,
    next_page_uri: Option<String>,
    page_number: Option<u32>,
    uri: Option<String>,
    first_page_uri: Option<String>,
    previous_page_uri: Option<String>,
}

impl<E> Page<E> {
    /// Create a page; an empty locator counts as absent
    pub fn new(records: Vec<E>, page_size: u32, next_page_uri: Option<String>) -> Self {
        Self {
            records: records.into(),
            page_size,
            next_page_uri: next_page_uri.filter(|uri| !uri.is_empty()),
            page_number: None,
            uri: None,
            first_page_uri: None,
            previous_page_uri: None,
        }
    }

    /// Unread records, in server order
    pub fn records(&self) -> impl Iterator<Item = &E> {
        self.records.iter()
    }

    /// Number of unread records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Page size the server used for this page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Opaque locator of the next page; `None` on the last page
    pub fn next_page_uri(&self) -> Option<&str> {
        self.next_page_uri.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_uri.is_some()
    }

    /// Zero-based page number, when the server reports one
    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    /// Locator of this page
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    pub fn first_page_uri(&self) -> Option<&str> {
        self.first_page_uri.as_deref()
    }

    pub fn previous_page_uri(&self) -> Option<&str> {
        self.previous_page_uri.as_deref()
    }

    /// Remove and return the next unread record
    pub fn pop_record(&mut self) -> Option<E> {
        self.records.pop_front()
    }

    /// Take the unread records
    pub fn into_records(self) -> Vec<E> {
        self.records.into()
    }
}

impl<E: DeserializeOwned> Page<E> {
    /// Parse a list response body.
    ///
    /// Records are read from the array under `records_key`. Paging metadata
    /// is taken from a `meta` object when there is one, otherwise from the
    /// top level (`page_size`, `next_page_uri`, ...). A missing page size
    /// falls back to the number of records.
    pub fn from_json(records_key: &str, body: &[u8]) -> Result<Self> {
        let mut value: Value = serde_json::from_slice(body)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| Error::decode("list response is not a JSON object"))?;

        let records = match object.get_mut(records_key).map(Value::take) {
            Some(records @ Value::Array(_)) => serde_json::from_value::<Vec<E>>(records)?,
            Some(_) => {
                return Err(Error::decode(format!(
                    "field '{records_key}' is not an array"
                )))
            }
            None => {
                return Err(Error::decode(format!(
                    "missing records field '{records_key}'"
                )))
            }
        };

        let page = match object.get("meta").and_then(Value::as_object) {
            Some(meta) => PageMeta::from_meta(meta),
            None => PageMeta::from_top_level(object),
        };

        let page_size = page.page_size.unwrap_or(records.len() as u32);
        let mut parsed = Page::new(records, page_size, page.next);
        parsed.page_number = page.number;
        parsed.uri = page.uri;
        parsed.first_page_uri = page.first;
        parsed.previous_page_uri = page.previous;
        Ok(parsed)
    }
}

/// Paging metadata as found in a response body
struct PageMeta {
    page_size: Option<u32>,
    number: Option<u32>,
    next: Option<String>,
    uri: Option<String>,
    first: Option<String>,
    previous: Option<String>,
}

impl PageMeta {
    fn from_top_level(object: &Map<String, Value>) -> Self {
        Self {
            page_size: u32_field(object, "page_size"),
            number: u32_field(object, "page"),
            next: str_field(object, "next_page_uri"),
            uri: str_field(object, "uri"),
            first: str_field(object, "first_page_uri"),
            previous: str_field(object, "previous_page_uri"),
        }
    }

    fn from_meta(meta: &Map<String, Value>) -> Self {
        Self {
            page_size: u32_field(meta, "page_size"),
            number: u32_field(meta, "page"),
            next: str_field(meta, "next_page_url"),
            uri: str_field(meta, "url"),
            first: str_field(meta, "first_page_url"),
            previous: str_field(meta, "previous_page_url"),
        }
    }
}

fn str_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn u32_field(object: &Map<String, Value>, key: &str) -> Option<u32> {
    object
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}
