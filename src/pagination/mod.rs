//! Pagination module
//!
//! Pages, the reader protocol and auto-paging resource sets.
//!
//! # Overview
//!
//! A [`Reader`] fetches the first page of a list and follows each page's
//! server-issued locator to the next. A [`ResourceSet`] wraps the first page
//! and hands out records one at a time, fetching the next page as soon as
//! the buffered one runs dry.
//!
//! ```rust,ignore
//! let reader = ListReader::<Call>::new("Call", endpoint, "calls").with_page_size(100);
//! let mut calls = reader.read(&client).await?;
//! while let Some(call) = calls.next().await {
//!     println!("{}", call?.sid);
//! }
//! ```

mod reader;
mod resource_set;
mod types;

pub use reader::{resolve_page, ListReader, Reader, PAGE_SIZE_PARAM};
pub use resource_set::ResourceSet;
pub use types::{Page, PagingState};
