#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # restline
//!
//! Async client core for a REST telephony API: request building, response
//! classification and auto-paging over server-issued page locators.
//!
//! ## Features
//!
//! - **Request Model**: Ordered multi-valued parameters, date range filters, Basic auth
//! - **Response Classification**: Connection, server and structured API errors
//! - **Generic Operations**: Create, fetch, update and delete over endpoint descriptors
//! - **Auto-Paging**: Lazy record sequences that follow `next_page_uri` locators
//! - **Rate Limiting**: Optional per-host client-side limit via governor
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restline::{ClientConfig, Domain, Endpoint, ListReader, Reader, RestClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RestClient::new(ClientConfig::from_env()?)?;
//!
//!     let calls = ListReader::<serde_json::Value>::new(
//!         "Call",
//!         Endpoint::get(Domain::Api, "/2010-04-01/Accounts/AC123/Calls.json"),
//!         "calls",
//!     );
//!     let mut set = calls.read(&client).await?;
//!     while let Some(call) = set.next().await {
//!         println!("{}", call?["sid"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  ListReader::read() → ResourceSet::next() → record        │
//! │  ResourceCall / Deleter → RestClient::execute() → output  │
//! └───────────────────────────────────────────────────────────┘
//!                             │
//! ┌──────────────┬────────────┴───────┬───────────────────────┐
//! │  Operation   │    Pagination      │        HTTP           │
//! ├──────────────┼────────────────────┼───────────────────────┤
//! │ classify     │ Page               │ Request / ParamMap    │
//! │ Endpoint     │ Reader             │ Transport (reqwest)   │
//! │ ResourceCall │ ResourceSet        │ RestClient            │
//! │ Deleter      │ PagingState        │ HostRateLimiter       │
//! └──────────────┴────────────────────┴───────────────────────┘
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and API error payloads
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Request model, transport and REST client
pub mod http;

/// Response classification and single-resource operations
pub mod operation;

/// Pages, readers and auto-paging resource sets
pub mod pagination;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, RestException, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ClientConfig, ClientConfigBuilder};
pub use http::{HttpTransport, Request, Response, RestClient, Transport};
pub use operation::{classify, Deleter, Endpoint, Operation, OperationKind, ResourceCall};
pub use pagination::{ListReader, Page, PagingState, Reader, ResourceSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
