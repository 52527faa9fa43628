//! HTTP module
//!
//! Request construction, the transport seam and the client context.
//!
//! # Features
//!
//! - **Request Builder**: ordered multi-valued query/form parameters, date ranges, Basic auth
//! - **Single-read Responses**: status plus a body consumed by value
//! - **Transport**: reqwest-backed by default, swappable behind a trait
//! - **Rate Limiting**: optional per-host token bucket throttling using governor

mod client;
mod rate_limit;
mod request;
mod response;

pub use client::{HttpTransport, RestClient, Transport};
pub use rate_limit::{HostRateLimiter, RateLimiterConfig};
pub use request::{ParamMap, Request, QUERY_STRING_DATE_FORMAT};
pub use response::Response;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
mod tests;
