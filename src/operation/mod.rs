//! Operation module
//!
//! Error classification and the generic single-resource operations.
//!
//! # Overview
//!
//! Every call, whatever its kind, ends in [`classify`]: a missing response
//! becomes a connection error, an unexpected status becomes an API or
//! server error, and the expected status hands the response on for parsing.

mod classify;
mod resources;
mod types;

pub use classify::classify;
pub use resources::{Deleter, ResourceCall};
pub use types::{Endpoint, Operation, OperationKind};
