//! Response classification
//!
//! Applied after every request, whatever the operation kind.

use super::types::OperationKind;
use crate::error::{Error, RestException, Result};
use crate::http::Response;
use tracing::{debug, warn};

/// Map a completed (or absent) response to a typed outcome.
///
/// - no response → [`Error::Connection`]
/// - unexpected status with a structured error body → [`Error::Api`]
/// - unexpected status with anything else → [`Error::Server`]
/// - expected status → the response, untouched
pub fn classify(kind: OperationKind, resource: &str, response: Option<Response>) -> Result<Response> {
    let Some(response) = response else {
        warn!("{} {} failed: no response", resource, kind);
        return Err(Error::connection(format!(
            "{resource} {kind} failed: Unable to connect to server"
        )));
    };

    let status = response.status();
    if status == kind.expected_status() {
        return Ok(response);
    }

    match RestException::from_json(&response.into_body()) {
        Some(exception) => {
            debug!(
                "{} {} rejected with status {} (code {:?})",
                resource, kind, status, exception.code
            );
            Err(Error::api(exception, status))
        }
        None => {
            debug!("{} {} failed with status {} and no error payload", resource, kind, status);
            Err(Error::Server { status })
        }
    }
}
