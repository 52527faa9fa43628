//! Completed HTTP response

use crate::error::Result;
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Status code and body of one completed call.
///
/// The body can be read once: every accessor that hands it out consumes
/// the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Bytes,
}

impl Response {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Take the raw body
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Take the body as text (lossy UTF-8)
    pub fn text(self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
