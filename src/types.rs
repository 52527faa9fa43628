//! Common types used throughout restline
//!
//! Shared HTTP vocabulary: methods and the service domains that resource
//! paths hang off.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Service Domains
// ============================================================================

/// Service domain a resource lives under.
///
/// Each domain is a host prefix: `Domain::Trunking` resolves to
/// `https://trunking.<base domain>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    #[default]
    Api,
    Conversations,
    IpMessaging,
    Lookups,
    Monitor,
    Notify,
    Pricing,
    Taskrouter,
    Trunking,
}

impl Domain {
    /// Host prefix for this domain
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Api => "api",
            Domain::Conversations => "conversations",
            Domain::IpMessaging => "ip-messaging",
            Domain::Lookups => "lookups",
            Domain::Monitor => "monitor",
            Domain::Notify => "notify",
            Domain::Pricing => "pricing",
            Domain::Taskrouter => "taskrouter",
            Domain::Trunking => "trunking",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
