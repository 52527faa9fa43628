//! Scripted transport for unit tests

use super::client::Transport;
use super::request::Request;
use super::response::Response;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order and records every request sent.
///
/// `None` entries, and an empty queue, behave like a connection failure.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Option<Response>>>,
    sent: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, response: Option<Response>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub(crate) fn push_json(&self, status: u16, body: &Value) {
        self.push(Some(Response::new(status, body.to_string())));
    }

    pub(crate) fn push_failure(&self) {
        self.push(None);
    }

    pub(crate) fn sent(&self) -> Vec<Request> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Result<Option<Response>> {
        self.sent.lock().unwrap().push(request.clone());
        Ok(self.responses.lock().unwrap().pop_front().flatten())
    }
}
