//! Scripted [`Transport`] for tests of code built on the client.

use crate::error::Result;
use crate::transport::{RawResponse, Transport};
use std::cell::RefCell;
use std::collections::VecDeque;
use url::Url;

/// Replays queued responses in order and records every requested URL.
///
/// Running out of responses is reported as a 599 status so that a test that
/// polls once too often fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RefCell<VecDeque<RawResponse>>,
    requests: RefCell<Vec<Url>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: u16, reason: &str, body: impl Into<String>) -> &Self {
        self.responses.borrow_mut().push_back(RawResponse {
            status,
            reason: reason.to_string(),
            body: body.into(),
        });
        self
    }

    pub fn push_json(&self, body: &serde_json::Value) -> &Self {
        self.push(200, "OK", body.to_string())
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &Url) -> Result<RawResponse> {
        self.requests.borrow_mut().push(url.clone());
        Ok(self.responses.borrow_mut().pop_front().unwrap_or(RawResponse {
            status: 599,
            reason: "no scripted response".into(),
            body: String::new(),
        }))
    }
}
