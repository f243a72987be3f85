// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock remote API for deterministic testing.
//!
//! `MockApi` implements `RemoteApi` with per-endpoint FIFO reply queues and
//! call counters. An endpoint with an empty queue answers with a transport
//! error, so an unexpected call is visible in the test outcome.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use grindless_core::{
    AccountInfo, ApiResponse, GrindlessError, RemoteApi, SummaryKind, SummaryResult,
};

/// A queued reply: an envelope or a transport failure.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Envelope(ApiResponse<T>),
    TransportError(String),
    Malformed(String),
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<ApiResponse<T>, GrindlessError> {
        match self {
            Reply::Envelope(envelope) => Ok(envelope),
            Reply::TransportError(message) => Err(GrindlessError::Transport {
                message,
                source: None,
            }),
            Reply::Malformed(message) => Err(GrindlessError::MalformedResponse(message)),
        }
    }
}

impl<T> From<ApiResponse<T>> for Reply<T> {
    fn from(envelope: ApiResponse<T>) -> Self {
        Reply::Envelope(envelope)
    }
}

/// A summarize request as seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarizeCall {
    pub access_token: String,
    pub kind: SummaryKind,
    pub text: String,
}

#[derive(Default)]
struct Counters {
    my_info: AtomicUsize,
    exchange: AtomicUsize,
    summarize: AtomicUsize,
}

/// A mock remote API with pre-configured replies.
///
/// Clones share queues and counters.
#[derive(Clone, Default)]
pub struct MockApi {
    my_info: Arc<Mutex<VecDeque<Reply<AccountInfo>>>>,
    exchange: Arc<Mutex<VecDeque<Reply<String>>>>,
    summarize: Arc<Mutex<VecDeque<Reply<SummaryResult>>>>,
    summarize_calls: Arc<Mutex<Vec<SummarizeCall>>>,
    seen_tokens: Arc<Mutex<Vec<String>>>,
    counters: Arc<Counters>,
    latency: Option<Duration>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every call by `latency`, to widen race windows in tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn push_my_info(&self, reply: impl Into<Reply<AccountInfo>>) {
        self.my_info.lock().await.push_back(reply.into());
    }

    pub async fn push_exchange(&self, reply: impl Into<Reply<String>>) {
        self.exchange.lock().await.push_back(reply.into());
    }

    pub async fn push_summarize(&self, reply: impl Into<Reply<SummaryResult>>) {
        self.summarize.lock().await.push_back(reply.into());
    }

    pub fn my_info_calls(&self) -> usize {
        self.counters.my_info.load(Ordering::SeqCst)
    }

    pub fn exchange_calls(&self) -> usize {
        self.counters.exchange.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.counters.summarize.load(Ordering::SeqCst)
    }

    /// Total calls across all endpoints.
    pub fn total_calls(&self) -> usize {
        self.my_info_calls() + self.exchange_calls() + self.summarize_calls()
    }

    /// Bearer tokens passed to `get_my_info`, in call order.
    pub async fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().await.clone()
    }

    /// Summarize requests, in call order.
    pub async fn summarize_requests(&self) -> Vec<SummarizeCall> {
        self.summarize_calls.lock().await.clone()
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

async fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>, endpoint: &str) -> Reply<T> {
    queue.lock().await.pop_front().unwrap_or_else(|| {
        tracing::warn!(endpoint, "mock api has no queued reply");
        Reply::TransportError(format!("no reply queued for {endpoint}"))
    })
}

#[async_trait]
impl RemoteApi for MockApi {
    async fn get_my_info(
        &self,
        access_token: &str,
    ) -> Result<ApiResponse<AccountInfo>, GrindlessError> {
        self.counters.my_info.fetch_add(1, Ordering::SeqCst);
        self.seen_tokens.lock().await.push(access_token.to_string());
        self.pause().await;
        next(&self.my_info, "get_my_info").await.into_result()
    }

    async fn exchange_google_code(
        &self,
        _code: &str,
    ) -> Result<ApiResponse<String>, GrindlessError> {
        self.counters.exchange.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        next(&self.exchange, "exchange_google_code").await.into_result()
    }

    async fn summarize(
        &self,
        access_token: &str,
        kind: SummaryKind,
        text: &str,
    ) -> Result<ApiResponse<SummaryResult>, GrindlessError> {
        self.counters.summarize.fetch_add(1, Ordering::SeqCst);
        self.summarize_calls.lock().await.push(SummarizeCall {
            access_token: access_token.to_string(),
            kind,
            text: text.to_string(),
        });
        self.pause().await;
        next(&self.summarize, "summarize").await.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ok_account_info;

    #[tokio::test]
    async fn replies_in_order_then_errors() {
        let api = MockApi::new();
        api.push_my_info(ok_account_info(1, 10)).await;
        api.push_my_info(Reply::TransportError("down".into())).await;

        assert!(api.get_my_info("a").await.unwrap().is_ok());
        assert!(api.get_my_info("b").await.unwrap_err().is_transport());
        assert!(api.get_my_info("c").await.unwrap_err().is_transport());

        assert_eq!(api.my_info_calls(), 3);
        assert_eq!(api.seen_tokens().await, vec!["a", "b", "c"]);
        assert_eq!(api.total_calls(), 3);
    }

    #[tokio::test]
    async fn clones_share_counters() {
        let api = MockApi::new();
        let clone = api.clone();
        clone.push_exchange(ApiResponse::ok("ok", "tok".to_string())).await;
        assert_eq!(
            api.exchange_google_code("c").await.unwrap().data.as_deref(),
            Some("tok")
        );
        assert_eq!(clone.exchange_calls(), 1);
    }
}
