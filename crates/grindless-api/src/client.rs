// SPDX-FileCopyrightText: 2026 Grindless Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Grindless API.
//!
//! The client reports transport-level failures (connection errors, non-2xx
//! statuses, bodies that are not an API envelope) as errors and otherwise
//! hands the envelope back untouched. It never retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use grindless_config::model::ApiConfig;
use grindless_core::{
    AccountInfo, ApiResponse, GrindlessError, RemoteApi, SummaryKind, SummaryResult,
};

const ACCOUNT_PATH: &str = "/api/accounts/@me";
const GOOGLE_ACCESS_PATH: &str = "/api/oauth/access/google";
const SUMMARIZE_PATH: &str = "/api/services/summarize";

/// HTTP client for the Grindless API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `https://api.grindless.com`).
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GrindlessError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("grindless/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| GrindlessError::Transport {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, GrindlessError> {
        Self::new(
            config.base_url(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a prepared request and decodes the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, GrindlessError> {
        let response = request.send().await.map_err(|e| GrindlessError::Transport {
            message: format!("HTTP request to {endpoint} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(endpoint, status = %status, "API response received");

        let body = response.text().await.map_err(|e| GrindlessError::Transport {
            message: format!("failed to read response body from {endpoint}: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or(body);
            return Err(GrindlessError::Transport {
                message: format!("{endpoint} returned {status}: {detail}"),
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            GrindlessError::MalformedResponse(format!("{endpoint} returned an invalid envelope: {e}"))
        })
    }
}

#[async_trait]
impl RemoteApi for ApiClient {
    async fn get_my_info(
        &self,
        access_token: &str,
    ) -> Result<ApiResponse<AccountInfo>, GrindlessError> {
        let request = self
            .client
            .get(self.url(ACCOUNT_PATH))
            .bearer_auth(access_token);
        self.send(ACCOUNT_PATH, request).await
    }

    async fn exchange_google_code(
        &self,
        code: &str,
    ) -> Result<ApiResponse<String>, GrindlessError> {
        let request = self
            .client
            .post(self.url(GOOGLE_ACCESS_PATH))
            .form(&[("code", code)]);
        self.send(GOOGLE_ACCESS_PATH, request).await
    }

    async fn summarize(
        &self,
        access_token: &str,
        kind: SummaryKind,
        text: &str,
    ) -> Result<ApiResponse<SummaryResult>, GrindlessError> {
        let kind = kind.to_string();
        let request = self
            .client
            .post(self.url(SUMMARIZE_PATH))
            .bearer_auth(access_token)
            .form(&[("kind", kind.as_str()), ("text", text)]);
        self.send(SUMMARIZE_PATH, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn account_body() -> serde_json::Value {
        serde_json::json!({
            "success": "ok",
            "message": "Account found",
            "data": {
                "account": {
                    "id": 1,
                    "account_id": "acc_1",
                    "email": "ada@example.com",
                    "username": "ada",
                    "name": "Ada",
                    "avatar": null,
                    "flags": [],
                    "created_at": 1700000000,
                    "updated_at": 1700000000,
                    "deleted": false,
                    "deletion_requested_at": null,
                    "deletion_reason": null
                },
                "billing": { "credits": 50 }
            }
        })
    }

    fn test_client(server: &MockServer) -> ApiClient {
        ApiClient::new(format!("{}/", server.uri()), None).unwrap()
    }

    #[tokio::test]
    async fn get_my_info_sends_bearer_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/accounts/@me"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let resp = client.get_my_info("tok-123").await.unwrap();
        assert!(resp.is_ok());
        let info = resp.data.unwrap();
        assert_eq!(info.account.unwrap().id, 1);
        assert_eq!(info.billing.unwrap().credits, 50);
    }

    #[tokio::test]
    async fn error_envelope_is_returned_not_raised() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/accounts/@me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": "error",
                "message": "Invalid token",
                "data": null
            })))
            .mount(&server)
            .await;

        let resp = test_client(&server).get_my_info("bad").await.unwrap();
        assert!(!resp.is_ok());
        assert_eq!(resp.message.as_deref(), Some("Invalid token"));
    }

    #[tokio::test]
    async fn non_2xx_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/accounts/@me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "success": "error",
                "message": "Unauthorized"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = test_client(&server).get_my_info("tok").await.unwrap_err();
        assert!(err.is_transport());
        let msg = err.to_string();
        assert!(msg.contains("401") && msg.contains("Unauthorized"), "got: {msg}");
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/accounts/@me"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server).get_my_info("tok").await.unwrap_err();
        assert!(matches!(err, GrindlessError::MalformedResponse(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
        let err = client.get_my_info("tok").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn exchange_google_code_posts_form() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/oauth/access/google"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("code=4%2F0Abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": "ok",
                "message": "Logged in",
                "data": "access-token-xyz"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server).exchange_google_code("4/0Abc").await.unwrap();
        assert_eq!(resp.data.as_deref(), Some("access-token-xyz"));
    }

    #[tokio::test]
    async fn summarize_posts_kind_and_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/services/summarize"))
            .and(header("authorization", "Bearer tok"))
            .and(body_string_contains("kind=markdown_table"))
            .and(body_string_contains("text=hello+world"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": "ok",
                "message": "Summarized",
                "data": {
                    "message": "| hello |",
                    "model": "gpt-4o-mini",
                    "tokens_proccesed": 3,
                    "operation_cost_in_credits": 1,
                    "operation_cost_in_usd": 0.03,
                    "remaining_credits": 49
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .summarize("tok", SummaryKind::MarkdownTable, "hello world")
            .await
            .unwrap();
        let result = resp.data.unwrap();
        assert_eq!(result.message, "| hello |");
        assert_eq!(result.tokens_processed, 3);
        assert_eq!(result.remaining_credits, 49);
    }

    #[test]
    fn from_config_builds_base_url() {
        let config = ApiConfig {
            production: false,
            dev_api_domain: "localhost:8080".into(),
            ..ApiConfig::default()
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
