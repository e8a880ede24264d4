use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::repos::config::Settings;

use super::error::{ApiError, ApiErrorKind};
use super::provider::{completions_url, request_headers};
use super::types::{ChatRequest, ChatResponse, ErrorResponse, Message};

pub const CONNECTION_TEST_PROMPT: &str =
    "Hello, this is a connection test. Please respond with \"Connection successful\".";

/// Outcome of [`ChatCompletionClient::test_connection`]. Failures are
/// reported here instead of returned as errors; `error_kind` keeps the
/// failure class so callers can tell a missing key from a dead network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ApiErrorKind>,
}

/// Sends conversations to an OpenAI-compatible `/chat/completions`
/// endpoint. Holds no state besides the borrowed settings and an HTTP
/// client, so one instance may serve concurrent calls.
pub struct ChatCompletionClient<'a> {
    settings: &'a Settings,
    http: reqwest::Client,
}

impl<'a> ChatCompletionClient<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_http(settings, reqwest::Client::new())
    }

    pub fn with_http(settings: &'a Settings, http: reqwest::Client) -> Self {
        ChatCompletionClient { settings, http }
    }

    pub async fn send(&self, messages: &[Message]) -> Result<String, ApiError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ApiError::MissingCredential)?;

        let endpoint = self.settings.api_endpoint.as_str();
        let chat_request = ChatRequest::new(
            &self.settings.selected_model,
            messages,
            self.settings.max_tokens,
            self.settings.temperature,
        );
        let headers = request_headers(endpoint, api_key)?;
        let url = completions_url(endpoint);

        debug!(
            "Sending {} messages to {} with model {}",
            messages.len(),
            url,
            chat_request.model,
        );

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                error!("Error sending request to LLM API: {}", e);
                ApiError::from(e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            error!("Error reading response text: {}", e);
            ApiError::from(e)
        })?;

        if !status.is_success() {
            error!("LLM API returned error status {}: {}", status, response_text);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message: error_message(status, &response_text),
            });
        }

        let chat_response = ChatResponse::from_json(&response_text).map_err(|e| {
            error!("Error parsing response JSON: {}\nRaw response: {}", e, response_text);
            ApiError::CommunicationFailure(format!("Failed to parse response JSON: {}", e))
        })?;

        if let Some(usage) = &chat_response.usage {
            debug!("Token usage: {}", usage);
        }

        chat_response
            .first_content()
            .map(str::to_string)
            .ok_or(ApiError::EmptyResponse)
    }

    pub async fn test_connection(&self) -> ConnectionReport {
        let messages = [Message::user(CONNECTION_TEST_PROMPT)];
        match self.send(&messages).await {
            Ok(_) => {
                info!("Connection test against {} succeeded", self.settings.api_endpoint);
                ConnectionReport {
                    success: true,
                    message: "Connection successful".to_string(),
                    model: Some(self.settings.selected_model.clone()),
                    error_kind: None,
                }
            }
            Err(e) => ConnectionReport {
                success: false,
                message: e.to_string(),
                model: None,
                error_kind: Some(e.kind()),
            },
        }
    }
}

/// `error.message` from a JSON error body, falling back to the status
/// reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    ErrorResponse::from_json(body)
        .ok()
        .and_then(|parsed| parsed.message().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string())
        })
}
