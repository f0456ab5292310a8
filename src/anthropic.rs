//! Client for the Anthropic Messages API
//!
//! Sends a single user prompt with the server-side web search tool enabled
//! and returns the concatenated text of the reply. Transient failures are
//! retried by the middleware stack when `anthropic.max_retries` is above zero.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CinqueTerreConfig;
use crate::{CinqueTerreError, Result};

/// Tool type of the hosted web search
pub const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// One prompt to send
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRequest {
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
    /// Upper bound on searches the model may run; `None` leaves it to the API
    pub web_search_max_uses: Option<u32>,
}

/// Token usage reported by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// The text of a reply plus the metadata worth logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageReply {
    /// All text blocks joined in order
    pub text: String,
    pub stop_reason: Option<String>,
    pub usage: Option<Usage>,
}

/// Anything that can answer a prompt
#[async_trait]
pub trait MessageClient: Send + Sync {
    async fn complete(&self, request: &MessageRequest) -> Result<MessageReply>;
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ApiMessage<'a>; 1],
    tools: [WebSearchTool; 1],
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WebSearchTool {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<Usage>,
}

/// Reply blocks; search calls and results are skipped
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

impl<'a> ApiRequest<'a> {
    fn from_request(request: &'a MessageRequest) -> Self {
        Self {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: [ApiMessage {
                role: "user",
                content: &request.prompt,
            }],
            tools: [WebSearchTool {
                kind: WEB_SEARCH_TOOL_TYPE,
                name: "web_search",
                max_uses: request.web_search_max_uses,
            }],
        }
    }
}

impl From<ApiResponse> for MessageReply {
    fn from(response: ApiResponse) -> Self {
        let text = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<String>();
        Self {
            text,
            stop_reason: response.stop_reason,
            usage: response.usage,
        }
    }
}

/// Turn a non-success response into an error, using the API's own message
/// when the body carries one
fn error_from_response(status: u16, body: &str) -> CinqueTerreError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => CinqueTerreError::api_status(
            status,
            format!("HTTP {status} {}: {}", parsed.error.kind, parsed.error.message),
        ),
        Err(_) => CinqueTerreError::api_status(status, format!("HTTP {status}: {}", body.trim())),
    }
}

/// HTTP client for `POST /v1/messages`
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    api_version: String,
}

impl AnthropicClient {
    /// Build a client from configuration.
    ///
    /// Fails with a configuration error when no API key can be found.
    pub fn new(config: &CinqueTerreConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let settings = &config.anthropic;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(settings.timeout_seconds)))
            .user_agent(format!("cinqueterre/{}", crate::VERSION))
            .build()
            .map_err(|e| CinqueTerreError::api(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(settings.max_retries);
        let http = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        debug!(
            "Created Anthropic client for {} (timeout {}s, max retries {})",
            settings.base_url, settings.timeout_seconds, settings.max_retries
        );

        Ok(Self {
            http,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl MessageClient for AnthropicClient {
    async fn complete(&self, request: &MessageRequest) -> Result<MessageReply> {
        info!(
            "Requesting {} (max_tokens {}) with web search",
            request.model, request.max_tokens
        );
        let started = Instant::now();

        let response = self
            .http
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&ApiRequest::from_request(request))
            .send()
            .await
            .map_err(|e| CinqueTerreError::api(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CinqueTerreError::api(format!("Failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!("Messages API returned HTTP {}", status.as_u16());
            return Err(error_from_response(status.as_u16(), &body));
        }

        let parsed: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| CinqueTerreError::api(format!("Unexpected response body: {e}")))?;
        let reply = MessageReply::from(parsed);

        if reply.stop_reason.as_deref() == Some("max_tokens") {
            warn!(
                "Reply stopped at the {} token limit; the JSON may be truncated",
                request.max_tokens
            );
        }
        if let Some(usage) = reply.usage {
            debug!(
                "Usage: {} input tokens, {} output tokens",
                usage.input_tokens, usage.output_tokens
            );
        }
        info!(
            "Received {} characters in {:.1}s",
            reply.text.chars().count(),
            started.elapsed().as_secs_f64()
        );

        Ok(reply)
    }
}
