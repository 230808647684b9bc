mod client;
pub(crate) mod types;

use std::time::Duration;

use crate::error::{AiError, Result};

use client::ClaudeClient;
use types::*;

/// Extraction replies are a single JSON object; this leaves ample headroom.
const MAX_TOKENS: u32 = 4096;

// =============================================================================
// Claude
// =============================================================================

/// Single-shot Claude completions: one system prompt, one user message, text back.
#[derive(Clone)]
pub struct Claude {
    api_key: String,
    model: String,
    base_url: Option<String>,
    http: reqwest::Client,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Apply a transport-level timeout to every request. Callers that need
    /// cancellation should still race the future themselves.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(self)
    }

    fn client(&self) -> ClaudeClient {
        let client = ClaudeClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    /// Send one system + user turn at temperature 0 and return the response text.
    pub async fn chat_completion(
        &self,
        system: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .system(system)
            .message(WireMessage::user(user))
            .max_tokens(MAX_TOKENS)
            .temperature(0.0);

        let response = self.client().chat(&request).await?;

        response.text().ok_or_else(|| {
            AiError::EmptyResponse(response.stop_reason.unwrap_or_else(|| "unknown".into()))
        })
    }
}
