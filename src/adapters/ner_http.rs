use crate::domain::model::{NerSettings, NerToken};
use crate::domain::ports::NerBackend;
use crate::utils::error::{Result, TripError};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// Token-classification client for an inference endpoint that returns
/// token-level pipeline output (`entity`, `score`, `index`, `word`, `start`, `end`).
pub struct HttpNerBackend {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HttpNerBackend {
    pub fn new(settings: &NerSettings) -> Self {
        Self {
            client: Client::new(),
            endpoint: settings.endpoint.clone(),
            api_token: settings.api_token.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl NerBackend for HttpNerBackend {
    async fn tag(&self, text: &str) -> Result<Vec<NerToken>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let body = InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body);

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("Making NER request to: {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("NER response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TripError::NerError {
                status: status.as_u16(),
                message,
            });
        }

        let tokens: Vec<NerToken> = response.json().await?;
        tracing::debug!("🏷️ NER returned {} tokens", tokens.len());
        Ok(tokens)
    }
}
