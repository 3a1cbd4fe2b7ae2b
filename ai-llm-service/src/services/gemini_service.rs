//! Thin client for the hosted Gemini REST API.
//!
//! Two call shapes over the same request body:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent` — buffered text
//! - `POST {endpoint}/v1beta/models/{model}:streamGenerateContent?alt=sse`
//!   — incremental fragments relayed in arrival order
//!
//! The API key travels in the `x-goog-api-key` header. No retries: a failed
//! call surfaces immediately to the caller.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, instrument, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::error_handler::{ConfigError, LlmError, Result, make_snippet, validate_http_endpoint};
use crate::services::sse::SseLineBuffer;
use crate::services::{GenerateRequest, TextStream};
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};

/// Thin client for Gemini.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with a
/// configurable timeout. Provides:
/// - [`GeminiService::generate`]        — buffered generation
/// - [`GeminiService::generate_stream`] — incremental generation
#[derive(Debug, Clone)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_stream: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] if `cfg.model` is blank
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is blank
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not http(s)
    /// - [`LlmError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        if cfg.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        validate_http_endpoint("GEMINI_API_BASE", cfg.endpoint.trim())?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);
        let url_stream = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            base, cfg.model
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_stream,
        })
    }

    fn build_body(&self, req: &GenerateRequest) -> GenerateContentRequest {
        let generation_config = GenerationConfig {
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
            max_output_tokens: self.cfg.max_tokens,
            response_mime_type: req.json_output.then(|| "application/json".to_string()),
        };

        GenerateContentRequest {
            contents: vec![Content::user(req.parts.clone())],
            system_instruction: req.system.as_deref().map(Content::text),
            generation_config: Some(generation_config),
        }
    }

    /// Performs a buffered generation request via `:generateContent`.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::Transport`] for client errors
    /// - [`LlmError::Decode`] if the response cannot be parsed
    /// - [`LlmError::EmptyCandidates`] if no candidate text came back
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, req: &GenerateRequest) -> Result<String> {
        let body = self.build_body(req);

        debug!(parts = req.parts.len(), json = req.json_output, "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("serde error: {e}")))?;

        out.first_text().ok_or(LlmError::EmptyCandidates)
    }

    /// Performs a streaming generation request via `:streamGenerateContent`.
    ///
    /// The returned stream yields candidate text fragments strictly in the
    /// order the model emits them. An error that happens before the upstream
    /// response status is known is returned from this call; a break after
    /// that arrives as an `Err` item in the stream.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::Transport`] for connection failures
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate_stream(&self, req: &GenerateRequest) -> Result<TextStream> {
        let body = self.build_body(req);

        debug!(parts = req.parts.len(), "POST {}", self.url_stream);
        let resp = self
            .client
            .post(&self.url_stream)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_stream.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let mut bytes = resp.bytes_stream();

        tokio::spawn(async move {
            let mut lines = SseLineBuffer::new();
            while let Some(next) = bytes.next().await {
                let chunk = match next {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(error = %e, "upstream stream broke mid-generation");
                        let _ = tx.send(Err(LlmError::StreamInterrupted(e.to_string())));
                        return;
                    }
                };

                for payload in lines.push(&chunk) {
                    let frame: GenerateContentResponse = match serde_json::from_str(&payload) {
                        Ok(f) => f,
                        Err(e) => {
                            let _ = tx.send(Err(LlmError::Decode(format!(
                                "bad stream frame: {e}"
                            ))));
                            return;
                        }
                    };
                    if let Some(text) = frame.first_text() {
                        // Receiver gone means the client disconnected.
                        if tx.send(Ok(text)).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok(UnboundedReceiverStream::new(rx))
    }
}
