//! Provider facade w/o async-trait or dynamic trait objects.
//!
//! We expose an enum `LlmClient` with concrete implementations per provider.
//! This keeps async fns simple and avoids boxing futures.

pub mod gemini_service;
pub mod scripted_service;
pub mod sse;

use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::error_handler::Result;
use crate::types::Part;

pub use gemini_service::GeminiService;
pub use scripted_service::ScriptedService;

/// Ordered stream of answer fragments; an `Err` item means the upstream
/// stream broke after generation started.
pub type TextStream = UnboundedReceiverStream<Result<String>>;

/// Provider-neutral invocation built by callers.
///
/// `parts` keep their order on the wire; `json_output` asks the model for a
/// structured JSON answer (best effort, callers still validate).
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Optional system-level instruction block.
    pub system: Option<String>,
    /// Ordered user content parts (text and/or inline attachments).
    pub parts: Vec<Part>,
    /// Request structured (JSON) output from the model.
    pub json_output: bool,
}

/// Concrete provider client (enum-dispatch).
#[derive(Debug, Clone)]
pub enum LlmClient {
    /// Hosted Gemini REST API.
    Gemini(GeminiService),
    /// Deterministic canned provider for tests and keyless local runs.
    Scripted(ScriptedService),
}

impl LlmClient {
    /// Buffered generation: the full answer is awaited before returning.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<String> {
        match self {
            Self::Gemini(c) => c.generate(req).await,
            Self::Scripted(c) => c.generate(req).await,
        }
    }

    /// Streaming generation: fragments are yielded in upstream arrival
    /// order. Errors before the upstream response is established surface
    /// here; later failures surface as an `Err` item in the stream.
    pub async fn generate_stream(&self, req: &GenerateRequest) -> Result<TextStream> {
        match self {
            Self::Gemini(c) => c.generate_stream(req).await,
            Self::Scripted(c) => c.generate_stream(req).await,
        }
    }
}
