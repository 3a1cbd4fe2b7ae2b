//! Shared LLM service crate.
//!
//! Exposes a thin, typed client layer over the Gemini `generateContent` REST
//! API (buffered and streaming), plus a deterministic scripted provider for
//! tests and keyless local development. Providers are dispatched through the
//! [`services::LlmClient`] enum; there are no trait objects and no retries.

pub mod config;
pub mod error_handler;
pub mod services;
pub mod types;

pub use config::llm_model_config::LlmModelConfig;
pub use error_handler::{LlmError, Result};
pub use services::{GeminiService, GenerateRequest, LlmClient, ScriptedService, TextStream};
pub use types::{Content, InlineData, Part};
