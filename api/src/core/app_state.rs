//! Shared state for all HTTP handlers.
//!
//! Everything in here is read-only for the process lifetime: the cat table,
//! the file paths, and the provider client. Handlers receive it behind an
//! `Arc` and hold no other shared state, so no locking is needed.

use std::path::PathBuf;

use ai_llm_service::{GeminiService, LlmClient, LlmModelConfig};

use crate::core::catalog::CatCatalog;
use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fixed table of known cats and their images.
    pub catalog: CatCatalog,
    /// Fact sheet about all cats, attached to every model request.
    pub reference_doc: PathBuf,
    /// Directory holding the static entry page.
    pub public_dir: PathBuf,
    /// Upstream model client.
    pub llm: LlmClient,
}

impl AppState {
    /// Explicit constructor; tests inject substitute tables and a scripted
    /// provider through this.
    pub fn new(
        catalog: CatCatalog,
        reference_doc: PathBuf,
        public_dir: PathBuf,
        llm: LlmClient,
    ) -> Self {
        Self {
            catalog,
            reference_doc,
            public_dir,
            llm,
        }
    }

    /// Load shared state from environment variables.
    ///
    /// Requires `GEMINI_API_KEY`; everything else has defaults
    /// (`CATS_DOC_PATH`, `CATS_IMAGE_DIR`, `PUBLIC_DIR`, plus the provider
    /// variables read by [`LlmModelConfig::from_env`]).
    pub fn from_env() -> AppResult<Self> {
        let cfg = LlmModelConfig::from_env()?;
        let llm = LlmClient::Gemini(GeminiService::new(cfg)?);

        let reference_doc =
            PathBuf::from(std::env::var("CATS_DOC_PATH").unwrap_or_else(|_| "data/cats.txt".into()));
        let image_dir =
            PathBuf::from(std::env::var("CATS_IMAGE_DIR").unwrap_or_else(|_| "images".into()));
        let public_dir =
            PathBuf::from(std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".into()));

        Ok(Self {
            catalog: CatCatalog::default_cats(&image_dir),
            reference_doc,
            public_dir,
            llm,
        })
    }
}
