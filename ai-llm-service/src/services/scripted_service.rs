//! Deterministic offline provider.
//!
//! Returns a canned reply (or canned chunk sequence) without touching the
//! network. Handlers are tested against this provider; it also lets the
//! backend run locally without an API key. Invocations are counted and the
//! last request is recorded so tests can assert on prompt contents.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::error_handler::{LlmError, Result};
use crate::services::{GenerateRequest, TextStream};

/// Canned provider with shared counters (cheap to clone).
#[derive(Debug, Clone)]
pub struct ScriptedService {
    reply: String,
    chunks: Vec<String>,
    fail_after: Option<usize>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<GenerateRequest>>>,
}

impl ScriptedService {
    /// Provider whose buffered answer is always `reply`; the streaming
    /// answer is the same text in a single chunk.
    pub fn new(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self {
            chunks: vec![reply.clone()],
            reply,
            fail_after: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Overrides the streamed chunk sequence.
    pub fn with_chunks(mut self, chunks: Vec<String>) -> Self {
        self.chunks = chunks;
        self
    }

    /// Makes the streamed answer break after `after` chunks: the stream
    /// yields an `Err` item in place of the next chunk and ends. Chunks
    /// beyond the break point are never delivered.
    pub fn with_stream_failure(mut self, after: usize) -> Self {
        self.fail_after = Some(after);
        self
    }

    /// Number of generate/generate_stream invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clone of the most recent request, if any.
    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().expect("lock poisoned").clone()
    }

    fn record(&self, req: &GenerateRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("lock poisoned") = Some(req.clone());
    }

    /// Buffered generation; always succeeds with the canned reply.
    pub async fn generate(&self, req: &GenerateRequest) -> Result<String> {
        self.record(req);
        Ok(self.reply.clone())
    }

    /// Streaming generation; yields the canned chunks in order, then ends
    /// (or breaks with an `Err` item when a failure point is scripted).
    pub async fn generate_stream(&self, req: &GenerateRequest) -> Result<TextStream> {
        self.record(req);
        let (tx, rx) = mpsc::unbounded_channel();
        for (i, chunk) in self.chunks.iter().enumerate() {
            if self.fail_after == Some(i) {
                break;
            }
            let _ = tx.send(Ok(chunk.clone()));
        }
        if self.fail_after.is_some() {
            let _ = tx.send(Err(LlmError::StreamInterrupted(
                "scripted stream break".into(),
            )));
        }
        drop(tx);
        Ok(UnboundedReceiverStream::new(rx))
    }
}
