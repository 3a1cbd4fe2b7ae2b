//! POST /ask/stream — raw passthrough of the model's answer fragments.
//!
//! Chunks are written to the client in upstream arrival order with no
//! buffering. An upstream failure before the first byte maps to a normal
//! JSON error response; a failure after streaming began only terminates the
//! connection — bytes already sent are not retracted or annotated.

use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::Response,
};
use futures::StreamExt;

use ai_llm_service::GenerateRequest;

use crate::{
    core::{app_state::AppState, prompt},
    error_handler::AppError,
    routes::ask::{ask_request::AskRequest, ask_route::resolve_prompt},
};

/// Handler: POST /ask/stream
///
/// # Example
/// ```bash
/// curl -N -X POST http://127.0.0.1:3000/ask/stream \
///   -H 'content-type: application/json' \
///   -d '{"question":"Tell me about mike"}'
/// ```
pub async fn ask_stream(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = payload?;
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::MissingQuestion);
    }

    let (target, parts) = resolve_prompt(&state, question).await?;

    let req = GenerateRequest {
        system: Some(prompt::stream_system(target.as_deref())),
        parts,
        json_output: false,
    };

    // Errors up to here happen before any response byte, so a status code
    // can still be set. Once the stream below is handed to hyper, an Err
    // item only aborts the connection.
    let stream = state.llm.generate_stream(&req).await?;
    let stream = stream.map(|item| item.map(|text| Bytes::from(text.into_bytes())));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .expect("static response parts are valid");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::response::IntoResponse;
    use tempfile::TempDir;

    use ai_llm_service::{LlmClient, ScriptedService};

    use super::*;
    use crate::core::catalog::CatCatalog;

    fn state_for(svc: ScriptedService) -> (Arc<AppState>, ScriptedService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cats.txt"), "facts").unwrap();

        let state = AppState::new(
            CatCatalog::new(vec![]),
            dir.path().join("cats.txt"),
            dir.path().join("public"),
            LlmClient::Scripted(svc.clone()),
        );
        (Arc::new(state), svc, dir)
    }

    fn chunked_state(chunks: &[&str]) -> (Arc<AppState>, ScriptedService, TempDir) {
        let svc =
            ScriptedService::new("").with_chunks(chunks.iter().map(|c| c.to_string()).collect());
        state_for(svc)
    }

    async fn call(state: Arc<AppState>, question: &str) -> Response {
        ask_stream(
            State(state),
            Ok(Json(AskRequest {
                question: question.into(),
            })),
        )
        .await
        .into_response()
    }

    #[tokio::test]
    async fn relays_chunks_in_order_without_loss() {
        let (state, _svc, _dir) = chunked_state(&["A", "B", "C"]);

        let resp = call(state, "hello").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ABC");
    }

    #[tokio::test]
    async fn mid_stream_break_delivers_earlier_bytes_then_ends_with_error() {
        let svc = ScriptedService::new("")
            .with_chunks(vec!["A".into(), "B".into(), "C".into()])
            .with_stream_failure(2);
        let (state, _svc, _dir) = state_for(svc);

        // Headers were already sent with 200; the break can only surface as
        // a body error, never as a trailing payload.
        let resp = call(state, "hello").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let mut body = resp.into_body().into_data_stream();
        let mut got = Vec::new();
        let mut broke = false;
        while let Some(frame) = body.next().await {
            match frame {
                Ok(bytes) => got.extend_from_slice(&bytes),
                Err(_) => {
                    broke = true;
                    break;
                }
            }
        }
        assert_eq!(got, b"AB");
        assert!(broke);
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn empty_question_is_400_and_no_model_call() {
        let (state, svc, _dir) = chunked_state(&["A"]);

        let resp = call(state, "").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(svc.calls(), 0);
    }
}
