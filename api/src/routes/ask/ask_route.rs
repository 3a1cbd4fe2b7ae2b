//! POST /ask — buffered question answering with JSON extraction.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use ai_llm_service::{GenerateRequest, Part};

use crate::{
    core::{
        app_state::AppState,
        attachment::{load_inline_part, load_reference_part},
        extract::{ExtractError, extract_json_object},
        prompt,
    },
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, CatAnswer},
};

/// Validates the question and assembles the per-request prompt: target cat
/// (first name in table order found in the question), reference document,
/// optional image attachment.
///
/// Returns the target cat's name (for role-play framing) and the ordered
/// user parts. Shared by the buffered and streaming routes.
pub(crate) async fn resolve_prompt(
    state: &AppState,
    question: &str,
) -> AppResult<(Option<String>, Vec<Part>)> {
    let target = state.catalog.find_target(question);

    let reference = load_reference_part(&state.reference_doc)
        .await
        .map_err(|source| AppError::Resource {
            path: state.reference_doc.clone(),
            source,
        })?;

    let image = match target {
        Some(cat) => Some(load_inline_part(&cat.image).await.map_err(|source| {
            AppError::Resource {
                path: cat.image.clone(),
                source,
            }
        })?),
        None => None,
    };

    let parts = prompt::build_parts(reference, image, question);
    Ok((target.map(|c| c.name.clone()), parts))
}

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"What does tama like to eat?"}'
/// ```
///
/// On success the body is the exact JSON object the model produced
/// (`{"displayText": ..., "speechText": ...}`), not a re-serialization.
pub async fn ask(
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
        system: Some(prompt::answer_system(target.as_deref())),
        parts,
        json_output: true,
    };
    let raw = state.llm.generate(&req).await?;

    let span = extract_json_object(&raw)?;
    // Both fields must be present; a JSON object of the wrong shape is the
    // same malformed-output class as unparsable JSON.
    let _answer: CatAnswer =
        serde_json::from_str(span).map_err(|e| AppError::ModelOutput(ExtractError::Invalid(e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        span.to_owned(),
    )
        .into_response())
}
