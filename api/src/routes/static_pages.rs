//! GET / and GET /favicon.ico.
//!
//! The entry page is the only static asset the backend serves itself; other
//! assets are expected to come from whatever fronts the service. The
//! favicon handler exists so browsers probing it get an empty success
//! instead of a logged 404.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
};

use crate::{core::app_state::AppState, error_handler::AppError};

/// Handler: GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let path = state.public_dir.join("index.html");
    tokio::fs::read_to_string(&path)
        .await
        .map(Html)
        .map_err(|_| AppError::NotFound)
}

/// Handler: GET /favicon.ico — empty 200.
pub async fn favicon() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use ai_llm_service::{LlmClient, ScriptedService};

    use super::*;
    use crate::core::catalog::CatCatalog;

    #[tokio::test]
    async fn serves_index_html_from_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>cats</html>").unwrap();

        let state = Arc::new(AppState::new(
            CatCatalog::new(vec![]),
            dir.path().join("cats.txt"),
            dir.path().to_path_buf(),
            LlmClient::Scripted(ScriptedService::new("")),
        ));

        let Html(page) = index(State(state)).await.unwrap();
        assert_eq!(page, "<html>cats</html>");
    }

    #[tokio::test]
    async fn missing_index_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState::new(
            CatCatalog::new(vec![]),
            dir.path().join("cats.txt"),
            dir.path().to_path_buf(),
            LlmClient::Scripted(ScriptedService::new("")),
        ));

        let resp = index(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn favicon_is_empty_success() {
        assert_eq!(favicon().await, StatusCode::OK);
    }
}
