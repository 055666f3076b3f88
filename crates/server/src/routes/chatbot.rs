use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize)]
pub struct AskInput {
    pub question: Option<String>,
}

/// Forward a question to the generative-text upstream and return its answer.
#[utoipa::path(post, path = "/api/chatbot/ask", tag = "chatbot",
    request_body = crate::openapi::AskRequest,
    responses(
        (status = 200, description = "Answer"),
        (status = 400, description = "Missing question"),
        (status = 500, description = "Chatbot not responding")
    ))]
pub async fn ask(
    State(state): State<ServerState>,
    Json(input): Json<AskInput>,
) -> Result<Json<Value>, JsonApiError> {
    let question = input.question.unwrap_or_default();
    if question.trim().is_empty() {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "missing question", None));
    }

    let answer = state.chatbot.ask(&question).await?;
    info!(len = answer.len(), "chatbot answered");
    Ok(Json(json!({ "question": question, "answer": answer })))
}
