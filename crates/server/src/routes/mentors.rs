use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::mentor;
use service::mentor_service::{self, NewMentor, UpdateMentor};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[utoipa::path(post, path = "/api/mentor/create", tag = "mentor",
    request_body = crate::openapi::NewMentorRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Admin only")
    ))]
pub async fn create_mentor(
    State(state): State<ServerState>,
    Json(input): Json<NewMentor>,
) -> Result<(StatusCode, Json<mentor::Model>), JsonApiError> {
    let created = mentor_service::create_mentor(&state.db, input).await?;
    info!(id = %created.id, "created mentor");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/mentor", tag = "mentor",
    responses((status = 200, description = "All mentors, newest first")))]
pub async fn list_mentors(
    State(state): State<ServerState>,
) -> Result<Json<Vec<mentor::Model>>, JsonApiError> {
    let rows = mentor_service::list_mentors(&state.db).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/mentor/search", tag = "mentor",
    responses(
        (status = 200, description = "Matching mentors"),
        (status = 400, description = "Missing keyword")
    ))]
pub async fn search_mentors(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<mentor::Model>>, JsonApiError> {
    let Some(keyword) = query.q.filter(|q| !q.trim().is_empty()) else {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "missing search keyword", None));
    };
    let rows = mentor_service::search_mentors(&state.db, keyword.trim()).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/mentor/{id}", tag = "mentor",
    params(("id" = String, Path, description = "Mentor ID")),
    responses(
        (status = 200, description = "Mentor"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get_mentor(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<mentor::Model>, JsonApiError> {
    match mentor_service::get_mentor(&state.db, &id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "mentor not found", None)),
    }
}

#[utoipa::path(put, path = "/api/mentor/{id}", tag = "mentor",
    params(("id" = String, Path, description = "Mentor ID")),
    responses(
        (status = 200, description = "Updated"),
        (status = 404, description = "Not Found")
    ))]
pub async fn update_mentor(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(changes): Json<UpdateMentor>,
) -> Result<Json<Value>, JsonApiError> {
    let updated = mentor_service::update_mentor(&state.db, &id, changes).await?;
    if !updated {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "mentor not found", None));
    }
    info!(id = %id, "updated mentor");
    Ok(Json(json!({ "message": "updated" })))
}

#[utoipa::path(delete, path = "/api/mentor/{id}", tag = "mentor",
    params(("id" = String, Path, description = "Mentor ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found")
    ))]
pub async fn delete_mentor(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let deleted = mentor_service::delete_mentor(&state.db, &id).await?;
    if !deleted {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "mentor not found", None));
    }
    info!(id = %id, "deleted mentor");
    Ok(Json(json!({ "message": "deleted" })))
}
