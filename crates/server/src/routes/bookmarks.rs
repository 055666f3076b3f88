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
use service::bookmark_service::{self, BookmarkAdd};

#[derive(Debug, Deserialize)]
pub struct BookmarkInput {
    pub user_uid: Option<String>,
    pub opportunity_id: Option<String>,
}

fn missing_fields() -> JsonApiError {
    JsonApiError::new(
        StatusCode::BAD_REQUEST,
        "missing user_uid or opportunity_id",
        None,
    )
}

#[utoipa::path(post, path = "/api/bookmark/add", tag = "bookmark",
    request_body = crate::openapi::BookmarkRequest,
    responses(
        (status = 201, description = "Bookmarked"),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Unknown user or opportunity"),
        (status = 409, description = "Already bookmarked")
    ))]
pub async fn add_bookmark(
    State(state): State<ServerState>,
    Json(input): Json<BookmarkInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let (Some(user_uid), Some(opportunity_id)) = (input.user_uid, input.opportunity_id) else {
        return Err(missing_fields());
    };

    match bookmark_service::add_bookmark(&state.db, &user_uid, &opportunity_id).await? {
        BookmarkAdd::Added => {
            info!(user = %user_uid, opportunity = %opportunity_id, "added bookmark");
            Ok((StatusCode::CREATED, Json(json!({ "message": "bookmarked" }))))
        }
        BookmarkAdd::UnknownUser => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "user not registered",
            None,
        )),
        BookmarkAdd::UnknownOpportunity => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "opportunity not found",
            None,
        )),
        BookmarkAdd::AlreadyBookmarked => Err(JsonApiError::new(
            StatusCode::CONFLICT,
            "opportunity already bookmarked",
            None,
        )),
    }
}

#[utoipa::path(delete, path = "/api/bookmark/remove", tag = "bookmark",
    request_body = crate::openapi::BookmarkRequest,
    responses(
        (status = 200, description = "Removed"),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Bookmark not found")
    ))]
pub async fn remove_bookmark(
    State(state): State<ServerState>,
    Json(input): Json<BookmarkInput>,
) -> Result<Json<Value>, JsonApiError> {
    let (Some(user_uid), Some(opportunity_id)) = (input.user_uid, input.opportunity_id) else {
        return Err(missing_fields());
    };

    let removed = bookmark_service::remove_bookmark(&state.db, &user_uid, &opportunity_id).await?;
    if !removed {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "bookmark not found", None));
    }
    info!(user = %user_uid, opportunity = %opportunity_id, "removed bookmark");
    Ok(Json(json!({ "message": "bookmark removed" })))
}

#[utoipa::path(get, path = "/api/bookmark/check", tag = "bookmark",
    responses(
        (status = 200, description = "Whether the opportunity is bookmarked"),
        (status = 400, description = "Missing fields")
    ))]
pub async fn check_bookmark(
    State(state): State<ServerState>,
    Query(query): Query<BookmarkInput>,
) -> Result<Json<Value>, JsonApiError> {
    let (Some(user_uid), Some(opportunity_id)) = (query.user_uid, query.opportunity_id) else {
        return Err(missing_fields());
    };

    let bookmarked = bookmark_service::is_bookmarked(&state.db, &user_uid, &opportunity_id).await?;
    Ok(Json(json!({ "bookmarked": bookmarked })))
}

#[utoipa::path(get, path = "/api/bookmark/user/{uid}", tag = "bookmark",
    params(("uid" = String, Path, description = "Firebase UID")),
    responses((status = 200, description = "Bookmarked opportunities, newest saved first")))]
pub async fn list_for_user(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let rows = bookmark_service::list_for_user(&state.db, &uid).await?;
    Ok(Json(json!({ "count": rows.len(), "bookmarks": rows })))
}
