use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;
use models::article;
use service::article_service::{self, NewArticle};

#[derive(Debug, Deserialize)]
pub struct BulkInput {
    pub articles: Option<Vec<NewArticle>>,
}

#[utoipa::path(post, path = "/api/article/create", tag = "article",
    request_body = crate::openapi::NewArticleRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Admin only")
    ))]
pub async fn create_article(
    State(state): State<ServerState>,
    Json(input): Json<NewArticle>,
) -> Result<(StatusCode, Json<article::Model>), JsonApiError> {
    let created = article_service::create_article(&state.db, input).await?;
    info!(id = %created.id, "created article");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(post, path = "/api/article/bulk", tag = "article",
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "articles must be an array"),
        (status = 403, description = "Admin only")
    ))]
pub async fn bulk_create(
    State(state): State<ServerState>,
    Json(input): Json<BulkInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let Some(items) = input.articles else {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "articles must be an array",
            None,
        ));
    };
    let total = article_service::bulk_create(&state.db, items).await?;
    info!(total, "bulk created articles");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "articles created", "total": total })),
    ))
}

#[utoipa::path(get, path = "/api/article", tag = "article",
    responses((status = 200, description = "All articles, newest first")))]
pub async fn list_articles(
    State(state): State<ServerState>,
) -> Result<Json<Vec<article::Model>>, JsonApiError> {
    let rows = article_service::list_articles(&state.db).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/article/{id}", tag = "article",
    params(("id" = String, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get_article(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<article::Model>, JsonApiError> {
    match article_service::get_article(&state.db, &id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "article not found", None)),
    }
}

#[utoipa::path(put, path = "/api/article/{id}", tag = "article",
    params(("id" = String, Path, description = "Article ID")),
    request_body = crate::openapi::NewArticleRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No row updated")
    ))]
pub async fn update_article(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<NewArticle>,
) -> Result<Json<Value>, JsonApiError> {
    let updated = article_service::update_article(&state.db, &id, input).await?;
    if !updated {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "no change", None));
    }
    info!(id = %id, "updated article");
    Ok(Json(json!({ "message": "updated" })))
}

#[utoipa::path(delete, path = "/api/article/{id}", tag = "article",
    params(("id" = String, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Nothing deleted")
    ))]
pub async fn delete_article(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let deleted = article_service::delete_article(&state.db, &id).await?;
    if !deleted {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "delete failed", None));
    }
    info!(id = %id, "deleted article");
    Ok(Json(json!({ "message": "deleted" })))
}
