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
use models::opportunity;
use service::opportunity_service::{self, NewOpportunity};

#[derive(Debug, Deserialize)]
pub struct CreateManyInput {
    pub opportunities: Option<Vec<NewOpportunity>>,
}

#[utoipa::path(post, path = "/api/opportunity/create", tag = "opportunity",
    request_body = crate::openapi::NewOpportunityRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Admin only")
    ))]
pub async fn create_opportunity(
    State(state): State<ServerState>,
    Json(input): Json<NewOpportunity>,
) -> Result<(StatusCode, Json<opportunity::Model>), JsonApiError> {
    let created = opportunity_service::create_opportunity(&state.db, input).await?;
    info!(id = %created.id, kind = %created.kind, "created opportunity");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(post, path = "/api/opportunity/createMany", tag = "opportunity",
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "opportunities must be an array"),
        (status = 403, description = "Admin only")
    ))]
pub async fn create_many(
    State(state): State<ServerState>,
    Json(input): Json<CreateManyInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let Some(items) = input.opportunities else {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "opportunities must be an array",
            None,
        ));
    };
    let count = opportunity_service::create_many(&state.db, items).await?;
    info!(count, "bulk created opportunities");
    Ok((StatusCode::CREATED, Json(json!({ "success": "opportunities created" }))))
}

#[utoipa::path(get, path = "/api/opportunity", tag = "opportunity",
    responses((status = 200, description = "All opportunities, newest first")))]
pub async fn list_opportunities(
    State(state): State<ServerState>,
) -> Result<Json<Vec<opportunity::Model>>, JsonApiError> {
    let rows = opportunity_service::list_opportunities(&state.db).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/api/opportunity/{id}", tag = "opportunity",
    params(("id" = String, Path, description = "Opportunity ID")),
    responses(
        (status = 200, description = "Opportunity"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get_opportunity(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<opportunity::Model>, JsonApiError> {
    match opportunity_service::get_opportunity(&state.db, &id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "not found", None)),
    }
}

#[utoipa::path(get, path = "/api/opportunity/type/{kind}", tag = "opportunity",
    params(("kind" = String, Path, description = "scholarship | contest | event")),
    responses((status = 200, description = "Opportunities of this kind")))]
pub async fn list_by_kind(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<opportunity::Model>>, JsonApiError> {
    let rows = opportunity_service::list_by_kind(&state.db, &kind).await?;
    Ok(Json(rows))
}

#[utoipa::path(put, path = "/api/opportunity/{id}", tag = "opportunity",
    params(("id" = String, Path, description = "Opportunity ID")),
    request_body = crate::openapi::NewOpportunityRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "No row updated")
    ))]
pub async fn update_opportunity(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<NewOpportunity>,
) -> Result<Json<Value>, JsonApiError> {
    let updated = opportunity_service::update_opportunity(&state.db, &id, input).await?;
    if !updated {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "no change", None));
    }
    info!(id = %id, "updated opportunity");
    Ok(Json(json!({ "success": "updated" })))
}

#[utoipa::path(delete, path = "/api/opportunity/{id}", tag = "opportunity",
    params(("id" = String, Path, description = "Opportunity ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "No row deleted")
    ))]
pub async fn delete_opportunity(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    let deleted = opportunity_service::delete_opportunity(&state.db, &id).await?;
    if !deleted {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "delete failed", None));
    }
    info!(id = %id, "deleted opportunity");
    Ok(Json(json!({ "success": "deleted" })))
}
