use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::auth::{AuthUser, ServerState};
use models::user;
use service::user_service::{self, NewUser, UpdateUser};

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub uid: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarInput {
    pub avatar: Option<String>,
}

/// Create the profile row for an account the provider already issued.
#[utoipa::path(post, path = "/api/user/register", tag = "user",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 201, description = "Registered"),
        (status = 400, description = "Missing uid/username or invalid role"),
        (status = 409, description = "User already exists")
    ))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let (Some(uid), Some(username)) = (input.uid, input.username) else {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "missing required fields",
            Some("uid and username are required".into()),
        ));
    };

    let created = user_service::register(
        &state.db,
        NewUser {
            uid,
            email: input.email,
            username,
            role: input.role,
            school: input.school,
            avatar: input.avatar,
        },
    )
    .await?;

    info!(uid = %created.uid, role = %created.role, "registered user profile");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "registered", "user": created })),
    ))
}

/// The provider has already authenticated the caller; this only returns the
/// profile row for the verified uid.
#[utoipa::path(post, path = "/api/user/login", tag = "user",
    responses(
        (status = 200, description = "Profile found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this account yet")
    ))]
pub async fn login(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, JsonApiError> {
    match user_service::get_user(&state.db, &auth.uid).await? {
        Some(found) => Ok(Json(json!({ "message": "login successful", "user": found }))),
        None => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "user profile not found",
            Some("call /api/user/register to create a profile".into()),
        )),
    }
}

#[utoipa::path(get, path = "/api/user", tag = "user",
    responses(
        (status = 200, description = "All users"),
        (status = 403, description = "Admin only")
    ))]
pub async fn list_users(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = user_service::list_users(&state.db).await?;
    Ok(Json(json!({ "count": rows.len(), "users": rows })))
}

pub async fn list_students(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = user_service::list_by_role(&state.db, user::ROLE_STUDENT).await?;
    Ok(Json(json!({ "count": rows.len(), "students": rows })))
}

pub async fn list_admins(State(state): State<ServerState>) -> Result<Json<Value>, JsonApiError> {
    let rows = user_service::list_by_role(&state.db, user::ROLE_ADMIN).await?;
    Ok(Json(json!({ "count": rows.len(), "admins": rows })))
}

/// Users see themselves; admins see everyone.
#[utoipa::path(get, path = "/api/user/{uid}", tag = "user",
    params(("uid" = String, Path, description = "Firebase UID")),
    responses(
        (status = 200, description = "User"),
        (status = 403, description = "Not yours"),
        (status = 404, description = "Not Found")
    ))]
pub async fn get_user(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> Result<Json<user::Model>, JsonApiError> {
    if auth.uid != uid && !auth.is_admin() {
        return Err(JsonApiError::new(
            StatusCode::FORBIDDEN,
            "you cannot view this user",
            None,
        ));
    }
    match user_service::get_user(&state.db, &uid).await? {
        Some(found) => Ok(Json(found)),
        None => Err(JsonApiError::new(StatusCode::NOT_FOUND, "user not found", None)),
    }
}

#[utoipa::path(put, path = "/api/user/{uid}", tag = "user",
    params(("uid" = String, Path, description = "Firebase UID")),
    request_body = crate::openapi::UpdateUserRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid role or nothing updated"),
        (status = 403, description = "Not yours / role change denied")
    ))]
pub async fn update_user(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthUser>,
    Path(uid): Path<String>,
    Json(changes): Json<UpdateUser>,
) -> Result<Json<Value>, JsonApiError> {
    if auth.uid != uid && !auth.is_admin() {
        return Err(JsonApiError::new(
            StatusCode::FORBIDDEN,
            "you cannot update this user",
            None,
        ));
    }
    // Students cannot promote themselves
    if changes.role.is_some() && auth.uid == uid && !auth.is_admin() {
        return Err(JsonApiError::new(
            StatusCode::FORBIDDEN,
            "you cannot change your own role",
            None,
        ));
    }

    let updated = user_service::update_user(&state.db, &uid, changes).await?;
    if !updated {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "update failed, user missing or nothing to change",
            None,
        ));
    }
    info!(uid = %uid, by = %auth.uid, "updated user profile");
    Ok(Json(json!({ "message": "updated" })))
}

#[utoipa::path(delete, path = "/api/user/{uid}", tag = "user",
    params(("uid" = String, Path, description = "Firebase UID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Self-deletion refused"),
        (status = 404, description = "Not Found")
    ))]
pub async fn delete_user(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthUser>,
    Path(uid): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    if auth.uid == uid {
        return Err(JsonApiError::new(
            StatusCode::BAD_REQUEST,
            "you cannot delete yourself",
            None,
        ));
    }
    let deleted = user_service::delete_user(&state.db, &uid).await?;
    if !deleted {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "user not found", None));
    }
    info!(uid = %uid, by = %auth.uid, "deleted user");
    Ok(Json(json!({ "message": "user deleted" })))
}

#[utoipa::path(patch, path = "/api/user/{uid}/avatar", tag = "user",
    params(("uid" = String, Path, description = "Firebase UID")),
    responses(
        (status = 200, description = "Avatar updated"),
        (status = 400, description = "Missing avatar url"),
        (status = 403, description = "Not yours"),
        (status = 404, description = "Not Found")
    ))]
pub async fn update_avatar(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthUser>,
    Path(uid): Path<String>,
    Json(input): Json<AvatarInput>,
) -> Result<Json<Value>, JsonApiError> {
    let Some(avatar) = input.avatar.filter(|a| !a.trim().is_empty()) else {
        return Err(JsonApiError::new(StatusCode::BAD_REQUEST, "missing avatar url", None));
    };
    if auth.uid != uid && !auth.is_admin() {
        return Err(JsonApiError::new(
            StatusCode::FORBIDDEN,
            "you cannot update this user's avatar",
            None,
        ));
    }
    let updated = user_service::update_avatar(&state.db, &uid, &avatar).await?;
    if !updated {
        return Err(JsonApiError::new(StatusCode::NOT_FOUND, "user not found", None));
    }
    Ok(Json(json!({ "message": "avatar updated", "avatar": avatar })))
}
