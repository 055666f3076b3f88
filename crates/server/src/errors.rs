use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// JSON error response: `{"message": ..., "detail": ...?}` with a status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!(err = %err, "internal server error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "message": self.message });
        if let Some(detail) = self.detail {
            body["detail"] = serde_json::Value::String(detail);
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg, None),
            ServiceError::Model(m) => Self::new(StatusCode::BAD_REQUEST, m.to_string(), None),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg, None),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, msg, None),
            ServiceError::Db(msg) => {
                error!(err = %msg, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error", None)
            }
            ServiceError::Upstream(msg) => {
                error!(err = %msg, "upstream error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "chatbot not responding", Some(msg))
            }
        }
    }
}
