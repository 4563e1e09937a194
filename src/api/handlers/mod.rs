use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::api::models::ErrorResponse;
use crate::config::AppConfig;
use crate::errors::{DeletionError, SessionError, StoreError};
use crate::session::SessionHandle;

pub mod matches;
pub mod stats;

pub struct AppState<S> {
    pub session: SessionHandle<S>,
    pub config: AppConfig,
}

pub fn error_response(err: &SessionError) -> Response {
    let status = match err {
        SessionError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::Deletion(DeletionError::NotFound { .. })
        | SessionError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        SessionError::Deletion(_) => StatusCode::FORBIDDEN,
        SessionError::Store(StoreError::Unavailable(_)) | SessionError::Closed => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        SessionError::Store(_) | SessionError::Normalization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = ErrorResponse {
        error: err.to_string(),
    };
    (status, Json(body)).into_response()
}
