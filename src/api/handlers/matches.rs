use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{info, warn};
use std::sync::Arc;

use super::{error_response, AppState};
use crate::domain::MatchDraft;
use crate::errors::SessionError;
use crate::store::MatchStore;

pub async fn list_matches<S: MatchStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    let snapshot = state.session.snapshot();
    Json(snapshot.matches.to_vec())
}

pub async fn create_match<S: MatchStore>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<MatchDraft>,
) -> impl IntoResponse {
    let new_match = match draft.validate(&state.config.validation) {
        Ok(new_match) => new_match,
        Err(e) => return error_response(&SessionError::from(e)),
    };

    match state.session.record_match(new_match).await {
        Ok(record) => {
            info!("Created match {} via API", record.id);
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(e) => {
            warn!("Failed to create match: {}", e);
            error_response(&e)
        }
    }
}

pub async fn delete_match<S: MatchStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.session.delete_match(&id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!("Refused to delete match {}: {}", id, e);
            error_response(&e)
        }
    }
}
