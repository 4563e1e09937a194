use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::AppState;
use crate::api::models::StatsResponse;
use crate::store::MatchStore;

pub async fn get_stats<S: MatchStore>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    let snapshot = state.session.snapshot();
    Json(StatsResponse::from_snapshot(
        &snapshot,
        state.session.settings().recent_limit,
    ))
}
