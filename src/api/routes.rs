use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    matches::{create_match, delete_match, list_matches},
    stats::get_stats,
    AppState,
};
use crate::store::MatchStore;

pub fn create_router<S: MatchStore>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/stats", get(get_stats::<S>))
        .route("/api/matches", get(list_matches::<S>).post(create_match::<S>))
        .route("/api/matches/:id", delete(delete_match::<S>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::session::LiveStatsSession;
    use crate::store::SqliteMatchStore;

    async fn app(dir: &TempDir) -> (Router, Arc<AppState<SqliteMatchStore>>) {
        let mut config = AppConfig::new();
        config.store.database_path = dir.path().join("journal.db").to_string_lossy().to_string();

        let store = Arc::new(SqliteMatchStore::open(&config.store).unwrap());
        let session = LiveStatsSession::spawn(store, config.session.clone());
        session.wait_ready().await.unwrap();

        let state = Arc::new(AppState { session, config });
        (create_router(Arc::clone(&state)), state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_match(body: Value) -> Request<Body> {
        Request::post("/api/matches")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn delete_request(id: &str) -> Request<Body> {
        Request::delete(format!("/api/matches/{id}"))
            .body(Body::empty())
            .unwrap()
    }

    fn days_ago(days: i64) -> String {
        (Utc::now() - Duration::days(days))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn competitive_win(date: String) -> Value {
        json!({
            "date": date,
            "matchType": "competitive",
            "matchFormat": "1v1",
            "player1": "Manoj",
            "player2": "ignored in singles",
            "result": "win",
            "duration": "90 min",
            "venue": "PadelCity Leipzig"
        })
    }

    #[tokio::test]
    async fn test_empty_stats() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _state) = app(&dir).await;

        let (status, body) = send(&app, get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phase"], "ready");
        assert_eq!(body["dashboard"]["totalMatches"], 0);
        assert_eq!(body["dashboard"]["winRatePercent"], 0);
        assert_eq!(body["dashboard"]["formattedDuration"], "0 mins");
        assert_eq!(body["dashboard"]["charts"]["matchData"].as_array().unwrap().len(), 12);
        assert_eq!(body["recentMatches"], json!([]));
        assert_eq!(body["lastError"], Value::Null);
    }

    #[tokio::test]
    async fn test_create_match_updates_stats() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = app(&dir).await;

        let (status, created) = send(&app, post_match(competitive_win(days_ago(0)))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["result"], "win");
        assert_eq!(created["matchFormat"], "1v1");
        assert_eq!(created["player2"], Value::Null);

        state.session.refresh().await.unwrap();

        let (status, matches) = send(&app, get("/api/matches")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(matches.as_array().unwrap().len(), 1);
        assert_eq!(matches[0]["id"], created["id"]);

        let (_, stats) = send(&app, get("/api/stats")).await;
        assert_eq!(stats["dashboard"]["totalMatches"], 1);
        assert_eq!(stats["dashboard"]["totalDurationMinutes"], 90);
        assert_eq!(stats["dashboard"]["winRatePercent"], 100);
        assert_eq!(stats["recentMatches"][0]["venue"], "PadelCity Leipzig");
    }

    #[tokio::test]
    async fn test_invalid_match_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _state) = app(&dir).await;

        let mut draft = competitive_win(days_ago(0));
        draft["duration"] = json!("30");

        let (status, body) = send(&app, post_match(draft)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Duration must be at least 60 minutes");

        let (_, matches) = send(&app, get("/api/matches")).await;
        assert_eq!(matches, json!([]));
    }

    #[tokio::test]
    async fn test_delete_is_gated_on_recency() {
        let dir = tempfile::tempdir().unwrap();
        let (app, state) = app(&dir).await;

        let (_, older) = send(&app, post_match(competitive_win(days_ago(5)))).await;
        let (_, newer) = send(&app, post_match(competitive_win(days_ago(0)))).await;
        state.session.refresh().await.unwrap();

        let older_id = older["id"].as_str().unwrap();
        let newer_id = newer["id"].as_str().unwrap();

        let (status, _) = send(&app, delete_request(older_id)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, delete_request("999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, delete_request(newer_id)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        state.session.refresh().await.unwrap();
        let (_, matches) = send(&app, get("/api/matches")).await;
        assert_eq!(matches.as_array().unwrap().len(), 1);
        assert_eq!(matches[0]["id"], older["id"]);
    }
}
