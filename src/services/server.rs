use anyhow::{Context, Result};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::AppConfig;
use crate::session::LiveStatsSession;
use crate::store::SqliteMatchStore;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let store = Arc::new(SqliteMatchStore::open(&self.config.store)?);
        let _poller = store
            .spawn_change_poller(Duration::from_millis(self.config.store.poll_interval_ms))?;

        let session = LiveStatsSession::spawn(Arc::clone(&store), self.config.session.clone());
        let state = Arc::new(AppState {
            session,
            config: self.config.clone(),
        });

        let app = create_router(Arc::clone(&state))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        match Arc::try_unwrap(state) {
            Ok(state) => state.session.shutdown().await,
            Err(_) => warn!("Server state still shared at shutdown, session left to stop on drop"),
        }
        info!("Server stopped");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
