//! HTTP route handlers and server wiring.

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::{MemoryRepository, RepositoryRef, Task, TaskService, TaskStatus};

use super::tasks;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub service: TaskService,
}

impl AppState {
    pub fn new(config: Config, service: TaskService) -> Self {
        Self { config, service }
    }
}

/// Start the HTTP server.
///
/// Composition root: builds the repository, seeds it when configured, wires
/// the service and router, then serves until a shutdown signal arrives.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let repo: RepositoryRef = Arc::new(MemoryRepository::new());

    if config.seed_data {
        seed(&repo).await?;
        tracing::info!("Seed data loaded");
    }

    let service = TaskService::new(Arc::clone(&repo));
    let state = Arc::new(AppState::new(config.clone(), service));

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the application router. Separate from [`serve`] so tests can stand
/// up isolated instances against their own repository.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Insert the fixed sample tasks. Goes straight to the repository so the
/// seeded statuses survive (the service would force `Pending`).
async fn seed(repo: &RepositoryRef) -> anyhow::Result<()> {
    repo.create(Task::new(
        "Buy groceries",
        "Milk, eggs, bread",
        TaskStatus::Pending,
    ))
    .await?;
    repo.create(Task::new(
        "Deploy release",
        "Deploy v1.2 to staging",
        TaskStatus::InProgress,
    ))
    .await?;
    repo.create(Task::new(
        "Retro meeting",
        "Sprint retro",
        TaskStatus::Completed,
    ))
    .await?;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
