use std::sync::Arc;

use anyhow::Result;
use axum::middleware;
use axum::routing::{delete, get};
use axum::Router;
use tracing::info;

use super::auth;
use super::container::Container;
use super::handlers;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub container: Arc<Container>,
}

/// Builds the full route table.
///
/// The deletion endpoints are `DELETE`-only; any other method lands in the
/// per-route fallback and gets the JSON 405 body. All `/api` routes sit
/// behind the session middleware, while `/health` stays open for probes.
///
/// Split from [`run_server`] so tests can serve it from an ephemeral
/// listener.
pub fn build_router(container: Arc<Container>) -> Router {
    let state = AppState { container };

    let api = Router::new()
        .route(
            "/api/rag-delete-document",
            delete(handlers::delete_document).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/rag-delete-folder",
            delete(handlers::delete_folder).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/rag-delete-project",
            delete(handlers::delete_project).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/rag-clear-collection",
            delete(handlers::clear_collection).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/rag-documents",
            get(handlers::list_documents).fallback(handlers::method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Binds the listener and serves the API until the process is terminated.
pub async fn run_server(container: Arc<Container>, bind: &str) -> Result<()> {
    let app = build_router(container);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("RagKeeper API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
