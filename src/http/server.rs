//! HTTP server setup and handlers.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up tracing middleware
//! - Serve until the shutdown signal fires

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::admin::setup_admin_router;
use crate::config::AdminConfig;
use crate::error::SelectError;
use crate::fleet::{FleetMap, Registry};
use crate::http::request::ClientRequest;
use crate::http::response::ServerResponse;
use crate::load_balancer::Selector;
use crate::messaging::LocalBus;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub selector: Arc<Selector>,
    pub bus: LocalBus,
    pub admin_api_key: Arc<str>,
}

impl AppState {
    pub fn new(registry: Arc<Registry>, selector: Arc<Selector>, bus: LocalBus, admin: &AdminConfig) -> Self {
        Self {
            registry,
            selector,
            bus,
            admin_api_key: Arc::from(admin.api_key.as_str()),
        }
    }
}

/// HTTP front end for the selector and status queries.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState, admin: &AdminConfig) -> Self {
        Self {
            router: Self::build_router(state, admin),
        }
    }

    fn build_router(state: AppState, admin: &AdminConfig) -> Router {
        let mut router = Router::new()
            .route("/server", get(get_server).post(post_server))
            .route("/status", get(get_status))
            .route("/bus/{*topic}", post(post_bus_message))
            .with_state(state.clone());

        if admin.enabled {
            router = router.merge(setup_admin_router(state));
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn get_server(State(state): State<AppState>) -> Result<Json<ServerResponse>, SelectError> {
    let server = state.selector.pick("")?;
    Ok(Json(ServerResponse { server }))
}

async fn post_server(
    State(state): State<AppState>,
    Json(client): Json<ClientRequest>,
) -> Result<Json<ServerResponse>, SelectError> {
    let country_code = client.geo.country_code.as_str();
    tracing::info!(
        username = %client.username,
        email = %client.email,
        ip = %client.ip,
        country = %client.country,
        country_code = %country_code,
        city = %client.geo.city,
        region = %client.geo.region,
        "Client requesting server"
    );

    match state.selector.pick(country_code) {
        Ok(server) => {
            tracing::info!(
                username = %client.username,
                country_code = %country_code,
                assigned_server = %server,
                "Server assigned to client"
            );
            Ok(Json(ServerResponse { server }))
        }
        Err(e) => {
            tracing::error!(
                username = %client.username,
                country_code = %country_code,
                error = %e,
                "Failed to get server for client"
            );
            Err(e)
        }
    }
}

async fn get_status(State(state): State<AppState>) -> Json<FleetMap> {
    Json(state.registry.snapshot())
}

async fn post_bus_message(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    body: Bytes,
) -> StatusCode {
    match state.bus.inject(topic, body.to_vec()) {
        Ok(()) => StatusCode::ACCEPTED,
        Err(e) => {
            tracing::error!(error = %e, "Inbound bus unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
