pub mod auth;
pub mod handlers;

use axum::{
    routing::put,
    Router,
    middleware,
};
use crate::http::AppState;
use self::handlers::*;
use self::auth::admin_auth_middleware;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/servers/{name}/enable", put(put_enable))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
