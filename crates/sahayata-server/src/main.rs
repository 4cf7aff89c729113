use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use sahayata_api::auth::{self, AppState, AppStateInner};
use sahayata_api::middleware::require_auth;
use sahayata_api::{admin, requests};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sahayata=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("SAHAYATA_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("SAHAYATA_DB_PATH").unwrap_or_else(|_| "sahayata.db".into());
    let host = std::env::var("SAHAYATA_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("SAHAYATA_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = sahayata_db::Database::open(&PathBuf::from(&db_path))?;

    // Shared state
    let app_state: AppState = Arc::new(AppStateInner { db, jwt_secret });

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/requests/{id}", get(requests::track))
        .with_state(app_state.clone());

    let protected_routes = Router::new()
        .route("/profile", get(auth::me))
        .route("/requests", post(requests::submit))
        .route("/requests/mine", get(requests::list_mine))
        .route("/admin/exists", get(admin::admin_exists))
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{user_id}/promote", post(admin::promote))
        .route("/admin/users/{user_id}/demote", post(admin::demote))
        .route("/admin/requests", get(requests::list_all))
        .route("/admin/requests/{id}", patch(requests::update))
        .route("/admin/stats", get(requests::stats))
        .layer(middleware::from_fn(require_auth))
        .with_state(app_state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Sahayata server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
