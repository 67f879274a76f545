use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use shared::constants::{
    API_PREFIX, CATALOG_ENDPOINT, HEALTH_ENDPOINT, USERS_ENDPOINT, USER_ID_HEADER, WHEEL_PREFIX,
};
use shared::{InMemoryRecipeStore, RecipeStore};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::routes::wheel::create_router as create_wheel_router;
use crate::services::{PgRecipeStore, SpinSessions};

mod config;
mod error;
mod handlers;
mod identity;
mod logging;
mod routes;
mod services;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub sessions: SpinSessions,
}

pub fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(vec![
            HeaderName::from_static("content-type"),
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    match origin {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(USERS_ENDPOINT, post(handlers::provision_user))
        .route(CATALOG_ENDPOINT, get(handlers::list_catalog))
        .nest(WHEEL_PREFIX, create_wheel_router());

    Router::new()
        .route(HEALTH_ENDPOINT, get(handlers::health_check))
        .nest(API_PREFIX, api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn open_store(config: &Config) -> Result<Arc<dyn RecipeStore>, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPool::connect(url).await?;
            let store = PgRecipeStore::new(pool);
            store.migrate().await?;
            info!("Using PostgreSQL recipe store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL is not set; recipes are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryRecipeStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::setup();

    let config = Config::from_env()?;
    let state = AppState {
        store: open_store(&config).await?,
        sessions: SpinSessions::new(config.spin_window, config.session_idle_timeout),
    };

    let app = app(state, cors_layer(config.cors_origin.clone()));

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
