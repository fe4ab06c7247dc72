//! # Mood journal API
//!
//! Daily mood entries (date, mood color, reflection, optional image) with a
//! validated write path and a calendar heatmap read path. The `client`
//! module holds the journaling form state used by front ends.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::EntryService;
use store::{EntryStore, MemoryEntryStore, PgEntryStore};

/// Upper bound for request bodies on the entry routes. Leaves room for an
/// inline image preview of up to [`client::image::MAX_IMAGE_BYTES`].
pub const MAX_ENTRY_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub entries: EntryService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, config: Config) -> Self {
        Self {
            entries: EntryService::new(store),
            config: Arc::new(config),
        }
    }

    /// Connect the configured store, applying migrations when it is Postgres.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn EntryStore> = match &config.database_url {
            Some(url) => {
                let db = db::create_pool(url).await?;
                db::run_migrations(&db).await?;
                tracing::info!("Database migrations applied");
                Arc::new(PgEntryStore::new(db))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, entries are kept in memory only");
                Arc::new(MemoryEntryStore::new())
            }
        };
        Ok(Self::new(store, config))
    }
}

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        .route(
            "/api/entries",
            post(handlers::entries::create_entry).get(handlers::entries::list_entries),
        )
        .route("/api/entries/heatmap", get(handlers::entries::get_heatmap))
        .layer(DefaultBodyLimit::max(MAX_ENTRY_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let mut origins = vec![config.frontend_url.clone()];
    // Extra origins, e.g. testing from another device on the LAN
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        origins.extend(extra.split(',').map(|o| o.trim().to_string()));
    }

    let allowed_origins: Vec<axum::http::HeaderValue> = origins
        .iter()
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}
