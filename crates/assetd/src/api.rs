//! HTTP surface of assetd.
//!
//! One write route, `POST /api/assets`, plus the form page and a liveness
//! check. Every response is marked uncacheable.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::asset::NewAsset;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::form;
use crate::locale::Locale;
use crate::storage::{self, ConnectionSettings};

/// Process-wide state shared by all requests. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where each request connects to.
    pub settings: ConnectionSettings,
    /// Language of response messages.
    pub locale: Locale,
}

impl AppState {
    /// Build state from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            settings: ConnectionSettings::from_config(config),
            locale: config.locale(),
        }
    }
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    /// Localized confirmation.
    pub message: String,
}

/// Body of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Localized or extractor-provided failure text.
    pub error: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/health", get(health))
        .route("/api/assets", post(create_asset))
        .with_state(Arc::new(state))
        .layer(middleware::map_response(no_cache))
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    if !state.settings.path.exists() {
        warn!(
            "Database {} does not exist; inserts will fail until `assetd schema init` is run",
            state.settings.path.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::ServerBind { addr, source })?;

    info!(
        "assetd listening on {} (database {})",
        listener.local_addr()?,
        state.settings.path.display()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("assetd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn create_asset(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewAsset>, JsonRejection>,
) -> Response {
    let Json(asset) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected asset body: {}", rejection.body_text());
            let body = ErrorBody {
                error: rejection.body_text(),
            };
            return (rejection.status(), Json(body)).into_response();
        }
    };

    match storage::insert_asset(&state.settings, asset).await {
        Ok(id) => {
            debug!("Stored asset {}", id);
            let body = MessageBody {
                message: state.locale.asset_created().to_string(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to insert asset: {}", e);
            let body = ErrorBody {
                error: state.locale.asset_failed().to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn form_page(State(state): State<Arc<AppState>>) -> Response {
    match form::render(state.locale) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render form page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn no_cache(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    response
}
