pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod render;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::PgSubmissionStore;
use crate::email::{EnquiryMailer, SystemMailer};
use crate::render::ChromePdfRenderer;
use crate::state::{AppState, SharedState};

/// Wire the production collaborators: Postgres store, Chromium renderer,
/// and the SMTP mailer when credentials are configured.
pub fn build_state(pool: PgPool, config: Config) -> SharedState {
    let mailer = config
        .smtp
        .as_ref()
        .and_then(|smtp| match SystemMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Some(Arc::new(mailer) as Arc<dyn EnquiryMailer>)
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                None
            }
        });

    let renderer = Arc::new(ChromePdfRenderer::new(
        config.chrome_executable.clone(),
        config.render_timeout(),
    ));

    Arc::new(AppState {
        store: Arc::new(PgSubmissionStore::new(pool)),
        renderer,
        mailer,
        config,
    })
}

pub fn build_app(state: SharedState) -> Router {
    // Listed origins are mirrored back; anything else gets no allow header.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config.allowed_origin.clone()]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Security headers
    Router::new()
        .merge(routes::api_routes())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
