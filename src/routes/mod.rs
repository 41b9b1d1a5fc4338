pub mod form;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/test", get(welcome))
        .route("/api/form/submit", post(form::submit))
}

async fn welcome() -> &'static str {
    "Welcome to the UKTOURISM"
}
