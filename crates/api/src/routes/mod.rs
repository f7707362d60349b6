//! HTTP Routes

pub mod health;
pub mod predict;

use axum::response::Html;

use crate::pages::landing_page;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(landing_page())
}

/// GET /crash, fails on purpose to exercise the panic handler
pub async fn crash() -> Html<&'static str> {
    panic!("deliberate failure requested via /crash")
}
