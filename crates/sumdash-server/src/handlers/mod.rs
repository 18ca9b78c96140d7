//! HTTP route handlers for the dashboard server.

pub mod api;
pub mod pages;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
