//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::form: the transaction form page, its HTMX fragments and JSON API

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use txanalyzer_config::Config;
use txanalyzer_core::FormController;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub form: FormController,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::form::{
        api_form, api_form_field, api_form_submit, api_service_health,
        htmx_field_change, htmx_result, htmx_service_status, htmx_submit, page_form,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/form", get(api_form))
        .route("/api/form/field", post(api_form_field))
        .route("/api/form/submit", post(api_form_submit))
        .route("/api/service-health", get(api_service_health))
        // HTMX page routes
        .route("/", get(page_form))
        // HTMX partial routes
        .route("/form/field", post(htmx_field_change))
        .route("/form/submit", post(htmx_submit))
        .route("/form/result", get(htmx_result))
        .route("/form/service-status", get(htmx_service_status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Transaction Analyzer</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    let main = format!(
        r#"<main class='max-w-5xl mx-auto px-6 py-10'>{}</main>"#,
        inner_content
    );
    if is_htmx_request(headers) {
        main
    } else {
        base_html(title, &main)
    }
}

/// Parse an `application/x-www-form-urlencoded` body into ordered pairs
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    fn decode(raw: &str) -> String {
        let spaced = raw.replace('+', " ");
        let decoded = match urlencoding::decode(&spaced) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => spaced.clone(),
        };
        decoded
    }

    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// Resolves when the process receives Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves the form until Ctrl-C.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `form` - The shared form controller
pub async fn start_server(config: Config, form: FormController) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let endpoint = config.analysis.endpoint_url();
    let state = AppState { form, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Transaction Analyzer on http://{}", addr);
    log::info!("Submissions go to {}", endpoint);
    log::info!("Available routes:");
    log::info!("  - / (Transaction form)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}
