//! Form API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_form: Current form state (JSON)
//! - api_form_field: Change one field (JSON)
//! - api_form_submit: Submit and report the outcome (JSON)
//! - api_service_health: Analysis service probe (JSON)
//! - htmx_field_change: Change field(s) from an urlencoded body
//! - htmx_submit: Submit the form, return the result region
//! - htmx_result: Result region (HTML fragment)
//! - htmx_service_status: Service badge (HTML fragment)

use axum::Json;
use serde::{Deserialize, Serialize};
use txanalyzer_core::{AnalysisResult, ErrorDetails, FormView, ServiceHealth, SubmissionFailure};

use super::page::{render_result_region, render_service_badge};
use crate::{parse_form_body, ApiError, AppState};

/// Body of `POST /api/form/field`
#[derive(Debug, Clone, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub value: String,
}

/// Body returned by `POST /api/form/submit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Get the form state (JSON API)
pub async fn api_form(state: axum::extract::State<AppState>) -> Json<FormView> {
    Json(state.form.view().await)
}

/// Change one field (JSON API)
pub async fn api_form_field(
    state: axum::extract::State<AppState>,
    Json(change): Json<FieldChange>,
) -> Result<Json<FormView>, ApiError> {
    state.form.change_field(&change.field, change.value).await?;
    Ok(Json(state.form.view().await))
}

/// Submit the current transaction (JSON API).
///
/// Always answers 200; a failed round-trip is reported in the body and the
/// previous result is returned untouched.
pub async fn api_form_submit(state: axum::extract::State<AppState>) -> Json<SubmitResponse> {
    match state.form.submit().await {
        Ok(result) => Json(SubmitResponse {
            success: true,
            result: Some(result),
            error: None,
        }),
        Err(e) => Json(SubmitResponse {
            success: false,
            result: state.form.view().await.result,
            error: Some(e.to_details()),
        }),
    }
}

/// Probe the analysis service (JSON API)
pub async fn api_service_health(state: axum::extract::State<AppState>) -> Json<ServiceHealth> {
    Json(state.form.service_health().await)
}

/// Apply field changes posted by an input's `hx-post`
pub async fn htmx_field_change(
    state: axum::extract::State<AppState>,
    body: String,
) -> Result<axum::http::StatusCode, ApiError> {
    let pairs = parse_form_body(&body);
    if pairs.is_empty() {
        return Err(ApiError::BadRequest {
            message: "No field in request body".to_string(),
        });
    }
    state.form.change_fields(pairs).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Submit the form and return the refreshed result region.
///
/// Posted values are applied as field changes first so the submission
/// matches what is on screen. A rejected value skips the submission and is
/// shown in the region; nothing here turns into an HTTP error.
pub async fn htmx_submit(
    state: axum::extract::State<AppState>,
    body: String,
) -> axum::response::Html<String> {
    if let Err(e) = state.form.change_fields(parse_form_body(&body)).await {
        let mut view = state.form.view().await;
        view.last_failure = Some(SubmissionFailure::new(e.code(), e.to_string()));
        return axum::response::Html(render_result_region(&view));
    }

    // Outcome is logged and folded into the form state by the controller.
    let _ = state.form.submit().await;

    let view = state.form.view().await;
    axum::response::Html(render_result_region(&view))
}

/// Result region (HTML fragment)
pub async fn htmx_result(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let view = state.form.view().await;
    axum::response::Html(render_result_region(&view))
}

/// Service badge (HTML fragment)
pub async fn htmx_service_status(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    let health = state.form.service_health().await;
    axum::response::Html(render_service_badge(&health))
}
