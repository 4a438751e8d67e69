//! Transaction form routes
//!
//! Features:
//! - Form page with per-field HTMX change sync
//! - Submission to the analysis service, result panel swap
//! - JSON API over the same form state
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_form,
    api_form_field,
    api_form_submit,
    api_service_health,
    htmx_field_change,
    htmx_result,
    htmx_service_status,
    htmx_submit,
};

pub use page::{
    page_form,
    render_form,
    render_result_region,
    render_service_badge,
};
