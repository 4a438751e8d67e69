//! Form page rendering - Full page and reusable fragments

use crate::AppState;
use txanalyzer_core::{
    AnalysisResult, FormView, PanelStyle, ServiceHealth, SubmissionFailure, TransactionInput,
    TransactionType,
};
use txanalyzer_utils::escape_html;

const INPUT_CLASS: &str = "w-full px-3 py-2.5 border rounded-lg focus:ring-2 focus:ring-indigo-500";

/// Transaction form page
pub async fn page_form(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let view = state.form.view().await;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <div>
                <h1 class='text-2xl font-bold'>Transaction Analyzer</h1>
                <p class='text-xs text-gray-500'>Submits to {}</p>
            </div>
            <div hx-get='/form/service-status' hx-trigger='load' hx-swap='outerHTML'></div>
        </div>
        <div class='grid grid-cols-1 md:grid-cols-2 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>{}</div>
            <div id='result-panel'>{}</div>
        </div>"#,
        escape_html(&state.config.analysis.endpoint_url()),
        render_form(&view.transaction),
        render_result_region(&view)
    );

    axum::response::Html(crate::page_response(&headers, "Analyze", &inner_content))
}

/// Render the form. Each input syncs its own value on change; submit
/// swaps the result region.
pub fn render_form(transaction: &TransactionInput) -> String {
    let type_options: String = TransactionType::all()
        .iter()
        .map(|ty| {
            format!(
                "<option value='{}'{}>{}</option>",
                ty.code(),
                if transaction.transaction_type == ty.code() { " selected" } else { "" },
                ty.label()
            )
        })
        .collect();

    format!(
        r#"<form hx-post='/form/submit' hx-target='#result-panel' hx-swap='innerHTML' class='space-y-4'>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Transaction Amount</label>
                <input type='number' step='any' name='amount' value='{amount}' required
                    hx-post='/form/field' hx-trigger='change' hx-params='amount' hx-swap='none' class='{cls}'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Time of Day (24h format)</label>
                <input type='number' name='time_of_day' value='{time}' min='0' max='23' required
                    hx-post='/form/field' hx-trigger='change' hx-params='time_of_day' hx-swap='none' class='{cls}'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Transaction Type</label>
                <select name='transaction_type'
                    hx-post='/form/field' hx-trigger='change' hx-params='transaction_type' hx-swap='none' class='{cls}'>{options}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Transaction ID</label>
                <input type='text' name='transaction_id' value='{id}'
                    hx-post='/form/field' hx-trigger='change' hx-params='transaction_id' hx-swap='none' class='{cls}'>
            </div>
            <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Analyze Transaction</button>
        </form>"#,
        amount = escape_html(&transaction.amount),
        time = escape_html(&transaction.time_of_day),
        options = type_options,
        id = escape_html(&transaction.transaction_id),
        cls = INPUT_CLASS,
    )
}

/// Contents of `#result-panel`: optional failure indicator, then the last result
pub fn render_result_region(view: &FormView) -> String {
    let mut html = String::new();
    if let Some(ref failure) = view.last_failure {
        html.push_str(&render_failure(failure));
    }
    if let Some(ref result) = view.result {
        html.push_str(&render_result_panel(result));
    }
    html
}

fn panel_class(style: PanelStyle) -> &'static str {
    match style {
        PanelStyle::Success => "alert alert-success bg-green-50 border border-green-200 text-green-800",
        PanelStyle::Danger => "alert alert-danger bg-red-50 border border-red-200 text-red-800",
    }
}

fn render_result_panel(result: &AnalysisResult) -> String {
    let style = result.panel_style();
    format!(
        r#"<div class='{} rounded-lg p-4' data-style='{}'>
            <h4 class='text-lg font-semibold mb-2'>Analysis Result</h4>
            <p>Transaction ID: {}</p>
            <p>Status: {}</p>
            <p>Risk Score: {}</p>
        </div>"#,
        panel_class(style),
        style,
        escape_html(&result.transaction_id),
        result.status_label(),
        result.risk_percentage()
    )
}

fn render_failure(failure: &SubmissionFailure) -> String {
    format!(
        r#"<div class='bg-yellow-50 border border-yellow-200 rounded-lg p-4 mb-4' role='alert' data-failure='{}'>
            <div class='flex items-center gap-2'><span class='text-yellow-600'>!</span><span class='font-medium text-yellow-800'>Submission failed</span></div>
            <p class='text-sm text-yellow-700 mt-1'>{}</p>
            <p class='text-xs text-yellow-600 mt-1'>{}</p>
        </div>"#,
        failure.kind,
        escape_html(&failure.message),
        failure.occurred_at.format("%H:%M:%S")
    )
}

/// Small badge showing whether the analysis service answers
pub fn render_service_badge(health: &ServiceHealth) -> String {
    let (dot, text) = if health.is_healthy() {
        ("bg-green-500", "text-green-700")
    } else if health.reachable {
        ("bg-yellow-500", "text-yellow-700")
    } else {
        ("bg-red-500", "text-red-700")
    };
    format!(
        r#"<span class='inline-flex items-center gap-2 text-sm {}' id='service-status'><span class='w-2 h-2 rounded-full {}'></span>Analysis service: {}</span>"#,
        text,
        dot,
        escape_html(&health.status)
    )
}
