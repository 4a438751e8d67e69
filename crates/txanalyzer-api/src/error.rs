//! Error types for txanalyzer-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use txanalyzer_core::{CoreError, ErrorCode};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) if e.is_submission_failure() => StatusCode::BAD_GATEWAY,
            ApiError::Core(e) => match e.code() {
                ErrorCode::UnknownField | ErrorCode::InvalidField => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Core(e) => serde_json::to_value(e.to_details())
                .unwrap_or_else(|_| serde_json::json!({ "message": e.to_string() })),
            ApiError::BadRequest { message } => serde_json::json!({
                "code": "BAD_REQUEST",
                "message": message,
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let upstream = ApiError::from(CoreError::Service { status: 503, message: "down".to_string() });
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        let network = ApiError::from(CoreError::Network { message: "refused".to_string() });
        assert_eq!(network.status_code(), StatusCode::BAD_GATEWAY);
        let rejected = ApiError::from(CoreError::UnknownField { name: "merchant".to_string() });
        assert_eq!(rejected.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let internal = ApiError::from(CoreError::InternalError { message: "tls".to_string() });
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let bad = ApiError::BadRequest { message: "empty".to_string() };
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
    }
}
