//! Error types for txanalyzer-core
//!
//! This module provides error handling for form editing and for calls to the
//! analysis service, including error codes, detailed messages, and suggestions.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Field name not part of the form
    UnknownField,
    /// Field value rejected
    InvalidField,
    /// Could not reach the analysis service
    NetworkError,
    /// Service answered with a non-success status
    ServiceError,
    /// Response body was not the expected JSON
    InvalidResponse,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::UnknownField => write!(f, "UNKNOWN_FIELD"),
            ErrorCode::InvalidField => write!(f, "INVALID_FIELD"),
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::ServiceError => write!(f, "SERVICE_ERROR"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl ErrorSeverity {
    /// Log level an error of this severity is reported at
    pub fn log_level(self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for txanalyzer-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown form field: {name}")]
    UnknownField { name: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Request to analysis service failed: {message}")]
    Network { message: String },

    #[error("Analysis service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Failed to parse analysis response: {message}")]
    InvalidResponse { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::UnknownField { .. } => ErrorCode::UnknownField,
            CoreError::InvalidField { .. } => ErrorCode::InvalidField,
            CoreError::Network { .. } => ErrorCode::NetworkError,
            CoreError::Service { .. } => ErrorCode::ServiceError,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::UnknownField { .. } => ErrorSeverity::Warning,
            CoreError::InvalidField { .. } => ErrorSeverity::Info,
            CoreError::Network { .. } => ErrorSeverity::Error,
            CoreError::Service { .. } => ErrorSeverity::Error,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether this error came out of a submission round-trip
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Network { .. } | CoreError::Service { .. } | CoreError::InvalidResponse { .. }
        )
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(
            self.code(),
            self.to_string(),
        );

        match self {
            CoreError::UnknownField { .. } => {
                details = details.with_suggestion(
                    "Valid fields are: amount, time_of_day, transaction_type, transaction_id.".to_string()
                );
            }
            CoreError::InvalidField { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
                if field == "transaction_type" {
                    details = details.with_suggestion(
                        "Use 1 (Regular), 2 (Large) or 3 (International).".to_string()
                    );
                }
            }
            CoreError::Network { .. } => {
                details = details.with_suggestion(
                    "Check that the analysis service is running and reachable.".to_string()
                );
                details = details.with_suggestion(
                    "Verify analysis.host and analysis.port in the config file.".to_string()
                );
            }
            CoreError::Service { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
                details = details.with_suggestion(
                    "Review the analysis service logs for the rejected request.".to_string()
                );
            }
            CoreError::InvalidResponse { .. } => {
                details = details.with_suggestion(
                    "The service must answer with transaction_id, is_normal and risk_score.".to_string()
                );
            }
            CoreError::InternalError { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<reqwest::Error> for CoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            CoreError::InvalidResponse { message: error.to_string() }
        } else {
            CoreError::Network { message: error.to_string() }
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            request_id: None,
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error at the level its severity calls for
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log debug information
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let severity = error.severity();
        log::log!(
            target: "txanalyzer::error",
            severity.log_level(),
            "{} [{}] {} - Operation: {} - Request: {:?} - Data: {}",
            severity.to_string().to_uppercase(),
            error.code(),
            error.to_details(),
            context.operation,
            context.request_id,
            context.data
        );
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "txanalyzer::error",
            "DEBUG: {} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================
