//! Form state, data model and analysis service client

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod types;

pub use client::{AnalysisService, HttpAnalysisClient};
pub use controller::FormController;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use form::{FormView, TransactionForm};
pub use models::{AnalysisResult, ServiceHealth, SubmissionFailure, TransactionInput};
pub use types::{FormField, PanelStyle, TransactionType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_percentage_two_decimals() {
        let result = AnalysisResult {
            transaction_id: "T1".to_string(),
            is_normal: true,
            risk_score: 0.1234,
        };
        assert_eq!(result.risk_percentage(), "12.34%");
        assert_eq!(result.panel_style(), PanelStyle::Success);
        assert_eq!(result.status_label(), "Normal");
    }

    #[test]
    fn test_anomalous_uses_danger_style() {
        let result = AnalysisResult {
            transaction_id: "T2".to_string(),
            is_normal: false,
            risk_score: 1.0,
        };
        assert_eq!(result.panel_style(), PanelStyle::Danger);
        assert_eq!(result.status_label(), "Anomalous");
        assert_eq!(result.risk_percentage(), "100.00%");
    }

    #[test]
    fn test_response_with_extra_keys_parses() {
        let json = r#"{"transaction_id":"TX9","is_normal":true,"risk_score":0.02,"patterns":[]}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.transaction_id, "TX9");
        assert_eq!(result.risk_percentage(), "2.00%");
    }

    #[test]
    fn test_transaction_type_round_trip_labels() {
        assert_eq!("1".parse::<TransactionType>().unwrap().label(), "Regular Transfer");
        assert_eq!("2".parse::<TransactionType>().unwrap().label(), "Large Transfer");
        assert_eq!("3".parse::<TransactionType>().unwrap().label(), "International Transfer");
        assert!("4".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_form_field_names() {
        for field in FormField::all() {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
        assert!("amount ".parse::<FormField>().is_err());
    }

    #[test]
    fn test_service_health() {
        let health = ServiceHealth { reachable: true, status: "healthy".to_string() };
        assert!(health.is_healthy());
        let health = ServiceHealth { reachable: false, status: "unreachable".to_string() };
        assert!(!health.is_healthy());
    }
}
