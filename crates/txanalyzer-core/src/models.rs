//! Core data models for the transaction form

use chrono::{DateTime, Local};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::ErrorCode;
use super::types::{FormField, PanelStyle, TransactionType};

/// Editable transaction input.
///
/// Every field holds the raw input value; the analysis service owns
/// validation, so empty strings are submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Monetary amount as typed
    pub amount: String,
    /// Hour of day, 0-23, as typed
    pub time_of_day: String,
    /// Transaction type code ("1", "2" or "3")
    pub transaction_type: String,
    /// Optional caller-chosen identifier
    pub transaction_id: String,
}

impl Default for TransactionInput {
    fn default() -> Self {
        Self {
            amount: String::new(),
            time_of_day: String::new(),
            transaction_type: TransactionType::default().code().to_string(),
            transaction_id: String::new(),
        }
    }
}

impl TransactionInput {
    /// Current value of a field
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::TimeOfDay => &self.time_of_day,
            FormField::TransactionType => &self.transaction_type,
            FormField::TransactionId => &self.transaction_id,
        }
    }

    /// Copy of this input with exactly one field replaced
    pub fn with_field(&self, field: FormField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            FormField::Amount => next.amount = value,
            FormField::TimeOfDay => next.time_of_day = value,
            FormField::TransactionType => next.transaction_type = value,
            FormField::TransactionId => next.transaction_id = value,
        }
        next
    }

    /// Parsed transaction type, if the stored code is valid
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type.parse().ok()
    }
}

/// Verdict returned by the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Echoed identifier
    pub transaction_id: String,
    /// true when the transaction looks normal
    pub is_normal: bool,
    /// Anomaly confidence in [0, 1]
    pub risk_score: f64,
}

impl AnalysisResult {
    /// "Normal" or "Anomalous"
    pub fn status_label(&self) -> &'static str {
        if self.is_normal {
            "Normal"
        } else {
            "Anomalous"
        }
    }

    /// Risk score as a percentage with two decimals, e.g. `0.1234` -> `"12.34%"`.
    ///
    /// Rounds the exact value of the scaled float, with ties going away from
    /// zero (`0.00125` -> `"0.13%"`).
    pub fn risk_percentage(&self) -> String {
        let scaled = self.risk_score * 100.0;
        match Decimal::from_f64_retain(scaled) {
            Some(value) => {
                let mut rounded =
                    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                rounded.rescale(2);
                format!("{}%", rounded)
            }
            // NaN, infinities and values beyond Decimal's range
            None => format!("{:.2}%", scaled),
        }
    }

    pub fn panel_style(&self) -> PanelStyle {
        PanelStyle::from_verdict(self.is_normal)
    }
}

/// Last failed submission, kept only when failure reporting is enabled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionFailure {
    pub kind: ErrorCode,
    pub message: String,
    pub occurred_at: DateTime<Local>,
}

impl SubmissionFailure {
    pub fn new(kind: ErrorCode, message: String) -> Self {
        Self {
            kind,
            message,
            occurred_at: Local::now(),
        }
    }
}

/// Result of a service health probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the service answered with a 2xx status
    pub reachable: bool,
    /// Status string reported by the service, or a local description
    pub status: String,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.reachable && self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(risk_score: f64) -> AnalysisResult {
        AnalysisResult {
            transaction_id: "T1".to_string(),
            is_normal: true,
            risk_score,
        }
    }

    #[test]
    fn test_risk_percentage_ties_round_up() {
        let cases = [
            (0.00125, "0.13%"),
            (0.00625, "0.63%"),
            (0.01125, "1.13%"),
            (0.10625, "10.63%"),
        ];
        for (score, expected) in cases {
            assert_eq!(scored(score).risk_percentage(), expected, "score {}", score);
        }
    }

    #[test]
    fn test_risk_percentage_pads_and_bounds() {
        assert_eq!(scored(0.02).risk_percentage(), "2.00%");
        assert_eq!(scored(0.0).risk_percentage(), "0.00%");
        assert_eq!(scored(1.0).risk_percentage(), "100.00%");
        assert_eq!(scored(0.87).risk_percentage(), "87.00%");
        assert_eq!(scored(0.123449).risk_percentage(), "12.34%");
    }

    #[test]
    fn test_risk_percentage_non_finite() {
        assert_eq!(scored(f64::NAN).risk_percentage(), "NaN%");
    }
}
