//! Basic types for the transaction form

use serde::{Deserialize, Serialize};

/// Transaction type enumeration, carried on the wire as "1" | "2" | "3"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Regular transfer ("1")
    Regular,
    /// Large transfer ("2")
    Large,
    /// International transfer ("3")
    International,
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Regular
    }
}

impl TransactionType {
    /// All variants in option order
    pub fn all() -> [TransactionType; 3] {
        [TransactionType::Regular, TransactionType::Large, TransactionType::International]
    }

    /// Wire code submitted to the analysis service
    pub fn code(&self) -> &'static str {
        match self {
            TransactionType::Regular => "1",
            TransactionType::Large => "2",
            TransactionType::International => "3",
        }
    }

    /// Human-readable option label
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Regular => "Regular Transfer",
            TransactionType::Large => "Large Transfer",
            TransactionType::International => "International Transfer",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(TransactionType::Regular),
            "2" => Ok(TransactionType::Large),
            "3" => Ok(TransactionType::International),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Editable fields of the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Amount,
    TimeOfDay,
    TransactionType,
    TransactionId,
}

impl FormField {
    pub fn all() -> [FormField; 4] {
        [FormField::Amount, FormField::TimeOfDay, FormField::TransactionType, FormField::TransactionId]
    }

    /// Input name, identical to the JSON key
    pub fn name(&self) -> &'static str {
        match self {
            FormField::Amount => "amount",
            FormField::TimeOfDay => "time_of_day",
            FormField::TransactionType => "transaction_type",
            FormField::TransactionId => "transaction_id",
        }
    }
}

impl std::str::FromStr for FormField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" => Ok(FormField::Amount),
            "time_of_day" => Ok(FormField::TimeOfDay),
            "transaction_type" => Ok(FormField::TransactionType),
            "transaction_id" => Ok(FormField::TransactionId),
            _ => Err(format!("Unknown form field: {}", s)),
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Visual style of the result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelStyle {
    Success,
    Danger,
}

impl PanelStyle {
    pub fn from_verdict(is_normal: bool) -> Self {
        if is_normal {
            PanelStyle::Success
        } else {
            PanelStyle::Danger
        }
    }
}

impl std::fmt::Display for PanelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelStyle::Success => write!(f, "success"),
            PanelStyle::Danger => write!(f, "danger"),
        }
    }
}
