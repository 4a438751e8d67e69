//! Transaction form state
//!
//! Two slots: the editable transaction and the last verdict. A third,
//! optional slot remembers the last failed submission when failure
//! reporting is enabled.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{AnalysisResult, SubmissionFailure, TransactionInput};
use crate::types::{FormField, TransactionType};

#[derive(Debug, Clone)]
pub struct TransactionForm {
    transaction: TransactionInput,
    result: Option<AnalysisResult>,
    last_failure: Option<SubmissionFailure>,
    report_failures: bool,
}

/// Serializable view of the form for the JSON API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormView {
    pub transaction: TransactionInput,
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failure: Option<SubmissionFailure>,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TransactionForm {
    pub fn new(report_failures: bool) -> Self {
        Self {
            transaction: TransactionInput::default(),
            result: None,
            last_failure: None,
            report_failures,
        }
    }

    pub fn transaction(&self) -> &TransactionInput {
        &self.transaction
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn last_failure(&self) -> Option<&SubmissionFailure> {
        self.last_failure.as_ref()
    }

    /// Replace one field. Only `transaction_type` is checked; everything
    /// else is stored as typed.
    pub fn change_field(&mut self, field: FormField, value: String) -> CoreResult<()> {
        check_value(field, &value)?;
        self.transaction = self.transaction.with_field(field, value);
        Ok(())
    }

    /// Same as [`change_field`](Self::change_field), addressed by input name
    pub fn change_named_field(&mut self, name: &str, value: String) -> CoreResult<()> {
        self.change_field(parse_field(name)?, value)
    }

    /// Apply several named changes in order, all or nothing. Each change
    /// still replaces a single field; if any name or value is rejected the
    /// transaction is left as it was.
    pub fn change_named_fields<I>(&mut self, changes: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut staged = self.transaction.clone();
        for (name, value) in changes {
            let field = parse_field(&name)?;
            check_value(field, &value)?;
            staged = staged.with_field(field, value);
        }
        self.transaction = staged;
        Ok(())
    }

    /// Copy of the transaction as it stands right now
    pub fn snapshot(&self) -> TransactionInput {
        self.transaction.clone()
    }

    /// Apply the outcome of a submission. Failures never touch `result`.
    pub fn apply_outcome(&mut self, outcome: &CoreResult<AnalysisResult>) {
        match outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.last_failure = None;
            }
            Err(error) => {
                if self.report_failures {
                    self.last_failure = Some(SubmissionFailure::new(error.code(), error.to_string()));
                }
            }
        }
    }

    pub fn view(&self) -> FormView {
        FormView {
            transaction: self.transaction.clone(),
            result: self.result.clone(),
            last_failure: self.last_failure.clone(),
        }
    }
}

fn parse_field(name: &str) -> CoreResult<FormField> {
    name.parse::<FormField>()
        .map_err(|_| CoreError::UnknownField { name: name.to_string() })
}

fn check_value(field: FormField, value: &str) -> CoreResult<()> {
    if field == FormField::TransactionType {
        value.parse::<TransactionType>().map_err(|message| CoreError::InvalidField {
            field: field.name().to_string(),
            message,
        })?;
    }
    Ok(())
}
