//! Form controller: owns the shared form state and drives submissions

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::client::AnalysisService;
use crate::error::{CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::form::{FormView, TransactionForm};
use crate::models::{AnalysisResult, ServiceHealth, TransactionInput};

/// Shared handle to the form. Cloning shares the same state.
#[derive(Clone)]
pub struct FormController {
    form: Arc<RwLock<TransactionForm>>,
    service: Arc<dyn AnalysisService>,
    logger: Arc<dyn ErrorLogger>,
}

impl FormController {
    pub fn new(service: Arc<dyn AnalysisService>, report_failures: bool) -> Self {
        Self::with_logger(service, report_failures, Arc::new(DefaultErrorLogger))
    }

    pub fn with_logger(
        service: Arc<dyn AnalysisService>,
        report_failures: bool,
        logger: Arc<dyn ErrorLogger>,
    ) -> Self {
        Self {
            form: Arc::new(RwLock::new(TransactionForm::new(report_failures))),
            service,
            logger,
        }
    }

    /// Apply one field change and return the updated transaction
    pub async fn change_field(&self, name: &str, value: String) -> CoreResult<TransactionInput> {
        let mut form = self.form.write().await;
        if let Err(e) = form.change_named_field(name, value) {
            let context = ErrorContext::new("change_field".to_string())
                .with_data("field", serde_json::json!(name));
            self.logger.log_error(&e, &context);
            return Err(e);
        }
        Ok(form.snapshot())
    }

    /// Apply a batch of posted field changes atomically
    pub async fn change_fields(&self, changes: Vec<(String, String)>) -> CoreResult<TransactionInput> {
        let names: Vec<String> = changes.iter().map(|(name, _)| name.clone()).collect();
        let mut form = self.form.write().await;
        if let Err(e) = form.change_named_fields(changes) {
            let context = ErrorContext::new("change_fields".to_string())
                .with_data("fields", serde_json::json!(names));
            self.logger.log_error(&e, &context);
            return Err(e);
        }
        Ok(form.snapshot())
    }

    /// Submit the current transaction.
    ///
    /// The lock is released while the request is in flight, so overlapping
    /// submissions race and whichever response lands last wins.
    pub async fn submit(&self) -> CoreResult<AnalysisResult> {
        let request_id = txanalyzer_utils::generate_id();
        let snapshot = self.form.read().await.snapshot();
        let context = ErrorContext::new("submit".to_string())
            .with_request_id(request_id.clone())
            .with_data("transaction_id", serde_json::json!(snapshot.transaction_id));

        self.logger.log_debug(
            &format!("Submitting transaction type={}", snapshot.transaction_type),
            &context,
        );

        let outcome = self.service.analyze(&snapshot).await;

        match &outcome {
            Ok(result) => log::info!(
                "Analysis [{}] {}: {} ({})",
                request_id, result.transaction_id, result.status_label(), result.risk_percentage()
            ),
            Err(e) => self.logger.log_error(e, &context),
        }

        self.form.write().await.apply_outcome(&outcome);
        outcome
    }

    pub async fn view(&self) -> FormView {
        self.form.read().await.view()
    }

    pub async fn service_health(&self) -> ServiceHealth {
        self.service.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ErrorCode};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned outcomes and records what was submitted
    #[derive(Default)]
    struct ScriptedService {
        outcomes: Mutex<VecDeque<CoreResult<AnalysisResult>>>,
        submitted: Mutex<Vec<TransactionInput>>,
    }

    impl ScriptedService {
        fn push(&self, outcome: CoreResult<AnalysisResult>) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }
    }

    #[async_trait]
    impl AnalysisService for ScriptedService {
        async fn analyze(&self, transaction: &TransactionInput) -> CoreResult<AnalysisResult> {
            self.submitted.lock().unwrap().push(transaction.clone());
            self.outcomes.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(CoreError::Network { message: "no scripted outcome".to_string() })
            })
        }

        async fn health(&self) -> ServiceHealth {
            ServiceHealth { reachable: true, status: "healthy".to_string() }
        }
    }

    #[tokio::test]
    async fn test_scenario_submit_and_render_values() {
        let service = Arc::new(ScriptedService::default());
        service.push(Ok(AnalysisResult {
            transaction_id: "TX9".to_string(),
            is_normal: true,
            risk_score: 0.02,
        }));
        let controller = FormController::new(service.clone(), true);

        controller.change_field("amount", "100".to_string()).await.unwrap();
        controller.change_field("time_of_day", "14".to_string()).await.unwrap();
        controller.change_field("transaction_id", "TX9".to_string()).await.unwrap();
        let result = controller.submit().await.unwrap();

        assert_eq!(result.risk_percentage(), "2.00%");
        assert_eq!(result.status_label(), "Normal");

        let submitted = service.submitted.lock().unwrap();
        assert_eq!(
            submitted[0],
            TransactionInput {
                amount: "100".to_string(),
                time_of_day: "14".to_string(),
                transaction_type: "1".to_string(),
                transaction_id: "TX9".to_string(),
            }
        );
        drop(submitted);

        let view = controller.view().await;
        assert_eq!(view.result.unwrap().transaction_id, "TX9");
    }

    #[tokio::test]
    async fn test_network_failure_keeps_previous_result() {
        let service = Arc::new(ScriptedService::default());
        let first = AnalysisResult { transaction_id: "T1".to_string(), is_normal: false, risk_score: 0.8 };
        service.push(Ok(first.clone()));
        service.push(Err(CoreError::Network { message: "connection refused".to_string() }));
        let controller = FormController::new(service, true);

        controller.submit().await.unwrap();
        assert!(controller.submit().await.is_err());

        let view = controller.view().await;
        assert_eq!(view.result, Some(first));
        assert_eq!(view.last_failure.unwrap().kind, ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_fire_and_forget_mode_hides_failure() {
        let service = Arc::new(ScriptedService::default());
        service.push(Err(CoreError::InvalidResponse { message: "bad json".to_string() }));
        let controller = FormController::new(service, false);

        assert!(controller.submit().await.is_err());

        let view = controller.view().await;
        assert!(view.result.is_none());
        assert!(view.last_failure.is_none());
    }

    #[tokio::test]
    async fn test_rejected_change_keeps_state() {
        let controller = FormController::new(Arc::new(ScriptedService::default()), true);
        assert!(controller.change_field("transaction_type", "7".to_string()).await.is_err());
        assert_eq!(controller.view().await.transaction.transaction_type, "1");
    }

    /// Holds back "SLOW" until released; everything else answers at once
    struct GatedService {
        started: tokio::sync::mpsc::UnboundedSender<String>,
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl AnalysisService for GatedService {
        async fn analyze(&self, transaction: &TransactionInput) -> CoreResult<AnalysisResult> {
            let id = transaction.transaction_id.clone();
            let _ = self.started.send(id.clone());
            if id == "SLOW" {
                self.release.notified().await;
            }
            Ok(AnalysisResult { transaction_id: id, is_normal: true, risk_score: 0.1 })
        }

        async fn health(&self) -> ServiceHealth {
            ServiceHealth { reachable: true, status: "healthy".to_string() }
        }
    }

    #[tokio::test]
    async fn test_overlapping_submits_last_response_wins() {
        let (started_tx, mut started_rx) = tokio::sync::mpsc::unbounded_channel();
        let service = Arc::new(GatedService {
            started: started_tx,
            release: tokio::sync::Notify::new(),
        });
        let controller = FormController::new(service.clone(), true);

        controller.change_field("transaction_id", "SLOW".to_string()).await.unwrap();
        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        assert_eq!(started_rx.recv().await.as_deref(), Some("SLOW"));

        // The form stays editable while a request is in flight
        controller.change_field("transaction_id", "FAST".to_string()).await.unwrap();
        let fast = controller.submit().await.unwrap();
        assert_eq!(fast.transaction_id, "FAST");
        assert_eq!(controller.view().await.result.unwrap().transaction_id, "FAST");

        service.release.notify_one();
        let slow = slow.await.unwrap().unwrap();
        assert_eq!(slow.transaction_id, "SLOW");

        let view = controller.view().await;
        assert_eq!(view.result.unwrap().transaction_id, "SLOW");
        assert_eq!(view.transaction.transaction_id, "FAST");
    }

    #[tokio::test]
    async fn test_change_fields_rejects_batch_atomically() {
        let controller = FormController::new(Arc::new(ScriptedService::default()), true);
        let err = controller
            .change_fields(vec![
                ("amount".to_string(), "10".to_string()),
                ("transaction_type".to_string(), "0".to_string()),
            ])
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidField);
        assert_eq!(controller.view().await.transaction.amount, "");

        let tx = controller
            .change_fields(vec![("amount".to_string(), "10".to_string())])
            .await
            .unwrap();
        assert_eq!(tx.amount, "10");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let controller = FormController::new(Arc::new(ScriptedService::default()), true);
        let other = controller.clone();
        other.change_field("amount", "5".to_string()).await.unwrap();
        assert_eq!(controller.view().await.transaction.amount, "5");
    }
}
