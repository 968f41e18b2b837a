use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ChatClient;
use crate::domain::{
    CallerIdentity, CheckInOutcome, Classification, CompletionOptions, CompletionPurpose,
    DailyCheckInRequest, DomainError, Exercise, PromptComposer, RequestValidator,
};

pub const CLASSIFICATION_TEMPERATURE: f32 = 0.1;
pub const EXERCISE_TEMPERATURE: f32 = 0.5;

/// Triage a check-in, then attach a micro-exercise when severity is low.
///
/// This is a linear pipeline of one or two sequential completion calls. At
/// severity 2 and above the classification is returned alone so the client can
/// route to static crisis resources.
pub struct DailyCheckInUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl DailyCheckInUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn execute(
        &self,
        caller: Option<&CallerIdentity>,
        request: DailyCheckInRequest,
    ) -> Result<CheckInOutcome, DomainError> {
        let caller = RequestValidator::require_caller(caller)?;
        let checkin = RequestValidator::require_check_in(request.checkin)?;
        info!(
            "Classifying check-in for {} ({} tags, note: {})",
            caller.uid(),
            checkin.tags().len(),
            checkin.note().is_some()
        );

        let messages = PromptComposer::classification(&checkin)?;
        let options = CompletionOptions::new(CompletionPurpose::Classification)
            .json()
            .with_temperature(CLASSIFICATION_TEMPERATURE);
        let completion = self.chat_client.complete(&messages, options).await?;
        let classification = Classification::from_completion(&completion)?;

        if classification.severity.is_elevated() {
            info!(
                "Check-in severity {} is elevated; returning classification without exercise",
                classification.severity
            );
            return Ok(CheckInOutcome::classification_only(classification));
        }

        let messages = PromptComposer::exercise(&checkin, &classification)?;
        let options = CompletionOptions::new(CompletionPurpose::Exercise)
            .json()
            .with_temperature(EXERCISE_TEMPERATURE);
        let completion = self.chat_client.complete(&messages, options).await?;
        let exercise = Exercise::from_completion(&completion)?;

        if !exercise.is_within_bounds() {
            warn!(
                "Generated exercise '{}' lasts {}s, outside the requested range",
                exercise.title, exercise.duration_sec
            );
        }
        info!(
            "Check-in severity {} resolved with exercise '{}'",
            classification.severity, exercise.title
        );

        Ok(CheckInOutcome::with_exercise(classification, exercise))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::MockChatClient;
    use crate::domain::{CheckIn, Completion, Severity};
    use serde_json::json;

    fn caller() -> CallerIdentity {
        CallerIdentity::new("uid-7")
    }

    fn request() -> DailyCheckInRequest {
        DailyCheckInRequest::new(CheckIn::new(2.0, vec!["work".to_string()]))
    }

    fn classification(severity: u8, path: &str) -> Completion {
        Completion::Json(json!({
            "severity": severity,
            "reason": "test",
            "suggested_path": path
        }))
    }

    #[tokio::test]
    async fn rejects_anonymous_caller_before_any_call() {
        let client = Arc::new(MockChatClient::new());
        let use_case = DailyCheckInUseCase::new(client.clone());

        let err = use_case.execute(None, request()).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn rejects_missing_check_in_before_any_call() {
        let client = Arc::new(MockChatClient::new());
        let use_case = DailyCheckInUseCase::new(client.clone());

        let err = use_case
            .execute(Some(&caller()), DailyCheckInRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn elevated_severity_skips_exercise() {
        for level in [2u8, 3] {
            let client = Arc::new(MockChatClient::new().with_response(classification(level, "rescue")));
            let use_case = DailyCheckInUseCase::new(client.clone());

            let outcome = use_case.execute(Some(&caller()), request()).await.unwrap();

            assert_eq!(outcome.classification.severity.level(), level);
            assert!(outcome.exercise.is_none());
            assert_eq!(client.call_count(), 1);
            let value = serde_json::to_value(&outcome).unwrap();
            assert!(value.get("exercise").is_none());
        }
    }

    #[tokio::test]
    async fn low_severity_adds_exactly_one_exercise_call() {
        for level in [0u8, 1] {
            let client = Arc::new(
                MockChatClient::new()
                    .with_response(classification(level, "exercise"))
                    .with_response(Completion::Json(json!({
                        "title": "Shoulder drop",
                        "duration_sec": 45,
                        "steps": ["Lift your shoulders", "Let them fall"]
                    }))),
            );
            let use_case = DailyCheckInUseCase::new(client.clone());

            let outcome = use_case.execute(Some(&caller()), request()).await.unwrap();

            assert_eq!(outcome.classification.severity.level(), level);
            let exercise = outcome.exercise.expect("exercise attached");
            assert_eq!(exercise.title, "Shoulder drop");

            let calls = client.calls();
            assert_eq!(calls.len(), 2);
            assert_eq!(calls[0].options.temperature(), CLASSIFICATION_TEMPERATURE);
            assert_eq!(calls[1].options.purpose(), CompletionPurpose::Exercise);
        }
    }

    #[tokio::test]
    async fn plain_text_classification_is_malformed() {
        let client = Arc::new(
            MockChatClient::new().with_response(Completion::PlainText("all good".to_string())),
        );
        let use_case = DailyCheckInUseCase::new(client.clone());

        let err = use_case.execute(Some(&caller()), request()).await.unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn exercise_failure_aborts_the_invocation() {
        let client = Arc::new(
            MockChatClient::new()
                .with_response(classification(1, "exercise"))
                .with_error(DomainError::upstream(500, "server error")),
        );
        let use_case = DailyCheckInUseCase::new(client);

        let err = use_case.execute(Some(&caller()), request()).await.unwrap_err();
        assert!(matches!(err, DomainError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn severity_threshold_matches_domain_rule() {
        let client = Arc::new(MockChatClient::new().with_response(classification(2, "rescue")));
        let outcome = DailyCheckInUseCase::new(client)
            .execute(Some(&caller()), request())
            .await
            .unwrap();
        assert_eq!(outcome.classification.severity, Severity::Concerning);
    }
}
