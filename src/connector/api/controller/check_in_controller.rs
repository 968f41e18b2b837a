use anyhow::Result;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::{CallerIdentity, CheckIn, CheckInOutcome, DailyCheckInRequest};

use super::super::Container;

pub struct CheckInController<'a> {
    container: &'a Container,
}

impl<'a> CheckInController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn check_in(
        &self,
        mood: f64,
        tags: Vec<String>,
        note: Option<String>,
        format: OutputFormat,
    ) -> Result<String> {
        let mut checkin = CheckIn::new(mood, tags);
        if let Some(note) = note {
            checkin = checkin.with_note(note);
        }

        let caller = self.container.cli_caller().map(CallerIdentity::new);
        let span = info_span!("cli", function = "dailyCheckIn", request_id = %Uuid::new_v4());
        let outcome = self
            .container
            .check_in_use_case()
            .execute(caller.as_ref(), DailyCheckInRequest::new(checkin))
            .instrument(span)
            .await?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&outcome)?),
            OutputFormat::Text => Ok(self.format_outcome(&outcome)),
        }
    }

    fn format_outcome(&self, outcome: &CheckInOutcome) -> String {
        let cls = &outcome.classification;
        let mut output = format!(
            "Severity: {}\nSuggested path: {}\nReason: {}",
            cls.severity,
            cls.suggested_path.as_str(),
            cls.reason
        );

        if let Some(exercise) = &outcome.exercise {
            output.push_str(&format!(
                "\n\n{} ({}s)\n",
                exercise.title, exercise.duration_sec
            ));
            for (i, step) in exercise.steps.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, step));
            }
            if let Some(prompt) = &exercise.prompt {
                output.push_str(&format!("Reflect: {}\n", prompt));
            }
        }

        output.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::api::ContainerConfig;
    use crate::{Completion, MockChatClient, StaticTokenAuthenticator};
    use serde_json::json;
    use std::sync::Arc;

    fn container(client: MockChatClient) -> Container {
        Container::with_services(
            ContainerConfig {
                cli_caller: Some("cli".to_string()),
                ..ContainerConfig::default()
            },
            Arc::new(client),
            Arc::new(StaticTokenAuthenticator::new()),
        )
    }

    #[tokio::test]
    async fn low_severity_prints_exercise() {
        let container = container(MockChatClient::new());
        let output = CheckInController::new(&container)
            .check_in(3.0, vec!["work".into()], None, OutputFormat::Text)
            .await
            .unwrap();

        assert!(output.starts_with("Severity: 1 (mild)"));
        assert!(output.contains("Shoulder drop (45s)"));
        assert!(output.contains("  1. Lift your shoulders toward your ears"));
    }

    #[tokio::test]
    async fn elevated_severity_prints_classification_only() {
        let client = MockChatClient::new().with_response(Completion::Json(json!({
            "severity": 3,
            "reason": "Risk language present.",
            "suggested_path": "rescue"
        })));
        let container = container(client);
        let output = CheckInController::new(&container)
            .check_in(1.0, vec![], Some("rough night".into()), OutputFormat::Text)
            .await
            .unwrap();

        assert_eq!(
            output,
            "Severity: 3 (imminent_risk)\nSuggested path: rescue\nReason: Risk language present."
        );
    }

    #[tokio::test]
    async fn json_output_merges_exercise() {
        let container = container(MockChatClient::new());
        let output = CheckInController::new(&container)
            .check_in(3.0, vec![], None, OutputFormat::Json)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["severity"], 1);
        assert_eq!(value["exercise"]["title"], "Shoulder drop");
    }
}
