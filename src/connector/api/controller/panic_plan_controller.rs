use anyhow::{Context, Result};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::{CallerIdentity, Completion, GeneratedPlan, Intake, PanicPlanRequest};

use super::super::Container;

pub struct PanicPlanController<'a> {
    container: &'a Container,
}

impl<'a> PanicPlanController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(
        &self,
        intake: Option<String>,
        system_prompt: Option<String>,
        format: OutputFormat,
    ) -> Result<String> {
        let mut request = PanicPlanRequest::default();
        if let Some(raw) = intake {
            request.intake = Some(load_intake(&raw).await?);
        }
        request.system_prompt = system_prompt;

        let caller = self.container.cli_caller().map(CallerIdentity::new);
        let span = info_span!("cli", function = "generatePanicPlan", request_id = %Uuid::new_v4());
        let completion = self
            .container
            .panic_plan_use_case()
            .execute(caller.as_ref(), request)
            .instrument(span)
            .await?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&completion)?),
            OutputFormat::Text => Ok(self.format_plan(&completion)),
        }
    }

    fn format_plan(&self, completion: &Completion) -> String {
        let plan = match GeneratedPlan::from_completion(completion) {
            Some(plan) => plan,
            None => {
                return match completion {
                    Completion::Json(value) => serde_json::to_string_pretty(value)
                        .unwrap_or_else(|_| value.to_string()),
                    Completion::PlainText(text) => text.clone(),
                }
            }
        };

        let mut output = format!("{}\n{}\n", plan.title, "=".repeat(plan.title.chars().count()));
        for (i, step) in plan.steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, step.describe()));
        }
        output.push_str(&format!("\nTotal: {}s", plan.total_seconds()));
        if plan.exceeds_time_budget() {
            output.push_str(" (longer than requested)");
        }
        output
    }
}

/// Inline JSON, or `@path` to a JSON file.
async fn load_intake(raw: &str) -> Result<Intake> {
    let text = match raw.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read intake file {}", path))?,
        None => raw.to_string(),
    };
    let value = serde_json::from_str(&text).context("Intake must be valid JSON")?;
    Ok(Intake::new(value))
}
