use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{
    CallerIdentity, Completion, CompletionOptions, CompletionPurpose, DomainError,
    PanicPlanRequest, PromptComposer, RequestValidator,
};

pub const PANIC_PLAN_TEMPERATURE: f32 = 0.2;

/// Generates a panic plan with a single completion call and relays the model
/// output unmodified. No fallback plan is produced on failure.
pub struct GeneratePanicPlanUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl GeneratePanicPlanUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn execute(
        &self,
        caller: Option<&CallerIdentity>,
        request: PanicPlanRequest,
    ) -> Result<Completion, DomainError> {
        let caller = RequestValidator::require_caller(caller)?;
        info!(
            "Generating panic plan for {} ({} intake fields, custom prompt: {})",
            caller.uid(),
            request.intake.as_ref().map(|i| i.field_count()).unwrap_or(0),
            request.system_prompt_override().is_some()
        );

        let messages = PromptComposer::panic_plan(&request)?;
        let options = CompletionOptions::new(CompletionPurpose::PanicPlan)
            .json()
            .with_temperature(PANIC_PLAN_TEMPERATURE);

        let start_time = Instant::now();
        let completion = self.chat_client.complete(&messages, options).await?;
        debug!(
            "Panic plan completion from {} took {:?} (json: {})",
            self.chat_client.model_name(),
            start_time.elapsed(),
            completion.is_json()
        );

        Ok(completion)
    }
}
