use serde_json::json;
use tracing::warn;

use crate::domain::{ChatMessage, CheckIn, Classification, DomainError, Intake, PanicPlanRequest};

/// Default system prompt for panic plans. Callers may replace it.
pub const PANIC_PLAN_SYSTEM_PROMPT: &str = "\
You are a calm, supportive coach helping someone through a moment of panic. \
Build a short coping plan from the user's intake.

Rules:
1. Return ONLY a JSON object of the shape {\"version\": 1, \"title\": string, \"steps\": [step]} \
   with no prose, no markdown, no code fences.
2. Each step has a \"type\" of exactly one of: \"breathing\", \"grounding\", \"muscle_release\", \"affirmation\".
3. breathing steps carry {\"pattern\": string, \"seconds\": number}; grounding steps carry \
   {\"prompt\": string, \"seconds\": number}; muscle_release steps carry {\"area\": string, \"seconds\": number}; \
   affirmation steps carry {\"text\": string}.
4. The summed seconds of all steps must not exceed 180.
5. If the intake contains a personalized phrase, use it in an affirmation step.
6. Never diagnose, never name conditions, never mention medication or clinical treatment.";

/// Fixed system prompt for check-in triage.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You triage a short daily mood check-in. You are not a clinician and must not diagnose.

Return ONLY a JSON object of the shape \
{\"severity\": 0|1|2|3, \"reason\": string, \"suggested_path\": \"rescue\"|\"exercise\"|\"journal\"}.

Severity scale:
0 = no distress, 1 = mild distress, 2 = concerning distress, 3 = imminent risk of harm.
Use \"rescue\" for severity 2 or 3. Keep the reason to one sentence without clinical terms.";

/// Fixed system prompt for the low-severity micro-exercise.
pub const EXERCISE_SYSTEM_PROMPT: &str = "\
You write one short coping micro-exercise for someone who just checked in with low or mild distress.

Return ONLY a JSON object of the shape \
{\"title\": string, \"duration_sec\": number, \"steps\": [string], \"prompt\": string (optional)}.
duration_sec must be between 30 and 90. Use plain, gentle language. \
Never diagnose and never mention medication or clinical treatment.";

/// Builds the system and user turns for each completion the service issues.
pub struct PromptComposer;

impl PromptComposer {
    pub fn panic_plan(request: &PanicPlanRequest) -> Result<Vec<ChatMessage>, DomainError> {
        let system = match request.system_prompt_override() {
            Some(custom) => {
                warn!(
                    "Caller supplied a custom system prompt ({} chars); default plan constraints are not applied",
                    custom.len()
                );
                custom
            }
            None => PANIC_PLAN_SYSTEM_PROMPT,
        };

        let default_intake = Intake::default();
        let intake = request.intake.as_ref().unwrap_or(&default_intake);
        let user = serialize(&json!({ "intake": intake }))?;

        Ok(vec![ChatMessage::system(system), ChatMessage::user(user)])
    }

    pub fn classification(checkin: &CheckIn) -> Result<Vec<ChatMessage>, DomainError> {
        let user = serialize(&json!({ "checkin": checkin }))?;
        Ok(vec![
            ChatMessage::system(CLASSIFIER_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ])
    }

    pub fn exercise(
        checkin: &CheckIn,
        classification: &Classification,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let user = serialize(&json!({
            "checkin": checkin,
            "classification": classification,
        }))?;
        Ok(vec![
            ChatMessage::system(EXERCISE_SYSTEM_PROMPT),
            ChatMessage::user(user),
        ])
    }
}

fn serialize(value: &serde_json::Value) -> Result<String, DomainError> {
    serde_json::to_string(value)
        .map_err(|e| DomainError::internal(format!("failed to serialize prompt payload: {}", e)))
}
