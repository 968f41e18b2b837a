use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User-provided situation description for a panic plan.
///
/// No schema is enforced: triggers, symptoms, preferences, duration and any
/// other field are forwarded to the prompt as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Intake(Value);

impl Intake {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn field_count(&self) -> usize {
        self.0.as_object().map(Map::len).unwrap_or(0)
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

/// Payload of the `generatePanicPlan` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanicPlanRequest {
    #[serde(default)]
    pub intake: Option<Intake>,

    /// Replaces the default system prompt when present and non-blank.
    #[serde(default, rename = "systemPrompt", alias = "system_prompt")]
    pub system_prompt: Option<String>,
}

impl PanicPlanRequest {
    pub fn new(intake: Intake) -> Self {
        Self {
            intake: Some(intake),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// The caller's system prompt override, ignoring blank strings.
    pub fn system_prompt_override(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}
