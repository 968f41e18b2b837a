use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonObject,
}

/// Which step of which operation a completion serves. Not sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPurpose {
    PanicPlan,
    Classification,
    Exercise,
}

impl CompletionPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionPurpose::PanicPlan => "panic_plan",
            CompletionPurpose::Classification => "classification",
            CompletionPurpose::Exercise => "exercise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    purpose: CompletionPurpose,
    response_format: ResponseFormat,
    temperature: f32,
}

impl CompletionOptions {
    pub fn new(purpose: CompletionPurpose) -> Self {
        Self {
            purpose,
            response_format: ResponseFormat::Text,
            temperature: 1.0,
        }
    }

    pub fn json(mut self) -> Self {
        self.response_format = ResponseFormat::JsonObject;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn purpose(&self) -> CompletionPurpose {
        self.purpose
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Raw model output: JSON when the text looks like an object or array,
/// otherwise the text itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Completion {
    Json(Value),
    PlainText(String),
}

impl Completion {
    /// Classifies response text. Text whose first non-whitespace character is
    /// `{` or `[` must parse as JSON.
    pub fn from_text(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            serde_json::from_str(trimmed)
                .map(Completion::Json)
                .map_err(|e| DomainError::malformed(format!("response looked like JSON but did not parse: {}", e)))
        } else {
            Ok(Completion::PlainText(text.to_string()))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Completion::Json(value) => Some(value),
            Completion::PlainText(_) => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Completion::Json(_))
    }

    pub fn into_value(self) -> Value {
        match self {
            Completion::Json(value) => value,
            Completion::PlainText(text) => Value::String(text),
        }
    }
}
