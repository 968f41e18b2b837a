use serde::{Deserialize, Serialize};

use super::Completion;

/// Upper bound on the summed duration of a generated plan, in seconds.
pub const MAX_PLAN_SECONDS: u32 = 180;

/// One coping action in a panic plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanStep {
    Breathing {
        pattern: String,
        seconds: u32,
    },
    Grounding {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<u32>,
    },
    #[serde(alias = "muscle-release", alias = "muscle")]
    MuscleRelease {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        area: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seconds: Option<u32>,
    },
    Affirmation {
        text: String,
    },
}

impl PlanStep {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanStep::Breathing { .. } => "breathing",
            PlanStep::Grounding { .. } => "grounding",
            PlanStep::MuscleRelease { .. } => "muscle_release",
            PlanStep::Affirmation { .. } => "affirmation",
        }
    }

    pub fn seconds(&self) -> Option<u32> {
        match self {
            PlanStep::Breathing { seconds, .. } => Some(*seconds),
            PlanStep::Grounding { seconds, .. } | PlanStep::MuscleRelease { seconds, .. } => {
                *seconds
            }
            PlanStep::Affirmation { .. } => None,
        }
    }

    /// One-line human readable summary.
    pub fn describe(&self) -> String {
        let body = match self {
            PlanStep::Breathing { pattern, .. } => format!("{} breathing", pattern),
            PlanStep::Grounding { prompt, .. } => {
                prompt.clone().unwrap_or_else(|| "grounding".to_string())
            }
            PlanStep::MuscleRelease { area, .. } => match area {
                Some(area) => format!("release tension in {}", area),
                None => "muscle release".to_string(),
            },
            PlanStep::Affirmation { text } => format!("\"{}\"", text),
        };

        match self.seconds() {
            Some(s) => format!("[{}] {} ({}s)", self.kind(), body, s),
            None => format!("[{}] {}", self.kind(), body),
        }
    }
}

/// A generated panic plan. The service relays model output without checking it
/// against this shape; this type is for consumers that want a typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    #[serde(default = "default_version")]
    pub version: u32,
    pub title: String,
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

fn default_version() -> u32 {
    1
}

impl GeneratedPlan {
    /// Typed view of a completion, or `None` when the model output does not
    /// match the plan shape.
    pub fn from_completion(completion: &Completion) -> Option<Self> {
        completion
            .as_json()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Summed step durations. Widened to `u64` since the values come straight
    /// from model output.
    pub fn total_seconds(&self) -> u64 {
        self.steps
            .iter()
            .filter_map(PlanStep::seconds)
            .map(u64::from)
            .sum()
    }

    pub fn exceeds_time_budget(&self) -> bool {
        self.total_seconds() > u64::from(MAX_PLAN_SECONDS)
    }
}
