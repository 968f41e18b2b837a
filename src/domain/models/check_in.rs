use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

use super::Completion;
use crate::domain::DomainError;

/// Shortest and longest micro-exercise the exercise prompt asks for.
pub const EXERCISE_MIN_SECONDS: u32 = 30;
pub const EXERCISE_MAX_SECONDS: u32 = 90;

/// A mood/tag/note snapshot submitted by the user.
///
/// The record is forwarded to the classifier as the client sent it. `mood`,
/// `tags` and `note` are read for logging and rendering only, so an
/// unexpected type in any of them never rejects the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckIn(Value);

impl CheckIn {
    pub fn new(mood: f64, tags: Vec<String>) -> Self {
        Self(json!({ "mood": mood, "tags": tags }))
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert("note".to_string(), Value::String(note.into()));
        }
        self
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Mood as a number; numeric strings such as `"3"` are read too.
    pub fn mood(&self) -> Option<f64> {
        match self.0.get("mood")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        match self.0.get("tags") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn note(&self) -> Option<&str> {
        self.0.get("note").and_then(Value::as_str)
    }
}

impl Default for CheckIn {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

/// Payload of the `dailyCheckIn` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyCheckInRequest {
    #[serde(default)]
    pub checkin: Option<CheckIn>,
}

impl DailyCheckInRequest {
    pub fn new(checkin: CheckIn) -> Self {
        Self {
            checkin: Some(checkin),
        }
    }
}

/// Ordinal triage level produced by the classification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Number", into = "u8")]
pub enum Severity {
    None = 0,
    Mild = 1,
    Concerning = 2,
    ImminentRisk = 3,
}

impl Severity {
    /// Concerning or imminent risk: route to static crisis resources instead of
    /// a generated activity.
    pub fn is_elevated(&self) -> bool {
        *self >= Severity::Concerning
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Mild => "mild",
            Severity::Concerning => "concerning",
            Severity::ImminentRisk => "imminent_risk",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Severity::None),
            1 => Ok(Severity::Mild),
            2 => Ok(Severity::Concerning),
            3 => Ok(Severity::ImminentRisk),
            other => Err(format!("severity must be between 0 and 3, got {}", other)),
        }
    }
}

/// Models emit whole numbers as either `2` or `2.0`; both are accepted.
impl TryFrom<Number> for Severity {
    type Error = String;

    fn try_from(value: Number) -> Result<Self, Self::Error> {
        let level = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=3.0).contains(f))
                .map(|f| f as u64)
        });
        match level.and_then(|l| u8::try_from(l).ok()) {
            Some(level) => Severity::try_from(level),
            None => Err(format!(
                "severity must be a whole number between 0 and 3, got {}",
                value
            )),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.level()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.level(), self.as_str())
    }
}

/// Routing label suggested by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedPath {
    Rescue,
    Exercise,
    Journal,
}

impl SuggestedPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestedPath::Rescue => "rescue",
            SuggestedPath::Exercise => "exercise",
            SuggestedPath::Journal => "journal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub severity: Severity,

    #[serde(default)]
    pub reason: String,

    pub suggested_path: SuggestedPath,

    /// Additional fields returned by the model, relayed untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Classification {
    pub fn new(severity: Severity, reason: impl Into<String>, suggested_path: SuggestedPath) -> Self {
        Self {
            severity,
            reason: reason.into(),
            suggested_path,
            extra: Map::new(),
        }
    }

    pub fn from_completion(completion: &Completion) -> Result<Self, DomainError> {
        let value = completion.as_json().ok_or_else(|| {
            DomainError::malformed("classification response was plain text, expected a JSON object")
        })?;
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::malformed(format!("invalid classification: {}", e)))
    }
}

/// A single short coping activity generated for low-severity check-ins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub title: String,
    /// Kept as the model wrote it (`45` or `45.0`) and relayed unchanged.
    pub duration_sec: Number,

    #[serde(default)]
    pub steps: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exercise {
    pub fn from_completion(completion: &Completion) -> Result<Self, DomainError> {
        let value = completion.as_json().ok_or_else(|| {
            DomainError::malformed("exercise response was plain text, expected a JSON object")
        })?;
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::malformed(format!("invalid exercise: {}", e)))
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_sec.as_f64()
    }

    pub fn is_within_bounds(&self) -> bool {
        let range = f64::from(EXERCISE_MIN_SECONDS)..=f64::from(EXERCISE_MAX_SECONDS);
        self.duration_seconds().is_some_and(|d| range.contains(&d))
    }
}

/// Result of `dailyCheckIn`: the classification, plus an exercise when the
/// severity is below the elevated threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    #[serde(flatten)]
    pub classification: Classification,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Exercise>,
}

impl CheckInOutcome {
    pub fn classification_only(classification: Classification) -> Self {
        Self {
            classification,
            exercise: None,
        }
    }

    pub fn with_exercise(classification: Classification, exercise: Exercise) -> Self {
        Self {
            classification,
            exercise: Some(exercise),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_rejects_out_of_range_levels() {
        assert!(Severity::try_from(4u8).is_err());
        assert_eq!(Severity::try_from(2u8), Ok(Severity::Concerning));
    }

    #[test]
    fn classification_accepts_whole_float_severity() {
        let completion = Completion::Json(json!({
            "severity": 2.0,
            "reason": "r",
            "suggested_path": "rescue"
        }));
        let cls = Classification::from_completion(&completion).unwrap();
        assert_eq!(cls.severity, Severity::Concerning);
        assert!(cls.severity.is_elevated());
    }

    #[test]
    fn classification_rejects_fractional_or_negative_severity() {
        for severity in [json!(2.5), json!(-1), json!(4.0), json!(7)] {
            let completion = Completion::Json(json!({
                "severity": severity,
                "reason": "r",
                "suggested_path": "rescue"
            }));
            let err = Classification::from_completion(&completion).unwrap_err();
            assert!(matches!(err, DomainError::MalformedResponse(_)));
        }
    }

    #[test]
    fn severity_threshold_starts_at_concerning() {
        assert!(!Severity::None.is_elevated());
        assert!(!Severity::Mild.is_elevated());
        assert!(Severity::Concerning.is_elevated());
        assert!(Severity::ImminentRisk.is_elevated());
    }

    #[test]
    fn classification_parses_from_json_completion() {
        let completion = Completion::Json(json!({
            "severity": 1,
            "reason": "mild stress",
            "suggested_path": "exercise",
            "confidence": 0.8
        }));
        let cls = Classification::from_completion(&completion).unwrap();
        assert_eq!(cls.severity, Severity::Mild);
        assert_eq!(cls.suggested_path, SuggestedPath::Exercise);
        assert_eq!(cls.extra["confidence"], json!(0.8));
    }

    #[test]
    fn classification_rejects_plain_text() {
        let completion = Completion::PlainText("severity one".to_string());
        let err = Classification::from_completion(&completion).unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn classification_rejects_unknown_path() {
        let completion = Completion::Json(json!({
            "severity": 0,
            "reason": "ok",
            "suggested_path": "meditate"
        }));
        assert!(Classification::from_completion(&completion).is_err());
    }

    #[test]
    fn outcome_without_exercise_omits_the_field() {
        let outcome = CheckInOutcome::classification_only(Classification::new(
            Severity::ImminentRisk,
            "explicit risk language",
            SuggestedPath::Rescue,
        ));
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({"severity": 3, "reason": "explicit risk language", "suggested_path": "rescue"})
        );
    }

    #[test]
    fn outcome_merges_exercise_next_to_classification() {
        let exercise = Exercise {
            title: "Box breath".to_string(),
            duration_sec: Number::from(60),
            steps: vec!["Inhale 4".to_string(), "Hold 4".to_string()],
            prompt: None,
            extra: Map::new(),
        };
        let outcome = CheckInOutcome::with_exercise(
            Classification::new(Severity::Mild, "tired", SuggestedPath::Exercise),
            exercise,
        );
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["severity"], 1);
        assert_eq!(value["exercise"]["duration_sec"], 60);
        assert!(value["exercise"].get("prompt").is_none());
    }

    #[test]
    fn check_in_keeps_extra_fields() {
        let req: DailyCheckInRequest = serde_json::from_value(json!({
            "checkin": {"mood": 3, "tags": ["work"], "sleep_hours": 5}
        }))
        .unwrap();
        let checkin = req.checkin.unwrap();
        assert_eq!(checkin.mood(), Some(3.0));
        assert_eq!(checkin.tags(), vec!["work"]);
        assert_eq!(checkin.as_value()["sleep_hours"], 5);
    }

    #[test]
    fn check_in_with_unexpected_types_is_forwarded_as_sent() {
        let sent = json!({"mood": "3", "tags": "calm", "note": 12});
        let req: DailyCheckInRequest =
            serde_json::from_value(json!({ "checkin": sent.clone() })).unwrap();
        let checkin = req.checkin.unwrap();
        assert_eq!(checkin.mood(), Some(3.0));
        assert_eq!(checkin.tags(), vec!["calm"]);
        assert!(checkin.note().is_none());
        assert_eq!(serde_json::to_value(&checkin).unwrap(), sent);
    }

    #[test]
    fn built_check_in_carries_note() {
        let checkin = CheckIn::new(2.0, vec!["work".to_string()]).with_note("long day");
        assert_eq!(checkin.note(), Some("long day"));
        assert_eq!(checkin.mood(), Some(2.0));
    }

    #[test]
    fn null_check_in_counts_as_missing() {
        let req: DailyCheckInRequest = serde_json::from_value(json!({"checkin": null})).unwrap();
        assert!(req.checkin.is_none());
    }

    #[test]
    fn exercise_bounds() {
        let mut exercise: Exercise = serde_json::from_value(json!({
            "title": "Shoulder drop",
            "duration_sec": 45,
            "steps": ["Lift", "Drop"]
        }))
        .unwrap();
        assert!(exercise.is_within_bounds());
        exercise.duration_sec = Number::from(120);
        assert!(!exercise.is_within_bounds());
    }

    #[test]
    fn exercise_accepts_float_duration_and_relays_it() {
        let completion = Completion::Json(json!({
            "title": "t",
            "duration_sec": 45.0,
            "steps": ["a"]
        }));
        let exercise = Exercise::from_completion(&completion).unwrap();
        assert_eq!(exercise.duration_seconds(), Some(45.0));
        assert!(exercise.is_within_bounds());
        assert_eq!(serde_json::to_value(&exercise).unwrap()["duration_sec"], json!(45.0));
    }

    #[test]
    fn exercise_outside_bounds_still_parses() {
        let completion = Completion::Json(json!({
            "title": "Long walk",
            "duration_sec": 600,
            "steps": []
        }));
        let exercise = Exercise::from_completion(&completion).unwrap();
        assert!(!exercise.is_within_bounds());
    }
}
