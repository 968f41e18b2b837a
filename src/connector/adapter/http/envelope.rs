use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Incoming callable envelope: `{"data": <payload>}`.
#[derive(Debug, Default, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: Value,
}

impl CallableRequest {
    /// An empty body is an empty envelope.
    pub fn from_body(body: &[u8]) -> Result<Self, DomainError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| DomainError::invalid_argument(format!("request body is not a callable envelope: {}", e)))
    }

    /// Decode `data` into the operation payload. Anything other than an object
    /// carries no fields, so it decodes as the payload's default.
    pub fn into_payload<T: DeserializeOwned + Default>(self) -> Result<T, DomainError> {
        if !self.data.is_object() {
            return Ok(T::default());
        }
        serde_json::from_value(self.data)
            .map_err(|e| DomainError::invalid_argument(format!("invalid payload: {}", e)))
    }
}

/// Successful callable response: `{"result": <value>}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

impl<T> CallableResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// Failed callable response: `{"error": {"status": ..., "message": ...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallableErrorBody {
    pub error: CallableError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CallableError {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DailyCheckInRequest, PanicPlanRequest};

    #[test]
    fn empty_body_is_empty_payload() {
        let request = CallableRequest::from_body(b"  ").unwrap();
        let payload: PanicPlanRequest = request.into_payload().unwrap();
        assert!(payload.intake.is_none());
    }

    #[test]
    fn missing_check_in_survives_decoding() {
        let request = CallableRequest::from_body(br#"{"data": {"other": true}}"#).unwrap();
        let payload: DailyCheckInRequest = request.into_payload().unwrap();
        assert!(payload.checkin.is_none());
    }

    #[test]
    fn loosely_typed_check_in_is_accepted() {
        let request =
            CallableRequest::from_body(br#"{"data": {"checkin": {"mood": "3", "tags": "calm"}}}"#)
                .unwrap();
        let payload: DailyCheckInRequest = request.into_payload().unwrap();
        let checkin = payload.checkin.unwrap();
        assert_eq!(checkin.as_value()["mood"], "3");
        assert_eq!(checkin.mood(), Some(3.0));
    }

    #[test]
    fn non_object_data_is_empty_payload() {
        let request = CallableRequest::from_body(br#"{"data": "hello"}"#).unwrap();
        let payload: DailyCheckInRequest = request.into_payload().unwrap();
        assert!(payload.checkin.is_none());
    }

    #[test]
    fn non_string_system_prompt_is_invalid_argument() {
        let request = CallableRequest::from_body(br#"{"data": {"systemPrompt": 5}}"#).unwrap();
        let err = request.into_payload::<PanicPlanRequest>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn non_json_body_is_invalid_argument() {
        let err = CallableRequest::from_body(b"hello").unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }
}
