use crate::domain::{CallerIdentity, CheckIn, DomainError};

/// Checks that run before anything is sent upstream.
///
/// Only caller identity and the presence of the check-in record are enforced;
/// any other field in the payload is passed through.
pub struct RequestValidator;

impl RequestValidator {
    pub fn require_caller(caller: Option<&CallerIdentity>) -> Result<&CallerIdentity, DomainError> {
        caller.ok_or_else(|| DomainError::unauthenticated("Sign-in required."))
    }

    pub fn require_check_in(checkin: Option<CheckIn>) -> Result<CheckIn, DomainError> {
        checkin.ok_or_else(|| DomainError::invalid_argument("checkin is required"))
    }
}
