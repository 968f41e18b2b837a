use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::envelope::{CallableError, CallableErrorBody};
use crate::domain::DomainError;

/// A [`DomainError`] on its way back to an HTTP caller.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn http_status(&self) -> StatusCode {
        match &self.0 {
            DomainError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            DomainError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        match &self.0 {
            DomainError::Unauthenticated(_) | DomainError::InvalidArgument(_) => {
                tracing::warn!(error = %self.0, "Rejected callable request");
            }
            DomainError::Upstream { status: upstream, .. } => {
                tracing::error!(upstream_status = %upstream, error = %self.0, "Completion API failed");
            }
            _ => {
                tracing::error!(error = %self.0, "Callable request failed");
            }
        }

        let body = CallableErrorBody {
            error: CallableError {
                status: self.0.status_code().to_string(),
                message: self.0.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_taxonomy_to_http_status() {
        let cases = [
            (DomainError::unauthenticated("x"), StatusCode::UNAUTHORIZED),
            (DomainError::invalid_argument("x"), StatusCode::BAD_REQUEST),
            (DomainError::upstream(500, "server error"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::malformed("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).http_status(), expected);
        }
    }
}
