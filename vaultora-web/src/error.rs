//! HTTP error mapping.

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use vaultora_core::error::CoreError;

/// `CoreError` as an HTTP response: `{ "success": false, "error": {code, details} }`
#[derive(Debug)]
pub struct ApiError(pub CoreError);

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a CoreError,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        Self(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            CoreError::ValidationError(_) | CoreError::SerializationError(_) => {
                StatusCode::BAD_REQUEST
            }
            CoreError::CredentialNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.0.is_expected() {
            tracing::warn!("{}", self.0);
        } else {
            tracing::error!("{}", self.0);
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            success: false,
            error: &self.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (CoreError::ValidationError("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::CredentialNotFound("1".into()), StatusCode::NOT_FOUND),
            (CoreError::StorageError("db".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status_code(), status);
        }
    }
}
