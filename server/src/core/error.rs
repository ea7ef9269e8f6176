use crate::repositories::RepositoryError;
use crate::validation::ValidationFailure;
use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// Error returned by the HTTP handlers, rendered as a JSON body
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    details: Option<String>,
    errors: Vec<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    // Common error constructors
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Wraps a repository failure; every operational failure is a 400
    pub fn operation_failed(message: impl Into<String>, err: &RepositoryError) -> Self {
        Self::bad_request(message).with_details(err.to_string())
    }
}

impl From<ValidationFailure> for AppError {
    fn from(err: ValidationFailure) -> Self {
        Self::bad_request(err.to_string()).with_errors(err.messages)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::bad_request("Malformed request body").with_details(err.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_maps_to_bad_request_with_all_messages() {
        let err = AppError::from(ValidationFailure {
            messages: vec!["Name is required.".into(), "Salary must be a non-negative value.".into()],
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("Validation failed"));
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(AppError::not_found("missing").status(), StatusCode::NOT_FOUND);
    }
}
