use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use super::error_mapper::ErrorMap;
use super::failure::FailureKind;

// ============================================================================
// Response envelopes
// ============================================================================

/// Uniform response body: `data` on success, `errors` on failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericResponse<T = ()> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorMap>,

    pub message: String,
}

impl<T> GenericResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            errors: None,
            message: message.into(),
        }
    }
}

impl GenericResponse {
    pub fn error(errors: ErrorMap, message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: Some(errors),
            message: message.into(),
        }
    }
}

/// Translated failure, ready to be written to the client
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: StatusCode,
    pub kind: FailureKind,
    /// `None` when nothing may be written back (the client is gone)
    pub body: Option<GenericResponse>,
}

impl ErrorResponse {
    pub fn with_body(status: StatusCode, kind: FailureKind, body: GenericResponse) -> Self {
        Self {
            status,
            kind,
            body: Some(body),
        }
    }

    pub fn empty(status: StatusCode, kind: FailureKind) -> Self {
        Self {
            status,
            kind,
            body: None,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Some(body) => write!(f, "{} ({}): {}", self.status, self.kind, body.message),
            None => write!(f, "{} ({})", self.status, self.kind),
        }
    }
}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        match &self.body {
            Some(body) => HttpResponse::build(self.status).json(body),
            None => HttpResponse::build(self.status).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::error_mapper;
    use serde_json::json;

    #[test]
    fn test_error_body_shape() {
        let body = GenericResponse::error(error_mapper::from_message("boom"), "Something failed");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"errors": {"message": "boom"}, "message": "Something failed"})
        );
    }

    #[test]
    fn test_success_body_shape() {
        let body = GenericResponse::success(json!({"commandId": "abc"}), "Order placed successfully");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": {"commandId": "abc"}, "message": "Order placed successfully"})
        );
    }

    #[test]
    fn test_empty_response_has_no_body() {
        let response = ErrorResponse::empty(StatusCode::INTERNAL_SERVER_ERROR, FailureKind::TransportAborted);
        let http = response.error_response();

        assert_eq!(http.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(http.headers().get("content-type").is_none());
    }
}
