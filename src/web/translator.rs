use actix_web::http::StatusCode;
use std::sync::Arc;

use crate::domain::product::ProductError;
use crate::metrics::Metrics;

use super::error_mapper;
use super::failure::{Failure, FailureKind};
use super::localizer::{MessageLocalizer, StaticLocalizer, GENERAL_CONTENT_KEY, PRODUCT_NOT_FOUND_KEY};
use super::response::{ErrorResponse, GenericResponse};

// ============================================================================
// Error Translator - The single failure → response boundary
// ============================================================================
//
// Rules are tried in order and the first matching predicate wins. Order is
// most specific first: an unclassified error that wraps a missing product is
// answered as such, never by the catch-all.
//
// Only the requester's own connection counts as a transport abort, and that
// is classified where the request body is read. A reset deeper in the cause
// chain belongs to a dependency and gets the catch-all diagnostic.
//
// ============================================================================

type Predicate = fn(&Failure) -> bool;
type Responder = fn(&Failure, &dyn MessageLocalizer) -> ErrorResponse;

struct Rule {
    kind: FailureKind,
    matches: Predicate,
    respond: Responder,
}

static RULES: [Rule; 6] = [
    Rule {
        kind: FailureKind::TransportAborted,
        matches: is_transport_aborted,
        respond: respond_transport_aborted,
    },
    Rule {
        kind: FailureKind::NotFound,
        matches: is_not_found,
        respond: respond_not_found,
    },
    Rule {
        kind: FailureKind::FieldValidation,
        matches: is_field_validation,
        respond: respond_field_validation,
    },
    Rule {
        kind: FailureKind::ConstraintViolation,
        matches: is_constraint_violation,
        respond: respond_constraint_violation,
    },
    Rule {
        kind: FailureKind::Unchecked,
        matches: is_unchecked,
        respond: respond_unchecked,
    },
    Rule {
        kind: FailureKind::Unclassified,
        matches: always,
        respond: respond_unclassified,
    },
];

pub struct ErrorTranslator {
    localizer: Arc<dyn MessageLocalizer>,
    metrics: Option<Arc<Metrics>>,
}

impl ErrorTranslator {
    pub fn new(localizer: Arc<dyn MessageLocalizer>) -> Self {
        Self {
            localizer,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Convert a failure into exactly one response. Never fails.
    pub fn translate(&self, failure: Failure) -> ErrorResponse {
        let rule = RULES
            .iter()
            .find(|rule| (rule.matches)(&failure))
            .unwrap_or(&RULES[RULES.len() - 1]);

        let response = (rule.respond)(&failure, self.localizer.as_ref());

        match rule.kind {
            FailureKind::TransportAborted => {
                tracing::debug!(error = %failure, "Client went away, no response body written");
            }
            _ if response.status.is_server_error() => {
                tracing::error!(
                    kind = %rule.kind,
                    status = response.status.as_u16(),
                    error = %failure,
                    "Request failed"
                );
            }
            _ => {
                tracing::warn!(
                    kind = %rule.kind,
                    status = response.status.as_u16(),
                    error = %failure,
                    "Request rejected"
                );
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_error_response(rule.kind.as_str(), response.status.as_u16());
        }

        response
    }

    /// Boundary adapter for entry points: pass successes through, translate failures
    pub fn respond<T, E>(&self, result: Result<T, E>) -> Result<T, ErrorResponse>
    where
        E: Into<Failure>,
    {
        result.map_err(|e| self.translate(e.into()))
    }
}

impl Default for ErrorTranslator {
    fn default() -> Self {
        Self::new(Arc::new(StaticLocalizer::english()))
    }
}

// ============================================================================
// Predicates
// ============================================================================

fn is_transport_aborted(failure: &Failure) -> bool {
    matches!(failure, Failure::TransportAborted(_))
}

fn is_not_found(failure: &Failure) -> bool {
    match failure {
        Failure::NotFound(_) => true,
        Failure::Unclassified(_) => wrapped_not_found(failure).is_some(),
        _ => false,
    }
}

fn is_field_validation(failure: &Failure) -> bool {
    matches!(failure, Failure::FieldValidation { .. })
}

fn is_constraint_violation(failure: &Failure) -> bool {
    matches!(failure, Failure::ConstraintViolation(_))
}

fn is_unchecked(failure: &Failure) -> bool {
    matches!(failure, Failure::Unchecked(_))
}

fn always(_: &Failure) -> bool {
    true
}

fn wrapped_not_found(failure: &Failure) -> Option<&ProductError> {
    match failure {
        Failure::Unclassified(error) => error
            .chain()
            .filter_map(|cause| cause.downcast_ref::<ProductError>())
            .find(|e| matches!(e, ProductError::NotFound(_))),
        _ => None,
    }
}

// ============================================================================
// Responders
// ============================================================================

fn general_error(
    status: StatusCode,
    kind: FailureKind,
    errors: error_mapper::ErrorMap,
    localizer: &dyn MessageLocalizer,
) -> ErrorResponse {
    let body = GenericResponse::error(errors, localizer.translate(GENERAL_CONTENT_KEY));
    ErrorResponse::with_body(status, kind, body)
}

// The connection is gone: writing a body would fail, so none is produced.
fn respond_transport_aborted(_: &Failure, _: &dyn MessageLocalizer) -> ErrorResponse {
    ErrorResponse::empty(StatusCode::INTERNAL_SERVER_ERROR, FailureKind::TransportAborted)
}

fn respond_not_found(failure: &Failure, localizer: &dyn MessageLocalizer) -> ErrorResponse {
    let message = match (failure, wrapped_not_found(failure)) {
        (Failure::NotFound(message), _) => message.clone(),
        (_, Some(not_found)) => not_found.to_string(),
        (other, None) => other.to_string(),
    };

    let body = GenericResponse::error(
        error_mapper::from_message(message),
        localizer.translate(PRODUCT_NOT_FOUND_KEY),
    );
    ErrorResponse::with_body(StatusCode::NOT_FOUND, FailureKind::NotFound, body)
}

fn respond_field_validation(failure: &Failure, localizer: &dyn MessageLocalizer) -> ErrorResponse {
    let entries = match failure {
        Failure::FieldValidation { object_name, errors } => errors
            .iter()
            .map(|violation| {
                let field = violation.field.as_deref().unwrap_or(object_name);
                format!("{}: {}", field, violation.message)
            })
            .collect(),
        other => vec![other.to_string()],
    };

    general_error(
        StatusCode::BAD_REQUEST,
        FailureKind::FieldValidation,
        error_mapper::from_messages(entries),
        localizer,
    )
}

fn respond_constraint_violation(failure: &Failure, localizer: &dyn MessageLocalizer) -> ErrorResponse {
    let entries = match failure {
        Failure::ConstraintViolation(violations) => violations
            .iter()
            .map(|violation| format!("{}: {}", violation.property_path, violation.message))
            .collect(),
        other => vec![other.to_string()],
    };

    general_error(
        StatusCode::BAD_REQUEST,
        FailureKind::ConstraintViolation,
        error_mapper::from_messages(entries),
        localizer,
    )
}

fn respond_unchecked(failure: &Failure, localizer: &dyn MessageLocalizer) -> ErrorResponse {
    general_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        FailureKind::Unchecked,
        error_mapper::from_message(failure.to_string()),
        localizer,
    )
}

fn respond_unclassified(failure: &Failure, localizer: &dyn MessageLocalizer) -> ErrorResponse {
    let errors = match failure {
        Failure::Unclassified(error) => error_mapper::from_error(error),
        other => error_mapper::from_error(&anyhow::Error::msg(other.to_string())),
    };

    general_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        FailureKind::Unclassified,
        errors,
        localizer,
    )
}
