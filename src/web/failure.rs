use actix_web::error::{JsonPayloadError, PayloadError, QueryPayloadError};
use std::fmt;
use std::io;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::order::OrderError;
use crate::domain::product::ProductError;

// ============================================================================
// Failure - Everything a request can end with besides success
// ============================================================================
//
// Entry points return `Result<T, Failure>`; the error translator is the only
// place a `Failure` becomes an HTTP response.
//
// ============================================================================

/// Key validator uses for errors that belong to the whole object
const OBJECT_LEVEL_KEY: &str = "__all__";

/// One offending field of a structured (request body) validation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldViolation {
    /// `None` when the error is not tied to a single field
    pub field: Option<String>,
    pub message: String,
}

/// One violated constraint on a method parameter, addressed by property path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstraintViolation {
    pub property_path: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("client aborted the connection: {0}")]
    TransportAborted(#[source] io::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("validation failed for {object_name}")]
    FieldValidation {
        object_name: String,
        errors: Vec<FieldViolation>,
    },

    #[error("constraint violation on {} parameter(s)", .0.len())]
    ConstraintViolation(Vec<ConstraintViolation>),

    #[error("{0}")]
    Unchecked(String),

    #[error(transparent)]
    Unclassified(anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    TransportAborted,
    NotFound,
    FieldValidation,
    ConstraintViolation,
    Unchecked,
    Unclassified,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::TransportAborted => "transport_aborted",
            FailureKind::NotFound => "not_found",
            FailureKind::FieldValidation => "field_validation",
            FailureKind::ConstraintViolation => "constraint_violation",
            FailureKind::Unchecked => "unchecked",
            FailureKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// io error kinds that mean the peer is gone
pub fn is_transport_abort(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::BrokenPipe
    )
}

impl Failure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::TransportAborted(_) => FailureKind::TransportAborted,
            Failure::NotFound(_) => FailureKind::NotFound,
            Failure::FieldValidation { .. } => FailureKind::FieldValidation,
            Failure::ConstraintViolation(_) => FailureKind::ConstraintViolation,
            Failure::Unchecked(_) => FailureKind::Unchecked,
            Failure::Unclassified(_) => FailureKind::Unclassified,
        }
    }

    pub fn unclassified(error: impl Into<anyhow::Error>) -> Self {
        Failure::Unclassified(error.into())
    }

    /// Classify an I/O error: a vanished peer is a transport abort, anything
    /// else stays unclassified.
    pub fn from_io(error: io::Error) -> Self {
        if is_transport_abort(error.kind()) {
            Failure::TransportAborted(error)
        } else {
            Failure::Unclassified(anyhow::Error::new(error))
        }
    }

    /// Body validation errors of `object_name`, one violation per message
    pub fn field_validation(object_name: impl Into<String>, errors: &ValidationErrors) -> Self {
        let errors = flatten(errors)
            .into_iter()
            .map(|(field, message)| FieldViolation { field, message })
            .collect();

        Failure::FieldValidation {
            object_name: object_name.into(),
            errors,
        }
    }

    /// Parameter validation errors of `method`, addressed as `method.param`
    pub fn constraint_violation(method: &str, errors: &ValidationErrors) -> Self {
        let violations = flatten(errors)
            .into_iter()
            .map(|(field, message)| ConstraintViolation {
                property_path: match field {
                    Some(field) => format!("{}.{}", method, field),
                    None => method.to_string(),
                },
                message,
            })
            .collect();

        Failure::ConstraintViolation(violations)
    }

    /// Failure raised while extracting a JSON request body
    pub fn from_json_error(error: JsonPayloadError) -> Self {
        match error {
            JsonPayloadError::Payload(PayloadError::Io(e)) => Failure::from_io(e),
            JsonPayloadError::Payload(PayloadError::Incomplete(cause)) => {
                Failure::TransportAborted(cause.unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::ConnectionAborted, "request payload is incomplete")
                }))
            }
            other => Failure::Unclassified(anyhow::Error::msg(other.to_string())),
        }
    }

    pub fn from_query_error(error: QueryPayloadError) -> Self {
        Failure::Unclassified(anyhow::Error::msg(error.to_string()))
    }
}

/// Flatten nested validator errors into (field path, message) pairs, sorted.
/// Object-level errors have no field.
fn flatten(errors: &ValidationErrors) -> Vec<(Option<String>, String)> {
    let mut out = Vec::new();
    collect(None, errors, &mut out);
    out.sort();
    out
}

fn collect(
    prefix: Option<&str>,
    errors: &ValidationErrors,
    out: &mut Vec<(Option<String>, String)>,
) {
    for (name, kind) in errors.errors() {
        let name = match *name {
            OBJECT_LEVEL_KEY => OBJECT_LEVEL_KEY.to_string(),
            field => wire_name(field),
        };
        let path = match (prefix, name.as_str()) {
            (prefix, OBJECT_LEVEL_KEY) => prefix.map(str::to_string),
            (Some(prefix), name) => Some(format!("{}.{}", prefix, name)),
            (None, name) => Some(name.to_string()),
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push((path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(path.as_deref(), nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path.as_deref().unwrap_or_default(), index);
                    collect(Some(&item_path), nested, out);
                }
            }
        }
    }
}

/// validator reports Rust field names; request bodies are camelCase on the wire
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' && !out.is_empty() {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ============================================================================
// Domain error conversions
// ============================================================================

impl From<OrderError> for Failure {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::InvalidRequest(errors) => Failure::field_validation("placeOrderRequest", &errors),
            OrderError::OutOfStock(_) => Failure::Unchecked(error.to_string()),
            OrderError::Inventory(_) | OrderError::Store(_) => Failure::Unclassified(error.into()),
        }
    }
}

impl From<ProductError> for Failure {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(_) => Failure::NotFound(error.to_string()),
            ProductError::InvalidRequest(errors) => {
                Failure::field_validation("createProductRequest", &errors)
            }
        }
    }
}

impl From<io::Error> for Failure {
    fn from(error: io::Error) -> Self {
        Failure::from_io(error)
    }
}
