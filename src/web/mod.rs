// ============================================================================
// Web Layer - HTTP boundary
// ============================================================================
//
// Every entry point returns `Result<T, Failure>`. The error translator maps
// each failure to exactly one response:
// - failure:      the failure taxonomy and conversions from domain errors
// - error_mapper: builds the `{"message": ...}` error detail
// - localizer:    message key → user-facing text
// - response:     response envelopes, actix integration
// - translator:   ordered failure → response rules
// - routes:       actix handlers
// - server:       app data wiring and the HTTP server
//
// ============================================================================

pub mod failure;
pub mod error_mapper;
pub mod localizer;
pub mod response;
pub mod translator;
pub mod routes;
pub mod server;

pub use failure::{ConstraintViolation, Failure, FailureKind, FieldViolation};
pub use localizer::{MessageLocalizer, StaticLocalizer};
pub use response::{ErrorResponse, GenericResponse};
pub use server::{serve, AppContext};
pub use translator::ErrorTranslator;
