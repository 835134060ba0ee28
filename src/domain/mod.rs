// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each domain has its own subdirectory with:
// - Commands
// - Entity
// - Errors
// - Command handler / catalog
//
// This layer knows nothing about HTTP. The web module translates its
// errors into responses.
//
// ============================================================================

pub mod order;
pub mod product;
pub mod validation;
