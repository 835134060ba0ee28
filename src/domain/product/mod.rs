// ============================================================================
// Product Domain - Product catalog
// ============================================================================
//
// - Commands (CreateProductRequest, ListProductsQuery)
// - Entity (Product)
// - Errors (ProductError enum)
// - Catalog (ProductCatalog)
//
// ============================================================================

pub mod commands;
pub mod entity;
pub mod errors;
pub mod catalog;

pub use commands::*;
pub use entity::*;
pub use errors::*;
pub use catalog::*;
