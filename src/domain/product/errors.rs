use validator::ValidationErrors;

// ============================================================================
// Product Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(String),

    #[error("Invalid product request: {0}")]
    InvalidRequest(#[from] ValidationErrors),
}
