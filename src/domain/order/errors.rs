use validator::ValidationErrors;

// ============================================================================
// Order Placement Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Product with skuCode {0} is not in stock")]
    OutOfStock(String),

    #[error("Invalid order request: {0}")]
    InvalidRequest(#[from] ValidationErrors),

    #[error("Inventory check failed")]
    Inventory(#[source] anyhow::Error),

    #[error("Failed to save order")]
    Store(#[source] anyhow::Error),
}

impl OrderError {
    /// Label used for metrics and logs
    pub fn reason(&self) -> &'static str {
        match self {
            OrderError::OutOfStock(_) => "out_of_stock",
            OrderError::InvalidRequest(_) => "invalid_request",
            OrderError::Inventory(_) => "inventory_failure",
            OrderError::Store(_) => "store_failure",
        }
    }
}
