use std::collections::HashMap;
use std::sync::RwLock;
use validator::Validate;

use super::commands::CreateProductRequest;
use super::entity::Product;
use super::errors::ProductError;

// ============================================================================
// Product Catalog - In-memory product registry
// ============================================================================

#[derive(Default)]
pub struct ProductCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, request: CreateProductRequest) -> Result<Product, ProductError> {
        request.validate()?;

        let product = Product::from_request(request);
        let mut products = self.products.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        products.insert(product.id.clone(), product.clone());

        tracing::info!(product_id = %product.id, sku_code = %product.sku_code, "Product created");
        Ok(product)
    }

    pub fn get(&self, id: &str) -> Result<Product, ProductError> {
        let products = self.products.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        products
            .get(id)
            .cloned()
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Oldest first, at most `limit` products
    pub fn list(&self, limit: usize) -> Vec<Product> {
        let products = self.products.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        all.truncate(limit);
        all
    }
}
