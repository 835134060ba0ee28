use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Product Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(custom(function = "crate::domain::validation::not_blank"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: String,

    #[validate(custom(function = "crate::domain::validation::not_blank"))]
    pub sku_code: String,

    #[validate(
        custom(function = "crate::domain::validation::positive_price"),
        custom(function = "crate::domain::validation::price_scale")
    )]
    pub price: Decimal,
}

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters of the product listing
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListProductsQuery {
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl ListProductsQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "iPhone 15".to_string(),
            description: "Apple phone".to_string(),
            sku_code: "iphone_15".to_string(),
            price: Decimal::new(99900, 2),
        }
    }

    #[test]
    fn test_valid_product_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_blank_name_and_zero_price_rejected() {
        let request = CreateProductRequest {
            name: " ".to_string(),
            price: Decimal::ZERO,
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_list_query_limit_bounds() {
        assert!(ListProductsQuery { limit: None }.validate().is_ok());
        assert!(ListProductsQuery { limit: Some(100) }.validate().is_ok());
        assert!(ListProductsQuery { limit: Some(0) }.validate().is_err());
        assert!(ListProductsQuery { limit: Some(101) }.validate().is_err());
    }

    #[test]
    fn test_list_query_default_limit() {
        assert_eq!(ListProductsQuery::default().limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(ListProductsQuery { limit: Some(5) }.limit(), 5);
    }
}
