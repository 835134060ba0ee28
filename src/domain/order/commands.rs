use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

/// Request to place a single-line order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    #[validate(custom(function = "crate::domain::validation::not_blank"))]
    pub sku_code: String,

    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub quantity: i32,

    #[validate(
        custom(function = "crate::domain::validation::positive_price"),
        custom(function = "crate::domain::validation::price_scale")
    )]
    pub price: Decimal,
}

impl PlaceOrderRequest {
    pub fn new(sku_code: impl Into<String>, quantity: i32, price: Decimal) -> Self {
        Self {
            sku_code: sku_code.into(),
            quantity,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes() {
        let request = PlaceOrderRequest::new("iphone_15", 1, Decimal::new(99900, 2));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_sku_is_rejected() {
        let request = PlaceOrderRequest::new("   ", 1, Decimal::ONE);
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
    }

    #[test]
    fn test_price_and_quantity_rejected_together() {
        let request = PlaceOrderRequest::new("iphone_15", 0, Decimal::ZERO);
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("quantity"));
    }

    #[test]
    fn test_price_beyond_two_decimals_is_rejected() {
        let request = PlaceOrderRequest::new("iphone_15", 1, Decimal::new(10005, 3));
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["price"][0].code, "scale");
    }

    #[test]
    fn test_request_uses_camel_case_on_the_wire() {
        let json = r#"{"skuCode":"iphone_15","quantity":2,"price":"10.50"}"#;
        let request: PlaceOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.sku_code, "iphone_15");
        assert_eq!(request.quantity, 2);
        assert_eq!(request.price, Decimal::new(1050, 2));
    }
}
