use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commands::PlaceOrderRequest;
use super::value_objects::OrderNumber;

// ============================================================================
// Order Entity
// ============================================================================

/// A persisted order line. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: OrderNumber,
    pub sku_code: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl Order {
    /// Build an order from a request, assigning a fresh order number
    pub fn from_request(request: &PlaceOrderRequest) -> Self {
        Self {
            order_number: OrderNumber::generate(),
            sku_code: request.sku_code.clone(),
            quantity: request.quantity,
            price: request.price,
        }
    }
}
