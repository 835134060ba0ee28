use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::CreateProductRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sku_code: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn from_request(request: CreateProductRequest) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            sku_code: request.sku_code,
            price: request.price,
            created_at: Utc::now(),
        }
    }
}
