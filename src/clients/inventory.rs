use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

// ============================================================================
// Inventory Checker - Remote stock availability lookup
// ============================================================================
//
// The inventory service owns stock levels. The order side only asks
// "is (sku, quantity) available?" and never reserves anything.
//
// ============================================================================

#[async_trait]
pub trait InventoryChecker: Send + Sync {
    /// Returns true when at least `quantity` units of `sku_code` are in stock
    async fn is_in_stock(&self, sku_code: &str, quantity: i32) -> Result<bool>;
}

/// Inventory checker backed by the inventory service's HTTP API
pub struct HttpInventoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpInventoryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/inventory", self.base_url)
    }
}

#[async_trait]
impl InventoryChecker for HttpInventoryClient {
    async fn is_in_stock(&self, sku_code: &str, quantity: i32) -> Result<bool> {
        let quantity_param = quantity.to_string();
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("skuCode", sku_code), ("quantity", quantity_param.as_str())])
            .send()
            .await
            .with_context(|| format!("Inventory request failed for skuCode {}", sku_code))?
            .error_for_status()
            .context("Inventory service returned an error status")?;

        let in_stock = response
            .json::<bool>()
            .await
            .context("Inventory service returned a malformed body")?;

        tracing::debug!(sku_code = %sku_code, quantity, in_stock, "Inventory checked");

        Ok(in_stock)
    }
}

/// Inventory held in process memory, keyed by SKU code
#[derive(Default)]
pub struct InMemoryInventory {
    stock: RwLock<HashMap<String, i32>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let stock = levels.into_iter().map(|(sku, qty)| (sku.into(), qty)).collect();
        Self {
            stock: RwLock::new(stock),
        }
    }

    pub fn set_stock(&self, sku_code: impl Into<String>, quantity: i32) {
        let mut stock = self.stock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        stock.insert(sku_code.into(), quantity);
    }
}

#[async_trait]
impl InventoryChecker for InMemoryInventory {
    async fn is_in_stock(&self, sku_code: &str, quantity: i32) -> Result<bool> {
        let stock = self.stock.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(stock.get(sku_code).is_some_and(|available| *available >= quantity))
    }
}
