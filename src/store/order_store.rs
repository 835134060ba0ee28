use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::order::Order;

// ============================================================================
// Order Store - Persistence port for placed orders
// ============================================================================

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a newly placed order. Ownership moves into the store.
    async fn save(&self, order: Order) -> Result<()>;

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>>;

    async fn count(&self) -> Result<usize>;
}

/// Order store kept in process memory
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored order
    pub fn all(&self) -> Vec<Order> {
        let orders = self.orders.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        orders.values().cloned().collect()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: Order) -> Result<()> {
        let mut orders = self.orders.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if orders.contains_key(order.order_number.as_str()) {
            anyhow::bail!("Order {} already exists", order.order_number);
        }
        orders.insert(order.order_number.as_str().to_string(), order);
        Ok(())
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(orders.get(order_number).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let orders = self.orders.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::PlaceOrderRequest;
    use rust_decimal::Decimal;

    fn sample_order() -> Order {
        Order::from_request(&PlaceOrderRequest::new("iphone_15", 2, Decimal::new(1999, 2)))
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = InMemoryOrderStore::new();
        let order = sample_order();
        let number = order.order_number.clone();

        store.save(order.clone()).await.unwrap();

        let found = store.find_by_order_number(number.as_str()).await.unwrap();
        assert_eq!(found, Some(order));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_is_rejected() {
        let store = InMemoryOrderStore::new();
        let order = sample_order();

        store.save(order.clone()).await.unwrap();
        assert!(store.save(order).await.is_err());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_order_returns_none() {
        let store = InMemoryOrderStore::new();
        assert!(store.find_by_order_number("nope").await.unwrap().is_none());
        assert!(store.all().is_empty());
    }
}
