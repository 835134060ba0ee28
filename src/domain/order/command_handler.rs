use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use crate::clients::InventoryChecker;
use crate::metrics::Metrics;
use crate::store::OrderStore;

use super::commands::PlaceOrderRequest;
use super::entity::Order;
use super::errors::OrderError;
use super::value_objects::CommandId;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Request → Inventory check → Order → Order store
//
// The stock check and the write are two independent calls. Nothing is
// reserved with the inventory service, and a failed write after a positive
// check leaves no trace to compensate.
//
// ============================================================================

pub struct OrderCommandHandler {
    inventory: Arc<dyn InventoryChecker>,
    store: Arc<dyn OrderStore>,
    metrics: Arc<Metrics>,
}

impl OrderCommandHandler {
    pub fn new(
        inventory: Arc<dyn InventoryChecker>,
        store: Arc<dyn OrderStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            inventory,
            store,
            metrics,
        }
    }

    /// Place an order if the inventory confirms stock for the exact
    /// (sku, quantity) pair. Returns the command id acknowledging placement.
    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<CommandId, OrderError> {
        if let Err(errors) = request.validate() {
            return Err(self.rejected(OrderError::InvalidRequest(errors)));
        }

        let in_stock = self.check_stock(&request).await?;

        if !in_stock {
            tracing::info!(
                sku_code = %request.sku_code,
                quantity = request.quantity,
                "Order rejected: product not in stock"
            );
            return Err(self.rejected(OrderError::OutOfStock(request.sku_code)));
        }

        let command_id = CommandId::generate();
        let order = Order::from_request(&request);
        let order_number = order.order_number.clone();

        if let Err(e) = self.store.save(order).await {
            tracing::error!(
                error = %e,
                command_id = %command_id,
                order_number = %order_number,
                "Failed to persist order after stock confirmation"
            );
            return Err(self.rejected(OrderError::Store(e)));
        }

        tracing::info!(
            command_id = %command_id,
            order_number = %order_number,
            sku_code = %request.sku_code,
            quantity = request.quantity,
            "✅ Order placed successfully"
        );
        self.metrics.record_order_placed();

        Ok(command_id)
    }

    fn rejected(&self, error: OrderError) -> OrderError {
        self.metrics.record_order_rejected(error.reason());
        error
    }

    async fn check_stock(&self, request: &PlaceOrderRequest) -> Result<bool, OrderError> {
        let started = Instant::now();
        let result = self
            .inventory
            .is_in_stock(&request.sku_code, request.quantity)
            .await;
        let elapsed = started.elapsed().as_secs_f64();

        match result {
            Ok(in_stock) => {
                let outcome = if in_stock { "in_stock" } else { "out_of_stock" };
                self.metrics.record_inventory_check(outcome, elapsed);
                Ok(in_stock)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    sku_code = %request.sku_code,
                    "Inventory check failed"
                );
                self.metrics.record_inventory_check("error", elapsed);
                Err(self.rejected(OrderError::Inventory(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::InMemoryInventory;
    use crate::store::InMemoryOrderStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingInventory;

    #[async_trait]
    impl InventoryChecker for FailingInventory {
        async fn is_in_stock(&self, _sku_code: &str, _quantity: i32) -> Result<bool> {
            anyhow::bail!("inventory service unavailable")
        }
    }

    /// Counts inventory lookups
    #[derive(Default)]
    struct CountingInventory {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl InventoryChecker for CountingInventory {
        async fn is_in_stock(&self, _sku_code: &str, _quantity: i32) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    struct FailingStore;

    #[async_trait]
    impl OrderStore for FailingStore {
        async fn save(&self, _order: Order) -> Result<()> {
            anyhow::bail!("database is down")
        }

        async fn find_by_order_number(&self, _order_number: &str) -> Result<Option<Order>> {
            Ok(None)
        }

        async fn count(&self) -> Result<usize> {
            Ok(0)
        }
    }

    fn handler_with(
        inventory: Arc<dyn InventoryChecker>,
        store: Arc<dyn OrderStore>,
    ) -> OrderCommandHandler {
        OrderCommandHandler::new(inventory, store, Arc::new(Metrics::new().unwrap()))
    }

    fn request(sku: &str, quantity: i32) -> PlaceOrderRequest {
        PlaceOrderRequest::new(sku, quantity, Decimal::new(129900, 2))
    }

    #[tokio::test]
    async fn test_in_stock_order_is_persisted() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("iphone_15", 10)]));
        let store = Arc::new(InMemoryOrderStore::new());
        let handler = handler_with(inventory, store.clone());

        let command_id = handler.place_order(request("iphone_15", 3)).await.unwrap();

        let orders = store.all();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.sku_code, "iphone_15");
        assert_eq!(order.quantity, 3);
        assert_eq!(order.price, Decimal::new(129900, 2));

        assert!(!command_id.to_string().is_empty());
        assert_ne!(command_id.to_string(), order.order_number.to_string());
    }

    #[tokio::test]
    async fn test_out_of_stock_persists_nothing() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("iphone_15", 2)]));
        let store = Arc::new(InMemoryOrderStore::new());
        let handler = handler_with(inventory, store.clone());

        let err = handler.place_order(request("iphone_15", 3)).await.unwrap_err();

        assert!(matches!(err, OrderError::OutOfStock(ref sku) if sku == "iphone_15"));
        assert!(err.to_string().contains("iphone_15"));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repeated_placements_get_unique_ids() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("pixel_8", 100)]));
        let store = Arc::new(InMemoryOrderStore::new());
        let handler = handler_with(inventory, store.clone());

        let first = handler.place_order(request("pixel_8", 1)).await.unwrap();
        let second = handler.place_order(request("pixel_8", 1)).await.unwrap();

        assert_ne!(first, second);

        let orders = store.all();
        assert_eq!(orders.len(), 2);
        assert_ne!(orders[0].order_number, orders[1].order_number);
    }

    #[tokio::test]
    async fn test_inventory_failure_propagates() {
        let store = Arc::new(InMemoryOrderStore::new());
        let handler = handler_with(Arc::new(FailingInventory), store.clone());

        let err = handler.place_order(request("iphone_15", 1)).await.unwrap_err();

        match err {
            OrderError::Inventory(cause) => {
                assert_eq!(cause.to_string(), "inventory service unavailable")
            }
            other => panic!("expected inventory failure, got {:?}", other),
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("iphone_15", 10)]));
        let handler = handler_with(inventory, Arc::new(FailingStore));

        let err = handler.place_order(request("iphone_15", 1)).await.unwrap_err();
        assert!(matches!(err, OrderError::Store(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_skips_inventory() {
        let inventory = Arc::new(CountingInventory::default());
        let store = Arc::new(InMemoryOrderStore::new());
        let handler = handler_with(inventory.clone(), store.clone());

        let err = handler.place_order(request("", 0)).await.unwrap_err();

        assert!(matches!(err, OrderError::InvalidRequest(_)));
        assert_eq!(inventory.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_metrics_track_outcomes() {
        let inventory = Arc::new(InMemoryInventory::with_stock([("iphone_15", 1)]));
        let store = Arc::new(InMemoryOrderStore::new());
        let metrics = Arc::new(Metrics::new().unwrap());
        let handler = OrderCommandHandler::new(inventory, store, metrics.clone());

        handler.place_order(request("iphone_15", 1)).await.unwrap();
        let _ = handler.place_order(request("iphone_15", 5)).await;

        assert_eq!(metrics.orders_placed.get(), 1);
        assert_eq!(
            metrics.orders_rejected.with_label_values(&["out_of_stock"]).get(),
            1
        );
    }
}
