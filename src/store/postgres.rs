use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::domain::order::{Order, OrderNumber};
use super::order_store::OrderStore;

// ============================================================================
// PostgreSQL Order Store
// ============================================================================

const CREATE_ORDERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
    id BIGSERIAL PRIMARY KEY,
    order_number VARCHAR(64) NOT NULL UNIQUE,
    sku_code VARCHAR(255) NOT NULL,
    price NUMERIC(19, 2) NOT NULL,
    quantity INTEGER NOT NULL
)";

pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and make sure the `orders` table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_ORDERS_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create orders table")?;

        tracing::info!("Orders table ready");
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn save(&self, order: Order) -> Result<()> {
        sqlx::query(
            "INSERT INTO orders (order_number, sku_code, price, quantity) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.order_number.as_str())
        .bind(&order.sku_code)
        .bind(order.price)
        .bind(order.quantity)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to insert order {}", order.order_number))?;

        tracing::debug!(order_number = %order.order_number, "Order row inserted");
        Ok(())
    }

    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let row = sqlx::query_as::<_, (String, String, i32, Decimal)>(
            "SELECT order_number, sku_code, quantity, price FROM orders WHERE order_number = $1",
        )
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(order_number, sku_code, quantity, price)| Order {
            order_number: OrderNumber::new(order_number),
            sku_code,
            quantity,
            price,
        }))
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
