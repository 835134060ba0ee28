// ============================================================================
// Order Persistence
// ============================================================================
//
// `OrderStore` is the port the command handler writes through. Two
// adapters: PostgreSQL for deployments, in-memory for tests and local runs.
//
// ============================================================================

pub mod order_store;
pub mod postgres;

pub use order_store::{InMemoryOrderStore, OrderStore};
pub use postgres::PostgresOrderStore;
