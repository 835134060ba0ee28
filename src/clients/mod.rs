// ============================================================================
// Clients - Remote collaborators of the order service
// ============================================================================

pub mod inventory;

pub use inventory::{HttpInventoryClient, InMemoryInventory, InventoryChecker};
