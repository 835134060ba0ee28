// ============================================================================
// Order Domain - Order placement
// ============================================================================
//
// This module contains the order placement code:
// - Value objects (CommandId, OrderNumber)
// - Commands (PlaceOrderRequest)
// - Entity (Order)
// - Errors (OrderError enum)
// - Command Handler (OrderCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod entity;
pub mod errors;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use entity::*;
pub use errors::*;
pub use command_handler::*;
