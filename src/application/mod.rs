// Application layer - use cases and orchestration.
// The CLI (or any other front end) only ever talks to InventoryService;
// the storage and report subsystems stay swappable behind it.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
