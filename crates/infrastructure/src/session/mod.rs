//! Session manager implementations.

mod memory;

pub use memory::{CompletedLogin, MemorySessionManager};
