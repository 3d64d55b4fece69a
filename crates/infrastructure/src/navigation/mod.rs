//! Navigator implementations.

mod memory;

pub use memory::MemoryNavigator;
