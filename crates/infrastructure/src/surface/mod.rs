//! View surface implementations.

mod memory;

pub use memory::{MemorySurface, NodeSnapshot, SurfaceNode};
