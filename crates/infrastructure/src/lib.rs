//! Vestibule Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod enrollment;
pub mod navigation;
pub mod persistence;
pub mod session;
pub mod surface;
pub mod widget;

pub use enrollment::{HttpEnrollment, SimulatedEnrollment};
pub use navigation::MemoryNavigator;
pub use persistence::{ConfigError, ConfigRepository};
pub use session::{CompletedLogin, MemorySessionManager};
pub use surface::{MemorySurface, NodeSnapshot, SurfaceNode};
pub use widget::{ScriptStep, ScriptedWidget, WidgetScript};
