//! Vestibule Domain - Core flow types
//!
//! This crate defines the domain model for the Vestibule login
//! orchestrator. All types here are pure Rust with no I/O dependencies.

pub mod anchors;
pub mod config;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod tokens;
pub mod view;

pub use config::{AppConfig, FlowTimings, LoggingConfig, ProviderConfig, WidgetOptions};
pub use controller::Controller;
pub use error::{DomainError, DomainResult};
pub use lifecycle::{LifecycleEvent, LifecyclePhase};
pub use tokens::CredentialTokens;
pub use view::{Interest, ListenerId, NodeSpec, Selector, ViewEffect, ViewEvent};
