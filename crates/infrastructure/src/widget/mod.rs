//! Sign-in widget implementations.

mod scripted;

pub use scripted::{ScriptStep, ScriptedWidget, WidgetScript};
