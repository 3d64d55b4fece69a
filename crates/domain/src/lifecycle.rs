//! Lifecycle events emitted by the widget.

use serde::{Deserialize, Serialize};

use crate::controller::Controller;

/// Rendering phase a lifecycle event was emitted in.
///
/// `Ready` fires once when a controller's view has been wired up;
/// `AfterRender` fires after the controller's markup is in place and may
/// fire again on re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecyclePhase {
    /// The controller finished initializing.
    Ready,
    /// The controller's markup finished rendering.
    AfterRender,
}

/// A controller transition notification from the widget.
///
/// Events are ephemeral: the router consumes each one synchronously and
/// never stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    /// Phase the widget reported.
    pub phase: LifecyclePhase,
    /// Controller that is now active.
    pub controller: Controller,
}

impl LifecycleEvent {
    /// Creates a `ready` event for the given controller.
    pub fn ready(controller: impl Into<Controller>) -> Self {
        Self {
            phase: LifecyclePhase::Ready,
            controller: controller.into(),
        }
    }

    /// Creates an `afterRender` event for the given controller.
    pub fn after_render(controller: impl Into<Controller>) -> Self {
        Self {
            phase: LifecyclePhase::AfterRender,
            controller: controller.into(),
        }
    }
}
