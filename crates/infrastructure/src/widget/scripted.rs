//! Scripted sign-in widget.
//!
//! Plays a fixed sequence of renders, lifecycle events, and user actions
//! against an in-memory surface, then resolves or rejects the sign-in.
//! This is the widget the demo binary and the end-to-end tests run
//! against; a real hosted widget adapter would implement the same port.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use vestibule_application::{SignInOptions, SignInWidget, ViewSurface, WidgetError};
use vestibule_domain::{CredentialTokens, LifecycleEvent, Selector};

use crate::surface::{MemorySurface, SurfaceNode};

/// One step of a widget script.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// Places nodes on the surface.
    Render(Vec<SurfaceNode>),
    /// Emits a lifecycle event.
    Emit(LifecycleEvent),
    /// Lets time pass before the next step.
    Wait(Duration),
    /// Types a value into the target.
    Type {
        /// Node receiving the input.
        target: Selector,
        /// Value typed.
        value: String,
    },
    /// Activates the target, as a user click would.
    Click(Selector),
    /// Resolves the sign-in with tokens.
    Resolve(CredentialTokens),
    /// Rejects the sign-in.
    Reject(WidgetError),
}

/// Builder for the step sequence a [`ScriptedWidget`] plays.
#[derive(Debug, Clone, Default)]
pub struct WidgetScript {
    steps: Vec<ScriptStep>,
}

impl WidgetScript {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a render step.
    #[must_use]
    pub fn render(mut self, nodes: Vec<SurfaceNode>) -> Self {
        self.steps.push(ScriptStep::Render(nodes));
        self
    }

    /// Appends a lifecycle event step.
    #[must_use]
    pub fn emit(mut self, event: LifecycleEvent) -> Self {
        self.steps.push(ScriptStep::Emit(event));
        self
    }

    /// Appends a pause.
    #[must_use]
    pub fn wait(mut self, duration: Duration) -> Self {
        self.steps.push(ScriptStep::Wait(duration));
        self
    }

    /// Appends a typed value.
    #[must_use]
    pub fn type_into(mut self, target: Selector, value: impl Into<String>) -> Self {
        self.steps.push(ScriptStep::Type {
            target,
            value: value.into(),
        });
        self
    }

    /// Appends a user activation.
    #[must_use]
    pub fn click(mut self, target: Selector) -> Self {
        self.steps.push(ScriptStep::Click(target));
        self
    }

    /// Ends the script by resolving the sign-in.
    #[must_use]
    pub fn resolve(mut self, tokens: CredentialTokens) -> Self {
        self.steps.push(ScriptStep::Resolve(tokens));
        self
    }

    /// Ends the script by rejecting the sign-in.
    #[must_use]
    pub fn reject(mut self, error: WidgetError) -> Self {
        self.steps.push(ScriptStep::Reject(error));
        self
    }
}

/// [`SignInWidget`] that plays a [`WidgetScript`] once.
pub struct ScriptedWidget {
    surface: Arc<MemorySurface>,
    lifecycle: UnboundedSender<LifecycleEvent>,
    script: Mutex<Option<WidgetScript>>,
    removals: AtomicUsize,
}

impl ScriptedWidget {
    /// Creates a widget that will play `script` against `surface`.
    #[must_use]
    pub fn new(
        surface: Arc<MemorySurface>,
        lifecycle: UnboundedSender<LifecycleEvent>,
        script: WidgetScript,
    ) -> Self {
        Self {
            surface,
            lifecycle,
            script: Mutex::new(Some(script)),
            removals: AtomicUsize::new(0),
        }
    }

    /// How many times the widget has been torn down.
    #[must_use]
    pub fn removal_count(&self) -> usize {
        self.removals.load(Ordering::SeqCst)
    }

    fn take_script(&self) -> Option<WidgetScript> {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

#[async_trait]
impl SignInWidget for ScriptedWidget {
    async fn show_sign_in(&self, options: SignInOptions) -> Result<CredentialTokens, WidgetError> {
        let Some(script) = self.take_script() else {
            return Err(WidgetError::Interrupted(
                "sign-in view already shown".to_string(),
            ));
        };
        tracing::debug!(mount = %options.mount, steps = script.steps.len(), "playing widget script");

        for step in script.steps {
            match step {
                ScriptStep::Render(nodes) => {
                    for node in nodes {
                        self.surface.insert(node);
                    }
                }
                ScriptStep::Emit(event) => {
                    let _ = self.lifecycle.send(event);
                }
                ScriptStep::Wait(duration) => tokio::time::sleep(duration).await,
                ScriptStep::Type { target, value } => self.surface.type_value(&target, &value),
                ScriptStep::Click(target) => {
                    if let Err(error) = self.surface.activate(&target) {
                        tracing::debug!(%error, "scripted click had no target");
                    }
                }
                ScriptStep::Resolve(tokens) => return Ok(tokens),
                ScriptStep::Reject(error) => return Err(error),
            }
            // Gives the flow loop a turn to drain what this step queued.
            tokio::task::yield_now().await;
        }

        Err(WidgetError::Interrupted(
            "script ended without a resolution".to_string(),
        ))
    }

    fn remove(&self) {
        let removals = self.removals.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(removals, "widget removed");
        self.surface.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    fn widget_with(script: WidgetScript) -> (ScriptedWidget, Arc<MemorySurface>) {
        let (surface, _view_events) = MemorySurface::channel();
        let surface = Arc::new(surface);
        let (lifecycle_tx, _lifecycle_rx) = mpsc::unbounded_channel();
        (
            ScriptedWidget::new(Arc::clone(&surface), lifecycle_tx, script),
            surface,
        )
    }

    fn options() -> SignInOptions {
        SignInOptions::new("#sign-in-widget", vec!["openid".to_string()])
    }

    #[tokio::test]
    async fn script_renders_then_resolves() {
        let script = WidgetScript::new()
            .render(vec![SurfaceNode::new().with_id("signin-username")])
            .resolve(CredentialTokens::bearer("id", "access"));
        let (widget, surface) = widget_with(script);

        let tokens = widget.show_sign_in(options()).await.unwrap();

        assert_eq!(tokens.access_token(), Some("access"));
        assert!(surface.node(&Selector::id("signin-username")).is_some());
    }

    #[tokio::test]
    async fn scripted_click_activates_the_target() {
        let script = WidgetScript::new()
            .render(vec![SurfaceNode::new().with_class("button-primary")])
            .click(Selector::class("button-primary"))
            .resolve(CredentialTokens::bearer("id", "access"));
        let (widget, surface) = widget_with(script);

        widget.show_sign_in(options()).await.unwrap();

        assert_eq!(
            surface.activation_count(&Selector::class("button-primary")),
            1
        );
    }

    #[tokio::test]
    async fn script_rejection_is_returned() {
        let script =
            WidgetScript::new().reject(WidgetError::Misconfigured("bad client id".to_string()));
        let (widget, _surface) = widget_with(script);

        let result = widget.show_sign_in(options()).await;

        assert!(matches!(result, Err(WidgetError::Misconfigured(_))));
    }

    #[tokio::test]
    async fn exhausted_script_counts_as_interrupted() {
        let (widget, _surface) = widget_with(WidgetScript::new());

        let result = widget.show_sign_in(options()).await;

        assert!(matches!(result, Err(WidgetError::Interrupted(_))));
    }

    #[tokio::test]
    async fn second_show_is_rejected() {
        let script = WidgetScript::new().resolve(CredentialTokens::bearer("id", "access"));
        let (widget, _surface) = widget_with(script);

        widget.show_sign_in(options()).await.unwrap();
        let second = widget.show_sign_in(options()).await;

        assert!(matches!(second, Err(WidgetError::Interrupted(_))));
    }

    #[tokio::test]
    async fn removal_clears_the_surface_and_counts() {
        let script = WidgetScript::new()
            .render(vec![SurfaceNode::new().with_class("enroll-choices")])
            .resolve(CredentialTokens::bearer("id", "access"));
        let (widget, surface) = widget_with(script);
        widget.show_sign_in(options()).await.unwrap();

        widget.remove();
        widget.remove();

        assert_eq!(widget.removal_count(), 2);
        assert!(surface.node(&Selector::class("enroll-choices")).is_none());
    }
}
