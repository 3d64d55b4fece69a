//! Applies declarative effects to the widget's view surface.

use std::sync::Arc;

use vestibule_domain::{Interest, ListenerId, Selector, ViewEffect};

use crate::error::FlowResult;
use crate::ports::{ViewError, ViewSurface};

/// Applies view effects, distinguishing required controls from optional
/// decorations.
///
/// A control the flow depends on must resolve; a failure aborts the
/// caller's setup. A decoration is best-effort: if its target is missing
/// the feature simply does not appear.
#[derive(Clone)]
pub struct ViewMutator {
    surface: Arc<dyn ViewSurface>,
}

impl ViewMutator {
    /// Creates a mutator bound to the given surface.
    #[must_use]
    pub fn new(surface: Arc<dyn ViewSurface>) -> Self {
        Self { surface }
    }

    /// The surface this mutator is bound to.
    #[must_use]
    pub fn surface(&self) -> Arc<dyn ViewSurface> {
        Arc::clone(&self.surface)
    }

    /// Applies an effect whose target the flow depends on.
    ///
    /// # Errors
    /// Returns [`FlowError::MissingControl`](crate::error::FlowError) if
    /// the target does not resolve.
    pub fn apply_control(&self, effect: &ViewEffect) -> FlowResult<()> {
        self.surface.apply(effect)?;
        Ok(())
    }

    /// Applies a cosmetic effect; a missing target is tolerated.
    pub fn apply_decoration(&self, effect: &ViewEffect) {
        if let Err(ViewError::MissingTarget(selector)) = self.surface.apply(effect) {
            tracing::debug!(%selector, "decoration target missing, skipped");
        }
    }

    /// Activates a control programmatically.
    ///
    /// # Errors
    /// Returns [`FlowError::MissingControl`](crate::error::FlowError) if
    /// the target does not resolve.
    pub fn activate(&self, target: &Selector) -> FlowResult<()> {
        self.surface.activate(target)?;
        Ok(())
    }

    /// Registers interest in activity on a required control.
    ///
    /// # Errors
    /// Returns [`FlowError::MissingControl`](crate::error::FlowError) if
    /// the target does not resolve.
    pub fn watch(&self, target: &Selector, interest: Interest) -> FlowResult<ListenerId> {
        Ok(self.surface.watch(target, interest)?)
    }

    /// Registers interest in activity on an optional target; a missing
    /// target yields `None`.
    pub fn try_watch(&self, target: &Selector, interest: Interest) -> Option<ListenerId> {
        match self.surface.watch(target, interest) {
            Ok(listener) => Some(listener),
            Err(ViewError::MissingTarget(selector)) => {
                tracing::debug!(%selector, "watch target missing, skipped");
                None
            }
        }
    }

    /// Drops a watch registration.
    pub fn unwatch(&self, listener: ListenerId) {
        self.surface.unwatch(listener);
    }
}
