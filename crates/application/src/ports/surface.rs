//! View surface port

use vestibule_domain::{Interest, ListenerId, Selector, ViewEffect};

/// Errors that can occur when addressing the view surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// No node matches the selector.
    #[error("no element matches {0}")]
    MissingTarget(Selector),
}

/// Port for the live view surface the widget renders into.
///
/// Mutations are declarative [`ViewEffect`] values; user activity flows
/// back as view events on a channel wired at construction time, filtered
/// by the watch registrations taken out here.
pub trait ViewSurface: Send + Sync {
    /// Applies a mutation to the surface.
    ///
    /// # Errors
    /// Returns [`ViewError::MissingTarget`] if the target does not resolve.
    fn apply(&self, effect: &ViewEffect) -> Result<(), ViewError>;

    /// Programmatically activates the target, as if the user had.
    ///
    /// # Errors
    /// Returns [`ViewError::MissingTarget`] if the target does not resolve.
    fn activate(&self, target: &Selector) -> Result<(), ViewError>;

    /// Registers interest in activity on the target.
    ///
    /// # Errors
    /// Returns [`ViewError::MissingTarget`] if the target does not resolve.
    fn watch(&self, target: &Selector, interest: Interest) -> Result<ListenerId, ViewError>;

    /// Drops a watch registration. Unknown ids are ignored.
    fn unwatch(&self, listener: ListenerId);
}
