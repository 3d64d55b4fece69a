//! In-memory navigator.

use std::sync::{Mutex, PoisonError};

use vestibule_application::Navigator;

/// [`Navigator`] that records requested navigations instead of moving a
/// real page.
pub struct MemoryNavigator {
    origin: String,
    visited: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Creates a navigator reporting `origin` as the page's own origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            visited: Mutex::new(Vec::new()),
        }
    }

    /// Every path navigated to, in order.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn navigate_to(&self, path: &str) {
        tracing::info!(%path, "navigating");
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }

    fn current_origin(&self) -> String {
        self.origin.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn visits_are_recorded_in_order() {
        let navigator = MemoryNavigator::new("http://localhost:4200");

        navigator.navigate_to("/login");
        navigator.navigate_to("/");

        assert_eq!(navigator.visited(), vec!["/login".to_string(), "/".to_string()]);
        assert_eq!(navigator.current_origin(), "http://localhost:4200");
    }
}
