//! Navigation port

/// Port for client-side route changes.
pub trait Navigator: Send + Sync {
    /// Navigates to the given application path.
    fn navigate_to(&self, path: &str);

    /// Origin of the page hosting the widget.
    fn current_origin(&self) -> String;
}
