//! Stable anchors documented by the hosted widget.
//!
//! The widget guarantees these ids and class names across its screens, so
//! the orchestrator can address controls without owning the markup.

use crate::view::Selector;

/// Id of the identifier input on the primary credential screen.
pub const USERNAME_INPUT_ID: &str = "signin-username";
/// Class of the factor-enrollment chooser panel.
pub const ENROLL_PANEL_CLASS: &str = "enroll-choices";
/// Class of the resend-code button on the verification screen.
pub const RESEND_BUTTON_CLASS: &str = "resend-code-button";
/// Class of the button bar at the bottom of the verification screen.
pub const BUTTON_BAR_CLASS: &str = "form-button-bar";
/// Class of the confirm button inside the button bar.
pub const CONFIRM_BUTTON_CLASS: &str = "button-primary";
/// Class of the session-timeout warning banner.
pub const TIMEOUT_WARNING_CLASS: &str = "session-timeout-warning";

/// Classes the widget styles a control as disabled with.
pub const DISABLED_MARKER_CLASSES: [&str; 3] = ["link-button-disabled", "btn-disabled", "disabled"];

/// Selector for the identifier input.
#[must_use]
pub fn username_input() -> Selector {
    Selector::id(USERNAME_INPUT_ID)
}

/// Selector for the enrollment chooser panel.
#[must_use]
pub fn enroll_panel() -> Selector {
    Selector::class(ENROLL_PANEL_CLASS)
}

/// Selector for the resend-code button.
#[must_use]
pub fn resend_button() -> Selector {
    Selector::class(RESEND_BUTTON_CLASS)
}

/// Selector for the verification screen's button bar.
#[must_use]
pub fn button_bar() -> Selector {
    Selector::class(BUTTON_BAR_CLASS)
}

/// Selector for the confirm button.
#[must_use]
pub fn confirm_button() -> Selector {
    Selector::class(CONFIRM_BUTTON_CLASS)
}

/// Selector for the session-timeout warning banner.
#[must_use]
pub fn timeout_warning() -> Selector {
    Selector::class(TIMEOUT_WARNING_CLASS)
}
