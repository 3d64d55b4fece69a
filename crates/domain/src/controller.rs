//! Widget controller identifiers.
//!
//! The hosted widget reports which of its screens is active through a
//! free-form controller name. The variants here cover the controllers the
//! orchestrator reacts to; every other name is preserved as `Unknown` so
//! routing can ignore it without losing information.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire name of the primary credential entry screen.
pub const PRIMARY_AUTH: &str = "primary-auth";
/// Wire name of the factor enrollment chooser screen.
pub const ENROLL_CHOICES: &str = "enroll-choices";
/// Wire name of the one-time-code verification screen.
pub const MFA_VERIFY: &str = "mfa-verify";

/// The widget screen a lifecycle event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Controller {
    /// Username/password entry.
    PrimaryAuth,
    /// Factor enrollment chooser.
    EnrollChoices,
    /// One-time-code verification.
    MfaVerify,
    /// Any screen the orchestrator does not react to.
    Unknown(String),
}

impl Controller {
    /// Parses a controller from its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            PRIMARY_AUTH => Self::PrimaryAuth,
            ENROLL_CHOICES => Self::EnrollChoices,
            MFA_VERIFY => Self::MfaVerify,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the wire name of this controller.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::PrimaryAuth => PRIMARY_AUTH,
            Self::EnrollChoices => ENROLL_CHOICES,
            Self::MfaVerify => MFA_VERIFY,
            Self::Unknown(name) => name,
        }
    }

    /// True for controllers the orchestrator has a behavior for.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for Controller {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Controller {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Controller> for String {
    fn from(controller: Controller) -> Self {
        controller.name().to_string()
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for name in [PRIMARY_AUTH, ENROLL_CHOICES, MFA_VERIFY] {
            let controller = Controller::from_name(name);
            assert!(controller.is_handled());
            assert_eq!(controller.name(), name);
        }
    }

    #[test]
    fn unknown_name_is_preserved() {
        let controller = Controller::from_name("forgot-password");
        assert_eq!(controller, Controller::Unknown("forgot-password".to_string()));
        assert!(!controller.is_handled());
        assert_eq!(controller.to_string(), "forgot-password");
    }

    #[test]
    fn from_str_matches_from_name() {
        assert_eq!(Controller::from("mfa-verify"), Controller::MfaVerify);
    }
}
