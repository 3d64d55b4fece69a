//! View surface addressing, effects, and events.
//!
//! The orchestrator never touches a real page. It describes mutations as
//! [`ViewEffect`] values addressed by [`Selector`], and observes user
//! activity as [`ViewEvent`] values, leaving the actual surface behind a
//! port implemented in the infrastructure layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Addresses a node on the widget's view surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// Matches the node with the given element id.
    Id(String),
    /// Matches the first node carrying the given class.
    Class(String),
}

impl Selector {
    /// Builds an id selector.
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    /// Builds a class selector.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(name) => write!(f, "#{name}"),
            Self::Class(name) => write!(f, ".{name}"),
        }
    }
}

/// Declarative description of a node to append to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Element tag, e.g. `p`.
    pub tag: String,
    /// Text content of the node.
    pub text: String,
    /// Plain attribute pairs, applied in order.
    pub attributes: Vec<(String, String)>,
}

impl NodeSpec {
    /// Creates an empty node with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds an attribute pair.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

/// A single declarative mutation of the view surface.
///
/// Effects are idempotent given the same target state, except
/// `AppendChild`, which adds a node per application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEffect {
    /// Replaces the target's content.
    SetContent {
        /// Node to mutate.
        target: Selector,
        /// New content markup.
        content: String,
    },
    /// Shows or hides the target.
    SetVisible {
        /// Node to mutate.
        target: Selector,
        /// Whether the node should be visible.
        visible: bool,
    },
    /// Sets an attribute on the target.
    SetAttribute {
        /// Node to mutate.
        target: Selector,
        /// Attribute name.
        name: String,
        /// Attribute value.
        value: String,
    },
    /// Removes an attribute from the target.
    RemoveAttribute {
        /// Node to mutate.
        target: Selector,
        /// Attribute name.
        name: String,
    },
    /// Adds a class to the target.
    AddClass {
        /// Node to mutate.
        target: Selector,
        /// Class name.
        class: String,
    },
    /// Removes a class from the target.
    RemoveClass {
        /// Node to mutate.
        target: Selector,
        /// Class name.
        class: String,
    },
    /// Appends a child node to the target.
    AppendChild {
        /// Node to append under.
        target: Selector,
        /// Description of the appended node.
        node: NodeSpec,
    },
}

impl ViewEffect {
    /// The selector this effect addresses.
    #[must_use]
    pub const fn target(&self) -> &Selector {
        match self {
            Self::SetContent { target, .. }
            | Self::SetVisible { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::RemoveAttribute { target, .. }
            | Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::AppendChild { target, .. } => target,
        }
    }
}

/// Surface activity the orchestrator can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The target was activated (clicked, tapped, keyed).
    Activated {
        /// Node that was activated.
        target: Selector,
    },
    /// The target's value changed.
    ValueChanged {
        /// Node whose value changed.
        target: Selector,
        /// The new value.
        value: String,
    },
}

impl ViewEvent {
    /// The selector this event originated from.
    #[must_use]
    pub const fn target(&self) -> &Selector {
        match self {
            Self::Activated { target } | Self::ValueChanged { target, .. } => target,
        }
    }
}

/// The kind of surface activity a watch registration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interest {
    /// Activation events.
    Activation,
    /// Value-change events.
    ValueChange,
}

impl Interest {
    /// True if `event` falls under this interest.
    #[must_use]
    pub const fn covers(self, event: &ViewEvent) -> bool {
        matches!(
            (self, event),
            (Self::Activation, ViewEvent::Activated { .. })
                | (Self::ValueChange, ViewEvent::ValueChanged { .. })
        )
    }
}

/// Opaque handle identifying a watch registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Generates a fresh listener id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
