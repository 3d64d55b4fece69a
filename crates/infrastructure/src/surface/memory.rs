//! In-memory view surface.
//!
//! Stands in for the rendered page: a flat, insertion-ordered list of
//! nodes. Selector resolution returns the first match, the way a document
//! query would, so duplicate classes behave predictably.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use vestibule_application::{ViewError, ViewSurface};
use vestibule_domain::{Interest, ListenerId, NodeSpec, Selector, ViewEffect, ViewEvent};

/// Declarative description of a node placed on the surface.
#[derive(Debug, Clone, Default)]
pub struct SurfaceNode {
    id: Option<String>,
    classes: BTreeSet<String>,
    content: String,
}

impl SurfaceNode {
    /// Creates an empty node description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    /// Sets the initial content markup.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

/// Readonly copy of a node's state, for assertions and demos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Element id, if any.
    pub id: Option<String>,
    /// Classes currently on the node.
    pub classes: BTreeSet<String>,
    /// Attributes currently on the node.
    pub attributes: BTreeMap<String, String>,
    /// Current content markup.
    pub content: String,
    /// Whether the node is visible.
    pub visible: bool,
    /// Children appended through effects.
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    content: String,
    visible: bool,
    children: Vec<NodeSpec>,
}

impl Node {
    fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            id: self.id.clone(),
            classes: self.classes.clone(),
            attributes: self.attributes.clone(),
            content: self.content.clone(),
            visible: self.visible,
            children: self.children.clone(),
        }
    }
}

impl From<SurfaceNode> for Node {
    fn from(seed: SurfaceNode) -> Self {
        Self {
            id: seed.id,
            classes: seed.classes,
            attributes: BTreeMap::new(),
            content: seed.content,
            visible: true,
            children: Vec::new(),
        }
    }
}

struct Watch {
    id: ListenerId,
    target: Selector,
    interest: Interest,
}

#[derive(Default)]
struct SurfaceState {
    nodes: Vec<Node>,
    watches: Vec<Watch>,
    activations: Vec<Selector>,
}

/// In-memory [`ViewSurface`] backing the scripted widget and the tests.
pub struct MemorySurface {
    state: RwLock<SurfaceState>,
    events: UnboundedSender<ViewEvent>,
}

impl MemorySurface {
    /// Creates a surface emitting events on the given sender.
    #[must_use]
    pub fn new(events: UnboundedSender<ViewEvent>) -> Self {
        Self {
            state: RwLock::new(SurfaceState::default()),
            events,
        }
    }

    /// Creates a surface and the receiving half of its event channel.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<ViewEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Places a node on the surface, after any existing nodes.
    pub fn insert(&self, node: SurfaceNode) {
        let mut state = self.lock_write();
        state.nodes.push(node.into());
    }

    /// Removes every node, watch, and recorded activation.
    pub fn clear(&self) {
        let mut state = self.lock_write();
        *state = SurfaceState::default();
    }

    /// Simulates the user changing the target's value.
    ///
    /// Unknown targets are ignored, matching a stray input event on a
    /// node nobody is tracking.
    pub fn type_value(&self, target: &Selector, value: &str) {
        let state = self.lock_read();
        if !exists(&state.nodes, target) {
            return;
        }
        let event = ViewEvent::ValueChanged {
            target: target.clone(),
            value: value.to_string(),
        };
        self.deliver(&state, event);
    }

    /// Readonly snapshot of the first node matching the selector.
    #[must_use]
    pub fn node(&self, selector: &Selector) -> Option<NodeSnapshot> {
        let state = self.lock_read();
        state
            .nodes
            .iter()
            .find(|node| matches_selector(node, selector))
            .map(Node::snapshot)
    }

    /// How many activations the target has seen, programmatic or user.
    #[must_use]
    pub fn activation_count(&self, target: &Selector) -> usize {
        let state = self.lock_read();
        state
            .activations
            .iter()
            .filter(|seen| *seen == target)
            .count()
    }

    /// Number of live watch registrations.
    #[must_use]
    pub fn watch_count(&self) -> usize {
        self.lock_read().watches.len()
    }

    fn deliver(&self, state: &SurfaceState, event: ViewEvent) {
        let watched = state
            .watches
            .iter()
            .any(|watch| watch.target == *event.target() && watch.interest.covers(&event));
        if watched {
            let _ = self.events.send(event);
        }
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, SurfaceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, SurfaceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewSurface for MemorySurface {
    fn apply(&self, effect: &ViewEffect) -> Result<(), ViewError> {
        let mut state = self.lock_write();
        let node = state
            .nodes
            .iter_mut()
            .find(|node| matches_selector(node, effect.target()))
            .ok_or_else(|| ViewError::MissingTarget(effect.target().clone()))?;
        match effect {
            ViewEffect::SetContent { content, .. } => node.content.clone_from(content),
            ViewEffect::SetVisible { visible, .. } => node.visible = *visible,
            ViewEffect::SetAttribute { name, value, .. } => {
                node.attributes.insert(name.clone(), value.clone());
            }
            ViewEffect::RemoveAttribute { name, .. } => {
                node.attributes.remove(name);
            }
            ViewEffect::AddClass { class, .. } => {
                node.classes.insert(class.clone());
            }
            ViewEffect::RemoveClass { class, .. } => {
                node.classes.remove(class);
            }
            ViewEffect::AppendChild { node: spec, .. } => node.children.push(spec.clone()),
        }
        Ok(())
    }

    fn activate(&self, target: &Selector) -> Result<(), ViewError> {
        let mut state = self.lock_write();
        if !exists(&state.nodes, target) {
            return Err(ViewError::MissingTarget(target.clone()));
        }
        state.activations.push(target.clone());
        let event = ViewEvent::Activated {
            target: target.clone(),
        };
        self.deliver(&state, event);
        Ok(())
    }

    fn watch(&self, target: &Selector, interest: Interest) -> Result<ListenerId, ViewError> {
        let mut state = self.lock_write();
        if !exists(&state.nodes, target) {
            return Err(ViewError::MissingTarget(target.clone()));
        }
        let id = ListenerId::new();
        state.watches.push(Watch {
            id,
            target: target.clone(),
            interest,
        });
        Ok(id)
    }

    fn unwatch(&self, listener: ListenerId) {
        let mut state = self.lock_write();
        state.watches.retain(|watch| watch.id != listener);
    }
}

fn matches_selector(node: &Node, selector: &Selector) -> bool {
    match selector {
        Selector::Id(id) => node.id.as_deref() == Some(id.as_str()),
        Selector::Class(class) => node.classes.contains(class),
    }
}

fn exists(nodes: &[Node], selector: &Selector) -> bool {
    nodes.iter().any(|node| matches_selector(node, selector))
}
