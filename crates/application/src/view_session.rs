//! Per-controller-view resource ownership.

use tokio::task::JoinHandle;

use vestibule_domain::ListenerId;

use crate::countdown::Countdown;
use crate::view::ViewMutator;

/// Everything a single controller view owns: countdowns, watch
/// registrations, and background tasks.
///
/// Entering a controller view replaces the previous session, and disposing
/// a session stops its countdowns, drops its registrations, and aborts its
/// tasks. Nothing owned here outlives the view it was created for.
pub struct ViewSession {
    mutator: ViewMutator,
    countdowns: Vec<Countdown>,
    listeners: Vec<ListenerId>,
    tasks: Vec<JoinHandle<()>>,
    disposed: bool,
}

impl ViewSession {
    /// Creates an empty session bound to the given mutator.
    #[must_use]
    pub fn new(mutator: ViewMutator) -> Self {
        Self {
            mutator,
            countdowns: Vec::new(),
            listeners: Vec::new(),
            tasks: Vec::new(),
            disposed: false,
        }
    }

    /// Hands a countdown to the session.
    pub fn add_countdown(&mut self, countdown: Countdown) {
        self.countdowns.push(countdown);
    }

    /// Hands a watch registration to the session.
    pub fn add_listener(&mut self, listener: ListenerId) {
        self.listeners.push(listener);
    }

    /// Hands a background task to the session.
    pub fn add_task(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    /// Tears down everything the session owns. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for countdown in self.countdowns.drain(..) {
            countdown.stop();
        }
        for listener in self.listeners.drain(..) {
            self.mutator.unwatch(listener);
        }
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// True once the session has been disposed.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for ViewSession {
    fn drop(&mut self) {
        self.dispose();
    }
}
