//! Second-granular countdown timers.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::cancellation::CancellationToken;

/// Interval between countdown ticks.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable one-second countdown running on its own task.
///
/// Each period decrements the remaining count and reports it through
/// `on_tick`; when the count reaches zero, `on_expire` runs exactly once
/// in the same period and the countdown ends. Stopping (or dropping the
/// handle) suppresses all further ticks and the expiry callback.
#[derive(Debug)]
pub struct Countdown {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Countdown {
    /// Starts a countdown from `seconds`.
    ///
    /// `on_tick` receives the post-decrement remaining count: a countdown
    /// from `n` ticks exactly `n` times with `n - 1, n - 2, .., 0`, then
    /// expires. A countdown from zero expires on the first period without
    /// ticking.
    pub fn start<T, E>(seconds: u64, mut on_tick: T, on_expire: E) -> Self
    where
        T: FnMut(u64) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let (token, mut cancel) = CancellationToken::new();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            let mut remaining = seconds;
            loop {
                tokio::select! {
                    // Cancellation wins a tie with an elapsed tick.
                    biased;
                    () = cancel.cancelled() => return,
                    _ = interval.tick() => {
                        if remaining == 0 {
                            on_expire();
                            return;
                        }
                        remaining -= 1;
                        on_tick(remaining);
                        if remaining == 0 {
                            on_expire();
                            return;
                        }
                    }
                }
            }
        });
        Self { token, handle }
    }

    /// Stops the countdown. Idempotent; a stop after expiry is a no-op.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Handle for stopping this countdown from elsewhere.
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// True while the driving task has not finished.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
