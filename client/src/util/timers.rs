//! Pending idle timers keyed by [`TimerToken`].
//!
//! The session only ever arms one timer per kind, and a new schedule
//! supersedes the old one. Handles are dropped to cancel them, which is how
//! `gloo_timers::callback::Timeout` behaves.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use gallery::idle::{TimerKind, TimerToken};

/// Armed timers. `H` is the platform handle; dropping it cancels the timer.
pub struct TimerSet<H> {
    pending: Vec<(TimerToken, H)>,
}

impl<H> Default for TimerSet<H> {
    fn default() -> Self {
        Self { pending: Vec::new() }
    }
}

impl<H> TimerSet<H> {
    /// Store `handle` for `token`, dropping any timer of the same kind.
    pub fn arm(&mut self, token: TimerToken, handle: H) {
        self.pending.retain(|(armed, _)| armed.kind != token.kind);
        self.pending.push((token, handle));
    }

    /// Forget a timer that has fired. Returns whether it was still armed.
    pub fn fired(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(armed, _)| *armed != token);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(armed, _)| armed.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(feature = "csr")]
pub type BrowserTimers = TimerSet<gloo_timers::callback::Timeout>;
