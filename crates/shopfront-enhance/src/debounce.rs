//! Trailing-edge debounce.
//!
//! The debouncer does not own a clock. Each call hands back the timer
//! commands the host must execute, and the host reports expiry through
//! [`Debouncer::fire`]. Only the most recent token can fire; older tokens
//! are stale and ignored even if the host failed to clear them.

use std::time::Duration;

use crate::events::{TimerCommand, TimerToken};

/// Collapses bursts of calls into one trailing call.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    next_token: u64,
    pending: Option<(TimerToken, T)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: 0,
            pending: None,
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value` and restart the quiet period.
    pub fn call(&mut self, value: T) -> Vec<TimerCommand> {
        let mut commands = Vec::with_capacity(2);
        if let Some(clear) = self.cancel() {
            commands.push(clear);
        }

        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.pending = Some((token, value));
        commands.push(TimerCommand::Set {
            token,
            delay: self.delay,
        });
        commands
    }

    /// Drop the pending value, returning the command to clear its timer.
    pub fn cancel(&mut self) -> Option<TimerCommand> {
        self.pending
            .take()
            .map(|(token, _)| TimerCommand::Clear { token })
    }

    /// Take the pending value if `token` is the current timer.
    pub fn fire(&mut self, token: TimerToken) -> Option<T> {
        if self
            .pending
            .as_ref()
            .is_some_and(|(current, _)| *current == token)
        {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }

    /// Whether a value is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
