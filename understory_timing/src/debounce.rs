// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A re-armable deadline.
///
/// Every [`Debounce::schedule`] pushes the deadline to `now + delay`; the
/// host polls [`Debounce::fire`] and acts once the deadline has passed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Debounce {
    delay: u64,
    deadline: Option<u64>,
}

impl Debounce {
    /// Creates an idle debouncer with the given delay in milliseconds.
    #[must_use]
    pub fn new(delay: u64) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Delay in milliseconds.
    #[must_use]
    pub fn delay(&self) -> u64 {
        self.delay
    }

    /// Changes the delay. A pending deadline keeps its original time.
    pub fn set_delay(&mut self, delay: u64) {
        self.delay = delay;
    }

    /// Arms (or re-arms) the deadline relative to `now`.
    pub fn schedule(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.delay));
    }

    /// Disarms the deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is armed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// The armed deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` exactly once when `now` reached the deadline, disarming
    /// it.
    pub fn fire(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
