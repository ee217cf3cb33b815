//! Debounce
//!
//! Holds back a rapidly changing value until it has been stable for a fixed
//! delay. The caller owns the timer: each `input` returns a [`Ticket`] to
//! schedule, and only the ticket of the latest input can release a value.

use crate::clock::Millis;

/// Search boxes settle after this long without a keystroke
pub const DEFAULT_DELAY_MS: Millis = 500;

/// Handle for one scheduled settle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Millis,
    ticket: Ticket,
}

#[derive(Debug)]
pub struct Debouncer<T> {
    delay_ms: Millis,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: Millis) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> Millis {
        self.delay_ms
    }

    /// Record a new input, superseding anything still pending.
    pub fn input(&mut self, value: T, now: Millis) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.delay_ms),
            ticket,
        });
        ticket
    }

    /// Timer callback for `ticket`. Yields the value only when the ticket is
    /// still the most recent one; stale timers get `None`.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Millis) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_final_value_settles() {
        let mut debouncer = Debouncer::new(500);
        let mut observed = Vec::new();

        // Keystrokes 100ms apart: "a", "ab", "abc"
        let mut tickets = Vec::new();
        for (i, value) in ["a", "ab", "abc"].iter().enumerate() {
            tickets.push(debouncer.input(value.to_string(), i as Millis * 100));
        }

        // Every timer eventually fires; only the last one releases anything.
        for ticket in tickets {
            if let Some(v) = debouncer.fire(ticket) {
                observed.push(v);
            }
        }

        assert_eq!(observed, vec!["abc".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_poll_waits_for_silence() {
        let mut debouncer = Debouncer::new(500);
        debouncer.input(1, 0);
        debouncer.input(2, 300);

        assert_eq!(debouncer.poll(500), None);
        assert_eq!(debouncer.poll(799), None);
        assert_eq!(debouncer.poll(800), Some(2));
        assert_eq!(debouncer.poll(5_000), None);
    }

    #[test]
    fn test_each_settled_input_notifies_once() {
        let mut debouncer = Debouncer::new(200);
        let first = debouncer.input("x", 0);
        assert_eq!(debouncer.fire(first), Some("x"));
        assert_eq!(debouncer.fire(first), None);

        let second = debouncer.input("y", 1_000);
        assert_eq!(debouncer.deadline(), Some(1_200));
        assert_eq!(debouncer.fire(second), Some("y"));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let mut debouncer = Debouncer::default();
        let ticket = debouncer.input(7, 0);
        debouncer.cancel();
        assert_eq!(debouncer.fire(ticket), None);
        assert_eq!(debouncer.delay_ms(), DEFAULT_DELAY_MS);
    }
}
