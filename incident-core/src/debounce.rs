//! Trailing-edge debounce.
//!
//! The debouncer owns no timer. Callers either arm an external timer with
//! the [`Ticket`] returned by [`Debouncer::input`] and hand it back through
//! [`Debouncer::fire`], or drive it with a clock through
//! [`Debouncer::poll`].

use std::time::Duration;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies one input. Only the newest ticket can release a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    due: Duration,
    ticket: Ticket,
}

#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new input at `now`, restarting the quiet period.
    pub fn input(&mut self, value: T, now: Duration) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
            ticket,
        });
        ticket
    }

    /// Releases the pending value if `ticket` belongs to the latest input.
    pub fn fire(&mut self, ticket: Ticket) -> Option<T> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Releases the pending value once the quiet period has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(p) if p.due <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Drops the pending value; outstanding tickets become inert.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
