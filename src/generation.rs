//! Request generation counter
//!
//! Every request takes a ticket. Only the holder of the most recent ticket
//! may render its response; older ones have been superseded.

use std::sync::atomic::{AtomicU64, Ordering};

/// A ticket handed out by [`Generation::issue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonically increasing request counter
#[derive(Debug, Default)]
pub struct Generation {
    latest: AtomicU64,
}

impl Generation {
    /// Creates a counter that has not issued any ticket yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, superseding all earlier ones
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The most recently issued ticket
    pub fn current(&self) -> Ticket {
        Ticket(self.latest.load(Ordering::Acquire))
    }

    /// Whether no newer ticket was issued since `ticket`
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current() == ticket
    }
}
