use std::cell::Cell;
use std::rc::Rc;

/// Hands out tickets for in-flight requests; only the most recently issued
/// ticket is current. Responses carrying an older ticket are discarded.
#[derive(Clone, Default)]
pub struct LatestOnly {
    generation: Rc<Cell<u64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Invalidates every outstanding ticket, e.g. when the owning view is
    /// torn down.
    pub fn cancel(&self) {
        self.issue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let guard = LatestOnly::new();
        let first = guard.issue();
        assert!(guard.is_current(first));
        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn cancel_invalidates_outstanding_ticket() {
        let guard = LatestOnly::new();
        let ticket = guard.issue();
        guard.cancel();
        assert!(!guard.is_current(ticket));
    }

    #[test]
    fn clones_share_generation() {
        let guard = LatestOnly::new();
        let clone = guard.clone();
        let ticket = guard.issue();
        clone.issue();
        assert!(!guard.is_current(ticket));
    }
}
