//! Request generations for overlapping fetches.
//!
//! Every fetch takes a [`Ticket`] before its request goes out. When the
//! response arrives it may render only if no later ticket has rendered
//! already, so a slow early response can never overwrite a newer view.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct Generation {
    issued: AtomicU64,
    rendered: Mutex<u64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Run `render` if `ticket` is newer than anything rendered so far.
    /// The check and the render happen under one lock.
    pub fn commit<F: FnOnce()>(&self, ticket: Ticket, render: F) -> bool {
        let mut rendered = self.rendered.lock();
        if ticket.0 <= *rendered {
            return false;
        }
        *rendered = ticket.0;
        render();
        true
    }

    pub fn latest_rendered(&self) -> u64 {
        *self.rendered.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_wins() {
        let generation = Generation::new();
        let first = generation.issue();
        let second = generation.issue();
        assert!(second > first);

        let mut renders = Vec::new();
        assert!(generation.commit(second, || renders.push(2)));
        assert!(!generation.commit(first, || renders.push(1)));
        assert_eq!(renders, vec![2]);
        assert_eq!(generation.latest_rendered(), 2);
    }

    #[test]
    fn test_in_order_commits_all_render() {
        let generation = Generation::new();
        let a = generation.issue();
        let b = generation.issue();
        assert!(generation.commit(a, || {}));
        assert!(generation.commit(b, || {}));
    }
}
