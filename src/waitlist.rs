use std::collections::{VecDeque, vec_deque};

use serde::Serialize;

use crate::book::PatronId;

/// First-in, first-out queue of patrons waiting for a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Waitlist {
    /// Queued patrons, front is served next
    queue: VecDeque<PatronId>,
}

impl Waitlist {
    /// Create an empty waitlist
    #[must_use]
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    /// Add a patron to the back of the queue. O(1)
    pub fn enqueue(&mut self, patron: PatronId) {
        self.queue.push_back(patron);
    }

    /// Remove and return the patron at the front of the queue. O(1)
    pub fn dequeue(&mut self) -> Option<PatronId> {
        self.queue.pop_front()
    }

    /// Patron who will be served next, without removing them
    #[must_use]
    pub fn peek(&self) -> Option<&PatronId> {
        self.queue.front()
    }

    /// Number of waiting patrons
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nobody is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether the patron is already queued
    #[must_use]
    pub fn contains(&self, patron: &PatronId) -> bool {
        self.queue.contains(patron)
    }

    /// Queued patrons in the order they will be served
    #[must_use]
    pub fn iter(&self) -> vec_deque::Iter<'_, PatronId> {
        self.queue.iter()
    }
}

impl<'a> IntoIterator for &'a Waitlist {
    type Item = &'a PatronId;
    type IntoIter = vec_deque::Iter<'a, PatronId>;

    fn into_iter(self) -> Self::IntoIter {
        self.queue.iter()
    }
}
