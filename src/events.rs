use std::fmt;

use serde::{Deserialize, Serialize};

use crate::book::{Isbn, PatronId};

/// Changes to the catalogue reported to observers and kept in the history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A book was added to both indexes
    BookAdded {
        /// Primary key of the new book
        isbn: Isbn,
        /// Title it is indexed under
        title: String,
    },
    /// A book was removed from both indexes
    BookRemoved {
        /// Primary key of the removed book
        isbn: Isbn,
        /// Title it was indexed under
        title: String,
    },
    /// An available book was lent to a patron
    CheckedOut {
        /// Book lent out
        isbn: Isbn,
        /// New holder
        patron: PatronId,
    },
    /// A patron joined the waitlist of a lent book
    Waitlisted {
        /// Book requested
        isbn: Isbn,
        /// Queued patron
        patron: PatronId,
        /// 1-based place in the queue
        position: usize,
    },
    /// A book came back and nobody was waiting for it
    Returned {
        /// Book returned to the shelf
        isbn: Isbn,
    },
    /// A returned book went straight to the next patron on its waitlist
    HandedOver {
        /// Book passed on
        isbn: Isbn,
        /// Patron now holding it
        patron: PatronId,
    },
}

impl LibraryEvent {
    /// Book the event is about
    #[must_use]
    pub fn isbn(&self) -> &Isbn {
        match self {
            Self::BookAdded { isbn, .. }
            | Self::BookRemoved { isbn, .. }
            | Self::CheckedOut { isbn, .. }
            | Self::Waitlisted { isbn, .. }
            | Self::Returned { isbn }
            | Self::HandedOver { isbn, .. } => isbn,
        }
    }
}

impl fmt::Display for LibraryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookAdded { isbn, title } => write!(f, "added \"{title}\" (ISBN: {isbn})"),
            Self::BookRemoved { isbn, title } => write!(f, "removed \"{title}\" (ISBN: {isbn})"),
            Self::CheckedOut { isbn, patron } => write!(f, "{patron} checked out {isbn}"),
            Self::Waitlisted { isbn, patron, position } => {
                write!(f, "{patron} joined the waitlist for {isbn} at position {position}")
            }
            Self::Returned { isbn } => write!(f, "{isbn} returned to the shelf"),
            Self::HandedOver { isbn, patron } => {
                write!(f, "{isbn} returned and handed over to {patron}")
            }
        }
    }
}
