use thiserror::Error;

use crate::book::{Isbn, PatronId};

/// Result type alias using [`LibraryError`].
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors returned by catalogue operations.
///
/// Every variant is raised before any index is touched, so a failed call
/// leaves the catalogue exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A catalogue entry or identifier was built from an absent or blank field
    #[error("invalid {field}: value must not be empty")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
    },

    /// A book with this ISBN is already catalogued
    #[error("a book with ISBN {0} is already in the catalogue")]
    DuplicateIsbn(Isbn),

    /// No book with this ISBN is catalogued
    #[error("no book with ISBN {0} in the catalogue")]
    UnknownIsbn(Isbn),

    /// The book is not currently checked out
    #[error("book {0} is not checked out")]
    NotCheckedOut(Isbn),

    /// The patron already holds the book
    #[error("patron {patron} already holds book {isbn}")]
    AlreadyHolding {
        /// Book being requested
        isbn: Isbn,
        /// Current holder
        patron: PatronId,
    },

    /// The patron is already queued for the book
    #[error("patron {patron} is already on the waitlist for book {isbn}")]
    AlreadyWaitlisted {
        /// Book being requested
        isbn: Isbn,
        /// Queued patron
        patron: PatronId,
    },

    /// The waitlist reached its configured limit
    #[error("waitlist for book {isbn} is full ({limit} patrons)")]
    WaitlistFull {
        /// Book being requested
        isbn: Isbn,
        /// Configured maximum waitlist length
        limit: usize,
    },

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}
