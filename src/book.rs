use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{LibraryError, Result},
    waitlist::Waitlist,
};

/// Fails with `InvalidField` when `value` is empty or whitespace only
fn require_non_blank(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() { Err(LibraryError::InvalidField { field }) } else { Ok(()) }
}

/// International Standard Book Number, used as the primary key of the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Isbn(String);

impl Isbn {
    /// Create an identifier from raw text, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidField` if nothing is left after trimming.
    /// Any other text is accepted, including `"0"`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        require_non_blank(trimmed, "isbn")?;
        Ok(Self(trimmed.to_string()))
    }

    /// The identifier as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a library patron requesting books
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatronId(String);

impl PatronId {
    /// Create a patron identifier, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidField` if nothing is left after trimming.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        require_non_blank(trimmed, "patron")?;
        Ok(Self(trimmed.to_string()))
    }

    /// The identifier as text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lending state of a catalogued book
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LendingState {
    /// Book is on the shelf
    #[default]
    Available,
    /// Book is checked out by a patron
    CheckedOut(PatronId),
}

impl LendingState {
    /// Get a human-readable description of the state
    #[must_use]
    pub fn get_description(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::CheckedOut(_) => "Checked Out",
        }
    }
}

/// A single catalogued book
///
/// Identity fields are fixed at construction. Lending state and the waitlist
/// are only changed through [`crate::Library`], which keeps them settled: an
/// available book never has anyone waiting for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    /// Primary key
    isbn: Isbn,
    /// Secondary key, ordered by the title index
    title: String,
    /// Author as given
    author: String,
    /// Current lending state
    state: LendingState,
    /// Patrons waiting for the book, first come first served
    waitlist: Waitlist,
}

impl Book {
    /// Build a new, available book with an empty waitlist
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidField` if the title or author is empty
    /// or whitespace only.
    pub fn new(isbn: Isbn, title: impl Into<String>, author: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let author = author.into();
        require_non_blank(&title, "title")?;
        require_non_blank(&author, "author")?;

        Ok(Self { isbn, title, author, state: LendingState::Available, waitlist: Waitlist::new() })
    }

    /// Primary key of the book
    #[must_use]
    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    /// Title of the book
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author of the book
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Current lending state
    #[must_use]
    pub fn state(&self) -> &LendingState {
        &self.state
    }

    /// Whether the book is currently lent out
    #[must_use]
    pub fn is_checked_out(&self) -> bool {
        matches!(self.state, LendingState::CheckedOut(_))
    }

    /// Patron currently holding the book, if any
    #[must_use]
    pub fn holder(&self) -> Option<&PatronId> {
        match &self.state {
            LendingState::CheckedOut(patron) => Some(patron),
            LendingState::Available => None,
        }
    }

    /// Patrons waiting for the book
    #[must_use]
    pub fn waitlist(&self) -> &Waitlist {
        &self.waitlist
    }

    /// Replace the lending state
    pub(crate) fn set_state(&mut self, state: LendingState) {
        self.state = state;
    }

    /// Mutable access to the waitlist
    pub(crate) fn waitlist_mut(&mut self) -> &mut Waitlist {
        &mut self.waitlist
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" by {} (ISBN: {}) - Status: {}",
            self.title,
            self.author,
            self.isbn,
            self.state.get_description()
        )
    }
}
