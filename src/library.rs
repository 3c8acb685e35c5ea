use std::{
    collections::{HashMap, VecDeque},
    fmt,
};

use crate::{
    book::{Book, Isbn, LendingState, PatronId},
    config::LibraryConfig,
    error::{LibraryError, Result},
    events::LibraryEvent,
    observers::{EventLogger, LibraryObserver, NotificationService},
    tree::TitleTree,
};

/// Result of a checkout request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The book was available and is now held by the patron
    CheckedOut,
    /// The book was lent out; the patron was queued at this 1-based position
    Waitlisted {
        /// Place in the queue
        position: usize,
    },
}

/// Result of returning a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Nobody was waiting; the book is back on the shelf
    Available,
    /// The book went straight to the next patron on the waitlist
    HandedOver(PatronId),
}

/// Library catalogue
///
/// Books are stored once, in the ISBN index. The title index holds ISBNs as
/// handles into it, so both views always see the same lending state. Every
/// operation updates the two indexes together.
pub struct Library {
    /// Primary index and owner of every book
    books: HashMap<Isbn, Book>,
    /// Secondary index ordered by title
    titles: TitleTree<Isbn>,
    /// Record of recent events, oldest first
    history: VecDeque<LibraryEvent>,
    /// Catalogue settings
    config: LibraryConfig,
    /// Registered event observers
    observers: Vec<Box<dyn LibraryObserver>>,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.books)
            .field("titles", &self.titles)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

impl Library {
    /// Create an empty catalogue with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LibraryConfig::default())
    }

    /// Create an empty catalogue with the given settings
    #[must_use]
    pub fn with_config(config: LibraryConfig) -> Self {
        let mut library = Self {
            books: HashMap::new(),
            titles: TitleTree::new(),
            history: VecDeque::new(),
            config,
            observers: Vec::new(),
        };
        if library.config.register_default_observers {
            library.register_observer(Box::new(EventLogger));
            library.register_observer(Box::new(NotificationService));
        }
        library
    }

    /// Register an observer to be notified of catalogue events
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Settings the catalogue was created with
    #[must_use]
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Number of catalogued books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalogue is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Add a new book to both indexes
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidField` if the title or author is blank,
    /// or `LibraryError::DuplicateIsbn` if the ISBN is already catalogued.
    /// Neither index is touched on error.
    pub fn add_book(
        &mut self,
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<()> {
        let book = Book::new(isbn, title, author)?;
        if self.books.contains_key(book.isbn()) {
            return Err(LibraryError::DuplicateIsbn(book.isbn().clone()));
        }

        let event =
            LibraryEvent::BookAdded { isbn: book.isbn().clone(), title: book.title().to_string() };
        self.titles.insert(book.title(), book.isbn().clone());
        self.books.insert(book.isbn().clone(), book);
        self.record(event);
        Ok(())
    }

    /// Look up a book by ISBN. O(1) expected
    #[must_use]
    pub fn find_by_isbn(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.get(isbn)
    }

    /// Look up a book by exact title
    ///
    /// When several books share the title, the first one on the title
    /// index's search path is returned.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&Book> {
        self.titles.search(title).and_then(|isbn| self.books.get(isbn))
    }

    /// Every book with exactly this title
    #[must_use]
    pub fn find_all_by_title(&self, title: &str) -> Vec<&Book> {
        self.titles.search_all(title).into_iter().filter_map(|isbn| self.books.get(isbn)).collect()
    }

    /// Request a book for a patron
    ///
    /// An available book is checked out to the patron straight away;
    /// otherwise the patron joins the back of its waitlist.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `LibraryError::UnknownIsbn` if no such book is catalogued
    /// - `LibraryError::AlreadyHolding` if the patron already has the book
    /// - `LibraryError::AlreadyWaitlisted` if the patron is already queued
    /// - `LibraryError::WaitlistFull` if the configured waitlist limit is reached
    pub fn checkout(&mut self, isbn: &Isbn, patron: PatronId) -> Result<CheckoutOutcome> {
        let limit = self.config.max_waitlist_len;
        let book =
            self.books.get_mut(isbn).ok_or_else(|| LibraryError::UnknownIsbn(isbn.clone()))?;

        let (outcome, event) = match book.holder().cloned() {
            None => {
                book.set_state(LendingState::CheckedOut(patron.clone()));
                (CheckoutOutcome::CheckedOut, LibraryEvent::CheckedOut {
                    isbn: isbn.clone(),
                    patron,
                })
            }
            Some(holder) if holder == patron => {
                return Err(LibraryError::AlreadyHolding { isbn: isbn.clone(), patron });
            }
            Some(_) => {
                if book.waitlist().contains(&patron) {
                    return Err(LibraryError::AlreadyWaitlisted { isbn: isbn.clone(), patron });
                }
                if let Some(limit) = limit.filter(|limit| book.waitlist().len() >= *limit) {
                    return Err(LibraryError::WaitlistFull { isbn: isbn.clone(), limit });
                }
                book.waitlist_mut().enqueue(patron.clone());
                let position = book.waitlist().len();
                (CheckoutOutcome::Waitlisted { position }, LibraryEvent::Waitlisted {
                    isbn: isbn.clone(),
                    patron,
                    position,
                })
            }
        };

        self.record(event);
        Ok(outcome)
    }

    /// Return a checked-out book
    ///
    /// If anyone is waiting, the book is checked out to the first patron in
    /// line; otherwise it becomes available.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownIsbn` if no such book is catalogued, or
    /// `LibraryError::NotCheckedOut` if the book is already on the shelf
    pub fn return_book(&mut self, isbn: &Isbn) -> Result<ReturnOutcome> {
        let book =
            self.books.get_mut(isbn).ok_or_else(|| LibraryError::UnknownIsbn(isbn.clone()))?;
        if !book.is_checked_out() {
            return Err(LibraryError::NotCheckedOut(isbn.clone()));
        }

        let (outcome, event) = if let Some(next) = book.waitlist_mut().dequeue() {
            book.set_state(LendingState::CheckedOut(next.clone()));
            (ReturnOutcome::HandedOver(next.clone()), LibraryEvent::HandedOver {
                isbn: isbn.clone(),
                patron: next,
            })
        } else {
            book.set_state(LendingState::Available);
            (ReturnOutcome::Available, LibraryEvent::Returned { isbn: isbn.clone() })
        };

        self.record(event);
        Ok(outcome)
    }

    /// Remove a book from both indexes, returning it
    ///
    /// A checked-out book can be removed; its waitlist goes with it.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownIsbn` if no such book is catalogued
    pub fn remove_book(&mut self, isbn: &Isbn) -> Result<Book> {
        let book = self.books.remove(isbn).ok_or_else(|| LibraryError::UnknownIsbn(isbn.clone()))?;
        let unindexed = self.titles.delete_matching(book.title(), |candidate| candidate == isbn);
        debug_assert!(unindexed.is_some(), "title index out of sync for {isbn}");

        self.record(LibraryEvent::BookRemoved {
            isbn: isbn.clone(),
            title: book.title().to_string(),
        });
        Ok(book)
    }

    /// All books in ascending title order
    #[must_use]
    pub fn list_books(&self) -> Vec<&Book> {
        self.titles.iter().filter_map(|(_, isbn)| self.books.get(isbn)).collect()
    }

    /// The title index, for inspection and visualization
    #[must_use]
    pub fn title_index(&self) -> &TitleTree<Isbn> {
        &self.titles
    }

    /// Recent events, oldest first
    #[must_use]
    pub fn history(&self) -> &VecDeque<LibraryEvent> {
        &self.history
    }

    /// Print the event history to stdout
    #[allow(clippy::arithmetic_side_effects)]
    pub fn print_history(&self) {
        println!("Event History:");
        for (i, event) in self.history.iter().enumerate() {
            println!("{}. {event}", i + 1);
        }
    }

    /// Notify observers and append to the bounded history
    fn record(&mut self, event: LibraryEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
        self.history.push_back(event);
        while self.history.len() > self.config.max_history_size {
            self.history.pop_front();
        }
    }
}

// Implementing display for nicer output
impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalogue ({} books):", self.len())?;
        for book in self.list_books() {
            writeln!(f, "  {book}")?;
        }
        Ok(())
    }
}
