//! In-memory library catalogue.
//!
//! Books are stored once in an ISBN-keyed map and indexed a second time by
//! an unbalanced, title-ordered binary search tree. Each book carries a FIFO
//! waitlist of patrons; returning a book hands it straight to the next
//! patron in line.

pub mod book;
pub mod config;
pub mod error;
pub mod events;
pub mod library;
pub mod observers;
pub mod tree;
pub mod visualization;
pub mod waitlist;

pub use book::{Book, Isbn, LendingState, PatronId};
pub use config::LibraryConfig;
pub use error::{LibraryError, Result};
pub use events::LibraryEvent;
pub use library::{CheckoutOutcome, Library, ReturnOutcome};
pub use observers::{EventLogger, LibraryObserver, NotificationService};
pub use tree::TitleTree;
pub use visualization::TreeVisualization;
pub use waitlist::Waitlist;
