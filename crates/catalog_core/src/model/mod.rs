//! Catalog domain model.
//!
//! # Responsibility
//! - Define the value objects shared by repositories and services.
//! - Keep aggregates as plain snapshots with no back-references.
//!
//! # Invariants
//! - Every entity is identified by an `i64` id assigned by storage.
//! - `NEW_ENTITY_ID` (0) marks a value that has not been persisted yet.

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Id carried by values that have not been written to storage yet.
pub const NEW_ENTITY_ID: i64 = 0;

/// Rejection reasons for values that must not reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Book title is empty or whitespace only.
    BlankTitle,
    /// The same genre id appears more than once in `Book::genres`.
    DuplicateGenre(genre::GenreId),
    /// Comment text is empty or whitespace only.
    BlankCommentText,
    /// Comment points at a book that was never persisted.
    UnpersistedBook,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "book title must not be blank"),
            Self::DuplicateGenre(id) => write!(f, "genre {id} is listed more than once"),
            Self::BlankCommentText => write!(f, "comment text must not be blank"),
            Self::UnpersistedBook => write!(f, "comment must reference a persisted book"),
        }
    }
}

impl Error for ValidationError {}
