//! Book aggregate.
//!
//! # Responsibility
//! - Hold one book together with its author and genre set.
//! - Validate write-side invariants before persistence.
//!
//! # Invariants
//! - `author` is a value copy; later author edits do not propagate.
//! - `genres` is a snapshot with unique ids; its order carries no meaning.
//! - `id == NEW_ENTITY_ID` means the book has not been inserted yet.

use super::author::Author;
use super::genre::{Genre, GenreId};
use super::{ValidationError, NEW_ENTITY_ID};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type BookId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Author,
    pub genres: Vec<Genre>,
}

impl Book {
    /// Creates a book that has not been persisted yet.
    pub fn new(title: impl Into<String>, author: Author, genres: Vec<Genre>) -> Self {
        Self::with_id(NEW_ENTITY_ID, title, author, genres)
    }

    /// Creates a book with a caller-provided id.
    ///
    /// Used by update paths and by row decoders.
    pub fn with_id(
        id: BookId,
        title: impl Into<String>,
        author: Author,
        genres: Vec<Genre>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author,
            genres,
        }
    }

    /// Returns whether this book still needs an insert.
    pub fn is_new(&self) -> bool {
        self.id == NEW_ENTITY_ID
    }

    /// Genre ids as an ordered set, for order-independent comparison.
    pub fn genre_ids(&self) -> BTreeSet<GenreId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }

    /// Checks write-side invariants.
    ///
    /// # Errors
    /// - `BlankTitle` when the title is empty after trimming.
    /// - `DuplicateGenre` for the first genre id seen twice.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }

        let mut seen = BTreeSet::new();
        for genre in &self.genres {
            if !seen.insert(genre.id) {
                return Err(ValidationError::DuplicateGenre(genre.id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Book;
    use crate::model::author::Author;
    use crate::model::genre::Genre;
    use crate::model::ValidationError;

    fn author() -> Author {
        Author::new(1, "Author_1")
    }

    #[test]
    fn new_book_is_not_persisted() {
        let book = Book::new("Title", author(), Vec::new());
        assert!(book.is_new());
        assert_eq!(book.id, 0);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let book = Book::new("   ", author(), Vec::new());
        assert_eq!(book.validate(), Err(ValidationError::BlankTitle));
    }

    #[test]
    fn validate_rejects_duplicate_genres() {
        let book = Book::new(
            "Title",
            author(),
            vec![
                Genre::new(1, "Genre_1"),
                Genre::new(2, "Genre_2"),
                Genre::new(1, "Genre_1"),
            ],
        );
        assert_eq!(book.validate(), Err(ValidationError::DuplicateGenre(1)));
    }

    #[test]
    fn genre_ids_ignore_order() {
        let book = Book::new(
            "Title",
            author(),
            vec![Genre::new(3, "Genre_3"), Genre::new(1, "Genre_1")],
        );
        assert_eq!(book.genre_ids().into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }
}
