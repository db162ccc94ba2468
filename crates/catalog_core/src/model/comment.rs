//! Comment value object.
//!
//! A comment always carries a fully loaded `Book`, never a lazy handle.

use super::book::Book;
use super::{ValidationError, NEW_ENTITY_ID};
use serde::{Deserialize, Serialize};

pub type CommentId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub book: Book,
}

impl Comment {
    /// Creates a comment that has not been persisted yet.
    pub fn new(text: impl Into<String>, book: Book) -> Self {
        Self {
            id: NEW_ENTITY_ID,
            text: text.into(),
            book,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_ENTITY_ID
    }

    /// Checks write-side invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::BlankCommentText);
        }
        if self.book.is_new() {
            return Err(ValidationError::UnpersistedBook);
        }
        Ok(())
    }
}
