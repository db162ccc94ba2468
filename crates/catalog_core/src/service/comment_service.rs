//! Comment use-case service.

use crate::model::book::BookId;
use crate::model::comment::{Comment, CommentId};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use crate::repo::comment_repo::CommentRepository;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum CommentServiceError {
    BookNotFound(BookId),
    CommentNotFound(CommentId),
    Repo(RepoError),
}

impl Display for CommentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::CommentNotFound(id) => write!(f, "comment not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommentServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "book", id } => Self::BookNotFound(id),
            RepoError::NotFound {
                entity: "comment",
                id,
            } => Self::CommentNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub struct CommentService<C, B> {
    comments: C,
    books: B,
}

impl<C, B> CommentService<C, B>
where
    C: CommentRepository,
    B: BookRepository,
{
    pub fn new(comments: C, books: B) -> Self {
        Self { comments, books }
    }

    pub fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        self.comments.find_by_id(id)
    }

    pub fn find_by_book_id(&self, book_id: BookId) -> RepoResult<Vec<Comment>> {
        self.comments.find_by_book_id(book_id)
    }

    /// Adds a comment to an existing book.
    pub fn insert(
        &self,
        book_id: BookId,
        text: impl Into<String>,
    ) -> Result<Comment, CommentServiceError> {
        let book = self
            .books
            .find_by_id(book_id)?
            .ok_or(CommentServiceError::BookNotFound(book_id))?;
        Ok(self.comments.save(&Comment::new(text, book))?)
    }

    /// Replaces the text of a comment; the owning book is kept.
    pub fn update(
        &self,
        id: CommentId,
        text: impl Into<String>,
    ) -> Result<Comment, CommentServiceError> {
        let mut comment = self
            .comments
            .find_by_id(id)?
            .ok_or(CommentServiceError::CommentNotFound(id))?;
        comment.text = text.into();
        Ok(self.comments.save(&comment)?)
    }

    pub fn delete_by_id(&self, id: CommentId) -> Result<(), CommentServiceError> {
        Ok(self.comments.delete_by_id(id)?)
    }
}
