//! Book use-case service.
//!
//! # Responsibility
//! - Build `Book` values from ids (author id, genre ids) and persist them.
//! - Report unknown authors/genres before any write is attempted.
//!
//! # Invariants
//! - A book is always written with at least one genre.
//! - Genre ids are deduplicated before lookup.

use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId};
use crate::model::genre::GenreId;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use crate::repo::genre_repo::GenreRepository;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum BookServiceError {
    BookNotFound(BookId),
    AuthorNotFound(AuthorId),
    /// Ids from the request that have no genre row, ascending.
    GenresNotFound(Vec<GenreId>),
    EmptyGenres,
    Repo(RepoError),
}

impl Display for BookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::AuthorNotFound(id) => write!(f, "author not found: {id}"),
            Self::GenresNotFound(ids) => write!(f, "genres not found: {ids:?}"),
            Self::EmptyGenres => write!(f, "at least one genre is required"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for BookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "book", id } => Self::BookNotFound(id),
            RepoError::NotFound {
                entity: "author",
                id,
            } => Self::AuthorNotFound(id),
            RepoError::NotFound { entity: "genre", id } => Self::GenresNotFound(vec![id]),
            other => Self::Repo(other),
        }
    }
}

/// Book service facade over author/genre/book repositories.
pub struct BookService<B, A, G> {
    books: B,
    authors: A,
    genres: G,
}

impl<B, A, G> BookService<B, A, G>
where
    B: BookRepository,
    A: AuthorRepository,
    G: GenreRepository,
{
    pub fn new(books: B, authors: A, genres: G) -> Self {
        Self {
            books,
            authors,
            genres,
        }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Book>> {
        self.books.find_all()
    }

    pub fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        self.books.find_by_id(id)
    }

    /// Creates a book from ids and returns it with its assigned id.
    pub fn insert(
        &self,
        title: impl Into<String>,
        author_id: AuthorId,
        genre_ids: &[GenreId],
    ) -> Result<Book, BookServiceError> {
        let book = self.resolve(title.into(), author_id, genre_ids)?;
        Ok(self.books.save(&book)?)
    }

    /// Replaces title, author and the whole genre set of an existing book.
    pub fn update(
        &self,
        id: BookId,
        title: impl Into<String>,
        author_id: AuthorId,
        genre_ids: &[GenreId],
    ) -> Result<Book, BookServiceError> {
        let mut book = self.resolve(title.into(), author_id, genre_ids)?;
        book.id = id;
        Ok(self.books.save(&book)?)
    }

    pub fn delete_by_id(&self, id: BookId) -> Result<(), BookServiceError> {
        Ok(self.books.delete_by_id(id)?)
    }

    fn resolve(
        &self,
        title: String,
        author_id: AuthorId,
        genre_ids: &[GenreId],
    ) -> Result<Book, BookServiceError> {
        let wanted: BTreeSet<GenreId> = genre_ids.iter().copied().collect();
        if wanted.is_empty() {
            return Err(BookServiceError::EmptyGenres);
        }

        let genres = self.genres.find_all_by_ids(&wanted)?;
        if genres.len() != wanted.len() {
            let found: BTreeSet<GenreId> = genres.iter().map(|genre| genre.id).collect();
            let missing = wanted.difference(&found).copied().collect();
            return Err(BookServiceError::GenresNotFound(missing));
        }

        let author = self
            .authors
            .find_by_id(author_id)?
            .ok_or(BookServiceError::AuthorNotFound(author_id))?;

        Ok(Book::new(title, author, genres))
    }
}
