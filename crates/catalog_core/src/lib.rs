//! Catalog store core: books, authors, genres and comments over SQLite.
//!
//! Book aggregates are loaded and written with explicit SQL: batch reads are
//! joined in memory, single reads scan a left join, and writes replace the
//! genre link set inside one transaction.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::comment::{Comment, CommentId};
pub use model::genre::{Genre, GenreId};
pub use model::{ValidationError, NEW_ENTITY_ID};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use repo::comment_repo::{CommentRepository, SqliteCommentRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use service::book_service::{BookService, BookServiceError};
pub use service::comment_service::{CommentService, CommentServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
