//! Row decoders shared by catalog repositories.
//!
//! Every decoder maps exactly one result row to one value and never issues a
//! query. Columns are read by name, so every SELECT feeding a decoder must use
//! the aliases listed on the decoder.

use crate::model::author::Author;
use crate::model::book::{Book, BookId};
use crate::model::comment::CommentId;
use crate::model::genre::{Genre, GenreId};
use rusqlite::Row;

/// One row of the `books_genres` relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BookGenreLink {
    pub book_id: BookId,
    pub genre_id: GenreId,
}

/// Comment columns before the owning book aggregate is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommentHead {
    pub id: CommentId,
    pub text: String,
    pub book_id: BookId,
}

/// Columns: `author_id`, `full_name`.
pub(crate) fn decode_author(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get("author_id")?,
        full_name: row.get("full_name")?,
    })
}

/// Columns: `genre_id`, `genre_name`.
pub(crate) fn decode_genre(row: &Row<'_>) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get("genre_id")?,
        name: row.get("genre_name")?,
    })
}

/// Same columns as `decode_genre`, both nullable (left-join padding).
pub(crate) fn decode_optional_genre(row: &Row<'_>) -> rusqlite::Result<Option<Genre>> {
    let Some(id) = row.get::<_, Option<GenreId>>("genre_id")? else {
        return Ok(None);
    };
    Ok(Some(Genre {
        id,
        name: row.get("genre_name")?,
    }))
}

/// Columns: `id`, `title`, `author_id`, `full_name`.
///
/// The returned book has an empty genre vector.
pub(crate) fn decode_book_without_genres(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book::with_id(
        row.get("id")?,
        row.get::<_, String>("title")?,
        decode_author(row)?,
        Vec::new(),
    ))
}

/// Columns: `book_id`, `genre_id`.
pub(crate) fn decode_book_genre_link(row: &Row<'_>) -> rusqlite::Result<BookGenreLink> {
    Ok(BookGenreLink {
        book_id: row.get("book_id")?,
        genre_id: row.get("genre_id")?,
    })
}

/// Columns: `comment_id`, `text`, `book_id`.
pub(crate) fn decode_comment_head(row: &Row<'_>) -> rusqlite::Result<CommentHead> {
    Ok(CommentHead {
        id: row.get("comment_id")?,
        text: row.get("text")?,
        book_id: row.get("book_id")?,
    })
}
