//! Book aggregate repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load `Book` aggregates (book + author + genres) without N+1 queries.
//! - Persist books and replace their genre links inside one transaction.
//!
//! # Invariants
//! - `find_all` issues exactly three queries regardless of row count.
//! - `find_by_id` issues exactly one query.
//! - Every write commits all of its steps or none of them.
//! - Write-path failures surface as `RepoError::Write`.

use crate::db::{ensure_catalog_schema, DbError};
use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId};
use crate::model::genre::{Genre, GenreId};
use crate::model::ValidationError;
use crate::repo::assembler::assemble_books;
use crate::repo::genre_repo::load_genres_by_ids;
use crate::repo::rows::{
    decode_book_genre_link, decode_book_without_genres, decode_genre, decode_optional_genre,
    BookGenreLink,
};
use log::{debug, info, warn};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_WITH_AUTHOR_SELECT_SQL: &str = "SELECT
    b.id AS id,
    b.title AS title,
    a.id AS author_id,
    a.full_name AS full_name
FROM books b
INNER JOIN authors a ON a.id = b.author_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error shared by all catalog repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Update or delete targeted an id with no row behind it.
    NotFound { entity: &'static str, id: i64 },
    /// Query execution or row decoding failed.
    Read(DbError),
    /// A write failed; its transaction has been rolled back.
    Write(DbError),
    Validation(ValidationError),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Reclassifies a read failure raised inside a write transaction.
    pub(crate) fn into_write(self) -> Self {
        match self {
            Self::Read(err) => Self::Write(err),
            other => other,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Read(err) => write!(f, "read failed: {err}"),
            Self::Write(err) => write!(f, "write failed: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Read(err) | Self::Write(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Read(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Read(DbError::Sqlite(value))
    }
}

/// Repository interface for book aggregates.
pub trait BookRepository {
    /// Loads every book with author and genres, ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Book>>;
    /// Loads one book with author and genres.
    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Inserts (`id == 0`) or updates a book and replaces its genre links.
    fn save(&self, book: &Book) -> RepoResult<Book>;
    /// Deletes a book together with its genre links and comments.
    fn delete_by_id(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository.
///
/// Writes open their own transaction on the borrowed connection, so the
/// caller must not hold another open transaction on it.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a connection with the catalog schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Book>> {
        // One read transaction so the three batches see the same snapshot.
        // An already open caller transaction gives that guarantee by itself.
        let tx = if self.conn.is_autocommit() {
            Some(Transaction::new_unchecked(
                self.conn,
                TransactionBehavior::Deferred,
            )?)
        } else {
            None
        };
        let genres = all_genres(self.conn)?;
        let books = all_books_without_genres(self.conn)?;
        let links = all_book_genre_links(self.conn)?;
        if let Some(tx) = tx {
            tx.commit()?;
        }
        debug!(
            "event=book_find_all module=repo status=fetched books={} genres={} links={}",
            books.len(),
            genres.len(),
            links.len()
        );
        Ok(assemble_books(books, genres, links))
    }

    fn find_by_id(&self, id: BookId) -> RepoResult<Option<Book>> {
        load_book(self.conn, id)
    }

    fn save(&self, book: &Book) -> RepoResult<Book> {
        book.validate()?;
        let mode = if book.is_new() { "insert" } else { "update" };

        let result = save_in_tx(self.conn, book).map_err(RepoError::into_write);

        match &result {
            Ok(saved) => info!(
                "event=book_save module=repo status=ok mode={mode} book_id={} genre_count={}",
                saved.id,
                saved.genres.len()
            ),
            Err(err) => warn!(
                "event=book_save module=repo status=rolled_back mode={mode} book_id={} error={err}",
                book.id
            ),
        }
        result
    }

    fn delete_by_id(&self, id: BookId) -> RepoResult<()> {
        let result = delete_in_tx(self.conn, id).map_err(RepoError::into_write);

        match &result {
            Ok(()) => info!("event=book_delete module=repo status=ok book_id={id}"),
            Err(err) => {
                warn!("event=book_delete module=repo status=rolled_back book_id={id} error={err}")
            }
        }
        result
    }
}

pub(crate) fn all_genres(conn: &Connection) -> RepoResult<Vec<Genre>> {
    let mut stmt = conn.prepare(
        "SELECT id AS genre_id, name AS genre_name
         FROM genres
         ORDER BY id ASC;",
    )?;
    let genres = stmt
        .query_map([], decode_genre)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(genres)
}

pub(crate) fn all_books_without_genres(conn: &Connection) -> RepoResult<Vec<Book>> {
    let mut stmt = conn.prepare(&format!("{BOOK_WITH_AUTHOR_SELECT_SQL} ORDER BY b.id ASC;"))?;
    let books = stmt
        .query_map([], decode_book_without_genres)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(books)
}

pub(crate) fn all_book_genre_links(conn: &Connection) -> RepoResult<Vec<BookGenreLink>> {
    let mut stmt = conn.prepare(
        "SELECT book_id, genre_id
         FROM books_genres
         ORDER BY book_id ASC, genre_id ASC;",
    )?;
    let links = stmt
        .query_map([], decode_book_genre_link)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(links)
}

/// Loads one aggregate with a single left-join query.
///
/// The genre join fans out to one row per genre; the book is built from the
/// first row and each row with non-null genre columns contributes one genre.
/// A link whose genre row is missing is dropped, as in `assemble_books`.
pub(crate) fn load_book(conn: &Connection, id: BookId) -> RepoResult<Option<Book>> {
    let mut stmt = conn.prepare(
        "SELECT
            b.id AS id,
            b.title AS title,
            a.id AS author_id,
            a.full_name AS full_name,
            bg.genre_id AS link_genre_id,
            g.id AS genre_id,
            g.name AS genre_name
         FROM books b
         INNER JOIN authors a ON a.id = b.author_id
         LEFT JOIN books_genres bg ON bg.book_id = b.id
         LEFT JOIN genres g ON g.id = bg.genre_id
         WHERE b.id = ?1
         ORDER BY g.id ASC;",
    )?;

    let mut rows = stmt.query([id])?;
    let mut book: Option<Book> = None;
    while let Some(row) = rows.next()? {
        if book.is_none() {
            book = Some(decode_book_without_genres(row)?);
        }
        match decode_optional_genre(row)? {
            Some(genre) => {
                if let Some(current) = book.as_mut() {
                    current.genres.push(genre);
                }
            }
            None => {
                if let Some(genre_id) = row.get::<_, Option<GenreId>>("link_genre_id")? {
                    warn!(
                        "event=book_load module=repo status=orphan_link book_id={id} genre_id={genre_id}"
                    );
                }
            }
        }
    }

    Ok(book)
}

/// Runs one insert or update as a single unit of work.
///
/// Dropping the transaction on an early return rolls every step back.
/// `IMMEDIATE` takes the write lock up front so concurrent writers wait on
/// the busy timeout instead of failing on a lock upgrade.
fn save_in_tx(conn: &Connection, book: &Book) -> RepoResult<Book> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let saved = if book.is_new() {
        insert_book(&tx, book)?
    } else {
        update_book(&tx, book)?
    };
    tx.commit()?;
    Ok(saved)
}

fn delete_in_tx(conn: &Connection, id: BookId) -> RepoResult<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute("DELETE FROM books_genres WHERE book_id = ?1;", [id])?;
    tx.execute("DELETE FROM comments WHERE book_id = ?1;", [id])?;
    let changed = tx.execute("DELETE FROM books WHERE id = ?1;", [id])?;
    if changed == 0 {
        return Err(RepoError::not_found("book", id));
    }
    tx.commit()?;
    Ok(())
}

fn insert_book(conn: &Connection, book: &Book) -> RepoResult<Book> {
    ensure_references_exist(conn, book)?;

    conn.execute(
        "INSERT INTO books (title, author_id) VALUES (?1, ?2);",
        params![book.title.as_str(), book.author.id],
    )?;

    let mut saved = book.clone();
    saved.id = conn.last_insert_rowid();
    insert_book_genres(conn, saved.id, &saved.genres)?;
    Ok(saved)
}

fn update_book(conn: &Connection, book: &Book) -> RepoResult<Book> {
    ensure_references_exist(conn, book)?;

    let changed = conn.execute(
        "UPDATE books
         SET title = ?2, author_id = ?3
         WHERE id = ?1;",
        params![book.id, book.title.as_str(), book.author.id],
    )?;
    if changed == 0 {
        return Err(RepoError::not_found("book", book.id));
    }

    replace_book_genres(conn, book.id, &book.genres)?;
    Ok(book.clone())
}

/// Replaces the whole genre link set of one book.
fn replace_book_genres(conn: &Connection, book_id: BookId, genres: &[Genre]) -> RepoResult<()> {
    conn.execute("DELETE FROM books_genres WHERE book_id = ?1;", [book_id])?;
    insert_book_genres(conn, book_id, genres)
}

fn insert_book_genres(conn: &Connection, book_id: BookId, genres: &[Genre]) -> RepoResult<()> {
    if genres.is_empty() {
        return Ok(());
    }

    let mut stmt =
        conn.prepare_cached("INSERT INTO books_genres (book_id, genre_id) VALUES (?1, ?2);")?;
    for genre in genres {
        stmt.execute(params![book_id, genre.id])?;
    }
    Ok(())
}

fn ensure_references_exist(conn: &Connection, book: &Book) -> RepoResult<()> {
    if !author_exists(conn, book.author.id)? {
        return Err(RepoError::not_found("author", book.author.id));
    }

    let wanted = book.genre_ids();
    let found: Vec<GenreId> = load_genres_by_ids(conn, &wanted)?
        .into_iter()
        .map(|genre| genre.id)
        .collect();
    if let Some(missing) = wanted.into_iter().find(|id| !found.contains(id)) {
        return Err(RepoError::not_found("genre", missing));
    }

    Ok(())
}

fn author_exists(conn: &Connection, author_id: AuthorId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?1);",
        [author_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
