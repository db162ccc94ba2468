//! Read-only author repository.

use crate::db::ensure_catalog_schema;
use crate::model::author::{Author, AuthorId};
use crate::repo::book_repo::RepoResult;
use crate::repo::rows::decode_author;
use rusqlite::{Connection, OptionalExtension};

const AUTHOR_SELECT_SQL: &str = "SELECT id AS author_id, full_name FROM authors";

pub trait AuthorRepository {
    fn find_all(&self) -> RepoResult<Vec<Author>>;
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
}

pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let authors = stmt
            .query_map([], decode_author)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(authors)
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                decode_author,
            )
            .optional()?;
        Ok(author)
    }
}
