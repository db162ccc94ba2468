//! Read-only genre repository.
//!
//! # Invariants
//! - Results are ordered by id.
//! - Unknown ids in `find_all_by_ids` are skipped, not reported.

use crate::db::ensure_catalog_schema;
use crate::model::genre::{Genre, GenreId};
use crate::repo::book_repo::{all_genres, RepoResult};
use crate::repo::rows::decode_genre;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeSet;

pub trait GenreRepository {
    fn find_all(&self) -> RepoResult<Vec<Genre>>;
    /// Loads the genres whose ids are in `ids`.
    fn find_all_by_ids(&self, ids: &BTreeSet<GenreId>) -> RepoResult<Vec<Genre>>;
}

pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Genre>> {
        all_genres(self.conn)
    }

    fn find_all_by_ids(&self, ids: &BTreeSet<GenreId>) -> RepoResult<Vec<Genre>> {
        load_genres_by_ids(self.conn, ids)
    }
}

/// Loads genres by id with one `IN (...)` query.
///
/// Empty input returns an empty vector without touching the database.
pub(crate) fn load_genres_by_ids(
    conn: &Connection,
    ids: &BTreeSet<GenreId>,
) -> RepoResult<Vec<Genre>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT id AS genre_id, name AS genre_name
         FROM genres
         WHERE id IN ({placeholders})
         ORDER BY id ASC;"
    ))?;
    let genres = stmt
        .query_map(params_from_iter(ids.iter()), decode_genre)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(genres)
}
