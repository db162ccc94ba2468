//! Comment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist comments against existing books.
//! - Return comments with their full book aggregate attached.
//!
//! # Invariants
//! - A loaded comment never carries a partially populated book.
//! - `find_by_book_id` loads the book aggregate once for all comments.

use crate::db::ensure_catalog_schema;
use crate::model::book::BookId;
use crate::model::comment::{Comment, CommentId};
use crate::repo::book_repo::{load_book, RepoError, RepoResult};
use crate::repo::rows::{decode_comment_head, CommentHead};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

const COMMENT_SELECT_SQL: &str = "SELECT id AS comment_id, text, book_id FROM comments";

pub trait CommentRepository {
    fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;
    /// Lists comments of one book ordered by id; unknown book yields empty.
    fn find_by_book_id(&self, book_id: BookId) -> RepoResult<Vec<Comment>>;
    /// Inserts (`id == 0`) or updates a comment.
    fn save(&self, comment: &Comment) -> RepoResult<Comment>;
    fn delete_by_id(&self, id: CommentId) -> RepoResult<()>;
}

pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_schema(conn)?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let head = self
            .conn
            .query_row(
                &format!("{COMMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                decode_comment_head,
            )
            .optional()?;
        let Some(head) = head else {
            return Ok(None);
        };

        let Some(book) = load_book(self.conn, head.book_id)? else {
            return Err(RepoError::not_found("book", head.book_id));
        };
        Ok(Some(Comment {
            id: head.id,
            text: head.text,
            book,
        }))
    }

    fn find_by_book_id(&self, book_id: BookId) -> RepoResult<Vec<Comment>> {
        let Some(book) = load_book(self.conn, book_id)? else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE book_id = ?1 ORDER BY id ASC;"
        ))?;
        let heads = stmt
            .query_map([book_id], decode_comment_head)?
            .collect::<rusqlite::Result<Vec<CommentHead>>>()?;

        Ok(heads
            .into_iter()
            .map(|head| Comment {
                id: head.id,
                text: head.text,
                book: book.clone(),
            })
            .collect())
    }

    fn save(&self, comment: &Comment) -> RepoResult<Comment> {
        comment.validate()?;
        let mode = if comment.is_new() { "insert" } else { "update" };

        let result = save_in_tx(self.conn, comment).map_err(RepoError::into_write);
        match &result {
            Ok(saved) => info!(
                "event=comment_save module=repo status=ok mode={mode} comment_id={} book_id={}",
                saved.id, saved.book.id
            ),
            Err(err) => warn!(
                "event=comment_save module=repo status=rolled_back mode={mode} comment_id={} error={err}",
                comment.id
            ),
        }
        result
    }

    fn delete_by_id(&self, id: CommentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE id = ?1;", [id])
            .map_err(|err| RepoError::from(err).into_write())?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", id));
        }
        info!("event=comment_delete module=repo status=ok comment_id={id}");
        Ok(())
    }
}

fn save_in_tx(conn: &Connection, comment: &Comment) -> RepoResult<Comment> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let book_exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1);",
        [comment.book.id],
        |row| row.get(0),
    )?;
    if book_exists != 1 {
        return Err(RepoError::not_found("book", comment.book.id));
    }

    let mut saved = comment.clone();
    if comment.is_new() {
        tx.execute(
            "INSERT INTO comments (text, book_id) VALUES (?1, ?2);",
            params![comment.text.as_str(), comment.book.id],
        )?;
        saved.id = tx.last_insert_rowid();
    } else {
        let changed = tx.execute(
            "UPDATE comments SET text = ?2, book_id = ?3 WHERE id = ?1;",
            params![comment.id, comment.text.as_str(), comment.book.id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found("comment", comment.id));
        }
    }

    tx.commit()?;
    Ok(saved)
}
