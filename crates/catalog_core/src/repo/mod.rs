//! Repository layer for the catalog store.
//!
//! # Responsibility
//! - Decode flat rows into value objects without an ORM.
//! - Assemble and persist `Book` aggregates with explicit SQL.
//!
//! # Invariants
//! - Repositories borrow one `rusqlite::Connection` and never own it.
//! - Not-found on update/delete is reported as `RepoError::NotFound`.

mod assembler;
pub mod author_repo;
pub mod book_repo;
pub mod comment_repo;
pub mod genre_repo;
mod rows;
