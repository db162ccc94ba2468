//! Catalog use-case services.
//!
//! # Responsibility
//! - Resolve caller-supplied ids into value objects before writes.
//! - Map repository not-found errors into use-case specific variants.

pub mod book_service;
pub mod comment_service;
