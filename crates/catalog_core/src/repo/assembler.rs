//! In-memory join of flat batch reads into `Book` aggregates.
//!
//! # Invariants
//! - Output order equals the order of the input books.
//! - A link whose genre id is unknown is dropped, never materialized.

use crate::model::book::{Book, BookId};
use crate::model::genre::{Genre, GenreId};
use crate::repo::rows::BookGenreLink;
use log::warn;
use std::collections::HashMap;

/// Attaches genres to books using the link rows.
///
/// Books without link rows keep an empty genre vector.
pub(crate) fn assemble_books(
    books: Vec<Book>,
    genres: Vec<Genre>,
    links: Vec<BookGenreLink>,
) -> Vec<Book> {
    let genres_by_id: HashMap<GenreId, Genre> =
        genres.into_iter().map(|genre| (genre.id, genre)).collect();

    let mut genre_ids_by_book: HashMap<BookId, Vec<GenreId>> = HashMap::new();
    for link in links {
        genre_ids_by_book
            .entry(link.book_id)
            .or_default()
            .push(link.genre_id);
    }

    books
        .into_iter()
        .map(|mut book| {
            let genre_ids = genre_ids_by_book.remove(&book.id).unwrap_or_default();
            book.genres = genre_ids
                .into_iter()
                .filter_map(|genre_id| match genres_by_id.get(&genre_id) {
                    Some(genre) => Some(genre.clone()),
                    None => {
                        warn!(
                            "event=book_assemble module=repo status=orphan_link book_id={} genre_id={genre_id}",
                            book.id
                        );
                        None
                    }
                })
                .collect();
            book
        })
        .collect()
}
