mod common;

use catalog_core::{
    Author, BookService, BookServiceError, CommentService, CommentServiceError, Genre,
    SqliteAuthorRepository, SqliteBookRepository, SqliteCommentRepository, SqliteGenreRepository,
};
use common::seeded_db;
use rusqlite::Connection;

type SqliteBookService<'conn> = BookService<
    SqliteBookRepository<'conn>,
    SqliteAuthorRepository<'conn>,
    SqliteGenreRepository<'conn>,
>;

fn book_service(conn: &Connection) -> SqliteBookService<'_> {
    BookService::new(
        SqliteBookRepository::try_new(conn).unwrap(),
        SqliteAuthorRepository::try_new(conn).unwrap(),
        SqliteGenreRepository::try_new(conn).unwrap(),
    )
}

fn comment_service(
    conn: &Connection,
) -> CommentService<SqliteCommentRepository<'_>, SqliteBookRepository<'_>> {
    CommentService::new(
        SqliteCommentRepository::try_new(conn).unwrap(),
        SqliteBookRepository::try_new(conn).unwrap(),
    )
}

#[test]
fn insert_resolves_author_and_genres_from_ids() {
    let conn = seeded_db();
    let service = book_service(&conn);

    let book = service.insert("Resolved", 2, &[5, 3, 5]).unwrap();

    assert!(book.id > 0);
    assert_eq!(book.author, Author::new(2, "Author_2"));
    assert_eq!(
        book.genres,
        vec![Genre::new(3, "Genre_3"), Genre::new(5, "Genre_5")]
    );
    assert_eq!(service.find_by_id(book.id).unwrap().unwrap(), book);
}

#[test]
fn insert_reports_missing_genres_and_author() {
    let conn = seeded_db();
    let service = book_service(&conn);

    let err = service.insert("Missing", 1, &[1, 40, 41]).unwrap_err();
    assert!(matches!(err, BookServiceError::GenresNotFound(ref ids) if ids == &vec![40, 41]));

    let err = service.insert("Missing", 99, &[1]).unwrap_err();
    assert!(matches!(err, BookServiceError::AuthorNotFound(99)));

    let err = service.insert("Missing", 1, &[]).unwrap_err();
    assert!(matches!(err, BookServiceError::EmptyGenres));

    assert_eq!(service.find_all().unwrap().len(), 3);
}

#[test]
fn update_replaces_book_state_and_maps_not_found() {
    let conn = seeded_db();
    let service = book_service(&conn);

    let updated = service.update(2, "BookTitle_2 v2", 3, &[1]).unwrap();
    assert_eq!(service.find_by_id(2).unwrap().unwrap(), updated);

    let err = service.update(999, "Ghost", 1, &[1]).unwrap_err();
    assert!(matches!(err, BookServiceError::BookNotFound(999)));
}

#[test]
fn delete_maps_not_found() {
    let conn = seeded_db();
    let service = book_service(&conn);

    service.delete_by_id(3).unwrap();
    let err = service.delete_by_id(3).unwrap_err();
    assert!(matches!(err, BookServiceError::BookNotFound(3)));
}

#[test]
fn comment_service_adds_updates_and_deletes() {
    let conn = seeded_db();
    let service = comment_service(&conn);

    let created = service.insert(1, "New Test Comment").unwrap();
    assert_eq!(created.book.id, 1);
    assert_eq!(created.book.genres.len(), 2);

    let updated = service.update(created.id, "Edited").unwrap();
    assert_eq!(updated.text, "Edited");
    assert_eq!(updated.book, created.book);

    service.delete_by_id(created.id).unwrap();
    assert_eq!(service.find_by_book_id(1).unwrap().len(), 1);
}

#[test]
fn comment_service_maps_missing_targets() {
    let conn = seeded_db();
    let service = comment_service(&conn);

    let err = service.insert(999, "nowhere").unwrap_err();
    assert!(matches!(err, CommentServiceError::BookNotFound(999)));

    let err = service.update(999, "nothing").unwrap_err();
    assert!(matches!(err, CommentServiceError::CommentNotFound(999)));

    let err = service.delete_by_id(999).unwrap_err();
    assert!(matches!(err, CommentServiceError::CommentNotFound(999)));
}
