mod common;

use catalog_core::{
    Author, Book, BookRepository, Comment, CommentRepository, Genre, RepoError,
    SqliteBookRepository, SqliteCommentRepository, ValidationError,
};
use common::seeded_db;

fn seeded_book_1() -> Book {
    Book::with_id(
        1,
        "BookTitle_1",
        Author::new(1, "Author_1"),
        vec![Genre::new(1, "Genre_1"), Genre::new(2, "Genre_2")],
    )
}

#[test]
fn find_by_id_attaches_full_book_aggregate() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    let comment = repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(
        comment,
        Comment {
            id: 1,
            text: "Comment_1 for Book_1".to_string(),
            book: seeded_book_1(),
        }
    );
}

#[test]
fn find_by_id_returns_none_for_unknown_id() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    assert_eq!(repo.find_by_id(404).unwrap(), None);
}

#[test]
fn find_by_book_id_lists_comments_in_id_order() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    let added = repo.save(&Comment::new("second on book 1", seeded_book_1())).unwrap();
    let comments = repo.find_by_book_id(1).unwrap();

    assert_eq!(
        comments.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, added.id]
    );
    assert!(comments.iter().all(|c| c.book == seeded_book_1()));
}

#[test]
fn find_by_book_id_for_unknown_book_is_empty() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_book_id(999).unwrap().is_empty());
}

#[test]
fn save_inserts_and_updates_text() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    let mut saved = repo.save(&Comment::new("Original Text", seeded_book_1())).unwrap();
    assert!(saved.id > 0);

    saved.text = "Updated Text".to_string();
    repo.save(&saved).unwrap();

    let loaded = repo.find_by_id(saved.id).unwrap().unwrap();
    assert_eq!(loaded.text, "Updated Text");
    assert_eq!(loaded.book.id, 1);
}

#[test]
fn save_rejects_unknown_comment_and_book() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    let mut ghost = Comment::new("ghost", seeded_book_1());
    ghost.id = 500;
    let err = repo.save(&ghost).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "comment",
            id: 500
        }
    ));

    let mut missing_book = seeded_book_1();
    missing_book.id = 999;
    let err = repo.save(&Comment::new("orphan", missing_book)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "book",
            id: 999
        }
    ));
}

#[test]
fn save_rejects_blank_text_and_unpersisted_book() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    let err = repo.save(&Comment::new("  ", seeded_book_1())).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankCommentText)
    ));

    let unsaved = Book::new("Draft", Author::new(1, "Author_1"), Vec::new());
    let err = repo.save(&Comment::new("text", unsaved)).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::UnpersistedBook)
    ));
}

#[test]
fn delete_by_id_removes_comment_once() {
    let conn = seeded_db();
    let repo = SqliteCommentRepository::try_new(&conn).unwrap();

    repo.delete_by_id(2).unwrap();
    assert_eq!(repo.find_by_id(2).unwrap(), None);

    let err = repo.delete_by_id(2).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "comment",
            id: 2
        }
    ));
}

#[test]
fn comments_follow_book_updates() {
    let conn = seeded_db();
    let books = SqliteBookRepository::try_new(&conn).unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();

    let mut book = books.find_by_id(1).unwrap().unwrap();
    book.genres = vec![Genre::new(4, "Genre_4")];
    books.save(&book).unwrap();

    let comment = comments.find_by_id(1).unwrap().unwrap();
    assert_eq!(comment.book.genres, vec![Genre::new(4, "Genre_4")]);
}
