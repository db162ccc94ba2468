use catalog_core::{Author, Book, Comment, Genre, ValidationError, NEW_ENTITY_ID};

#[test]
fn book_serializes_nested_author_and_genres() {
    let book = Book::with_id(
        1,
        "BookTitle_1",
        Author::new(1, "Author_1"),
        vec![Genre::new(2, "Genre_2")],
    );

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["title"], "BookTitle_1");
    assert_eq!(json["author"]["full_name"], "Author_1");
    assert_eq!(json["genres"][0]["name"], "Genre_2");

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn author_is_embedded_by_value() {
    let mut author = Author::new(1, "Author_1");
    let book = Book::new("Copy", author.clone(), Vec::new());

    author.full_name = "Renamed".to_string();
    assert_eq!(book.author.full_name, "Author_1");
}

#[test]
fn comment_validation_requires_text_and_persisted_book() {
    let persisted = Book::with_id(3, "Title", Author::new(1, "Author_1"), Vec::new());
    let draft = Book::new("Title", Author::new(1, "Author_1"), Vec::new());

    assert_eq!(Comment::new("ok", persisted.clone()).validate(), Ok(()));
    assert_eq!(
        Comment::new("\n", persisted).validate(),
        Err(ValidationError::BlankCommentText)
    );
    assert_eq!(
        Comment::new("ok", draft).validate(),
        Err(ValidationError::UnpersistedBook)
    );
    assert_eq!(Comment::new("ok", Book::new("t", Author::new(1, "a"), vec![])).id, NEW_ENTITY_ID);
}
