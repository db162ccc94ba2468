#![allow(dead_code)]

use catalog_core::db::open_db_in_memory;
use rusqlite::Connection;

/// Three authors, six genres, three books with two genres each, and one
/// comment per book.
const SEED_SQL: &str = "
INSERT INTO authors (id, full_name) VALUES
    (1, 'Author_1'), (2, 'Author_2'), (3, 'Author_3');
INSERT INTO genres (id, name) VALUES
    (1, 'Genre_1'), (2, 'Genre_2'), (3, 'Genre_3'),
    (4, 'Genre_4'), (5, 'Genre_5'), (6, 'Genre_6');
INSERT INTO books (id, title, author_id) VALUES
    (1, 'BookTitle_1', 1), (2, 'BookTitle_2', 2), (3, 'BookTitle_3', 3);
INSERT INTO books_genres (book_id, genre_id) VALUES
    (1, 1), (1, 2), (2, 3), (2, 4), (3, 5), (3, 6);
INSERT INTO comments (id, text, book_id) VALUES
    (1, 'Comment_1 for Book_1', 1),
    (2, 'Comment_2 for Book_2', 2),
    (3, 'Comment_3 for Book_3', 3);
";

pub fn seeded_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    conn
}

pub fn seed(conn: &Connection) {
    conn.execute_batch(SEED_SQL).unwrap();
}

pub fn count_rows(conn: &Connection, sql: &str, id: i64) -> i64 {
    conn.query_row(sql, [id], |row| row.get(0)).unwrap()
}

pub fn link_count(conn: &Connection, book_id: i64) -> i64 {
    count_rows(
        conn,
        "SELECT COUNT(*) FROM books_genres WHERE book_id = ?1;",
        book_id,
    )
}

pub fn book_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))
        .unwrap()
}
