use booklog_core::db::open_db_in_memory;
use booklog_core::{
    BookRepository, Genre, LibraryService, NewBook, RepoError, SqliteBookRepository,
};
use std::collections::HashSet;

#[test]
fn add_then_list_includes_record_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let book = NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true);
    let id = repo.add_book(&book).unwrap();

    let books = repo.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, id);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].author, "Herbert");
    assert_eq!(books[0].year, 1965);
    assert_eq!(books[0].genre, Genre::Fiction);
    assert!(books[0].read_status);
}

#[test]
fn duplicate_titles_get_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let book = NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, false);

    let ids = (0..3)
        .map(|_| repo.add_book(&book).unwrap())
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), 3);
    assert_eq!(repo.list_books().unwrap().len(), 3);
}

#[test]
fn list_returns_storage_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    for title in ["c", "a", "b"] {
        repo.add_book(&NewBook::new(title, "x", 2000, Genre::Others, false))
            .unwrap();
    }

    let titles = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["c", "a", "b"]);
}

#[test]
fn remove_matches_title_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();
    repo.add_book(&NewBook::new("Emma", "Austen", 1815, Genre::Fiction, false))
        .unwrap();

    let removed = repo.remove_books_by_title("dune").unwrap();
    assert_eq!(removed, 1);

    let remaining = repo.list_books().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Emma");
}

#[test]
fn remove_deletes_every_duplicate_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();
    repo.add_book(&NewBook::new("DUNE", "Someone", 2020, Genre::Science, false))
        .unwrap();

    assert_eq!(repo.remove_books_by_title("Dune").unwrap(), 2);
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn remove_missing_title_returns_not_found_and_keeps_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();

    let err = repo.remove_books_by_title("Neuromancer").unwrap_err();
    assert!(matches!(err, RepoError::TitleNotFound(ref title) if title == "Neuromancer"));
    assert_eq!(repo.list_books().unwrap().len(), 1);
}

#[test]
fn remove_requires_whole_title_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.add_book(&NewBook::new("Dune Messiah", "Herbert", 1969, Genre::Fiction, false))
        .unwrap();

    assert!(repo.remove_books_by_title("Dune").is_err());
    assert_eq!(repo.list_books().unwrap().len(), 1);
}

#[test]
fn validation_failure_blocks_add() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo
        .add_book(&NewBook::new("", "Nobody", 2000, Genre::Others, false))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn ids_are_not_reused_after_remove() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let first = repo
        .add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();
    repo.remove_books_by_title("Dune").unwrap();

    let second = repo
        .add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();
    assert!(second > first);
}

#[test]
fn schema_rejects_unknown_genre_and_keeps_library_listable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.add_book(&NewBook::new("Dune", "Herbert", 1965, Genre::Fiction, true))
        .unwrap();

    let result = conn.execute(
        "INSERT INTO books (title, author, year, genre, read_status)
         VALUES ('Odd', 'Writer', 1990, 'Fantasty', 0);",
        [],
    );
    assert!(result.is_err());

    let books = repo.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
}

#[test]
fn every_genre_label_is_accepted_by_schema() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    for genre in Genre::ALL {
        repo.add_book(&NewBook::new("Sample", "Writer", 2000, genre, false))
            .unwrap();
    }

    let stored = repo
        .list_books()
        .unwrap()
        .into_iter()
        .map(|book| book.genre)
        .collect::<Vec<_>>();
    assert_eq!(stored, Genre::ALL.to_vec());
}

#[test]
fn service_delegates_to_repository() {
    let conn = open_db_in_memory().unwrap();
    let service = LibraryService::new(SqliteBookRepository::new(&conn));

    let id = service
        .add("1984", "Orwell", 1949, Genre::Fiction, true)
        .unwrap();
    let books = service.list_all().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, id);
    assert_eq!(books[0].author, "Orwell");
    assert_eq!(service.remove_by_title("1984").unwrap(), 1);
    assert!(service.list_all().unwrap().is_empty());
}
