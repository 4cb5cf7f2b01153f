use booklog_core::db::open_db_in_memory;
use booklog_core::{Genre, LibraryService, NewBook, SqliteBookRepository};

#[test]
fn statistics_on_empty_library_are_zero() {
    let conn = open_db_in_memory().unwrap();
    let service = LibraryService::new(SqliteBookRepository::new(&conn));

    let stats = service.statistics().unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.read, 0);
    assert_eq!(stats.percentage_read, 0.0);
}

#[test]
fn statistics_count_read_share() {
    let conn = open_db_in_memory().unwrap();
    let service = LibraryService::new(SqliteBookRepository::new(&conn));

    service
        .add_book(&NewBook::new("Emma", "Austen", 1815, Genre::Fiction, false))
        .unwrap();
    service
        .add("1984", "Orwell", 1949, Genre::Fiction, true)
        .unwrap();

    let stats = service.statistics().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.read, 1);
    assert_eq!(format!("{:.2}", stats.percentage_read), "50.00");
}

#[test]
fn statistics_follow_removals() {
    let conn = open_db_in_memory().unwrap();
    let service = LibraryService::new(SqliteBookRepository::new(&conn));

    service
        .add("Dune", "Herbert", 1965, Genre::Fiction, true)
        .unwrap();
    service
        .add("Emma", "Austen", 1815, Genre::Fiction, false)
        .unwrap();
    service
        .add("Cosmos", "Sagan", 1980, Genre::Science, false)
        .unwrap();
    service.remove_by_title("emma").unwrap();

    let stats = service.statistics().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.read, 1);
    assert_eq!(stats.percentage_read, 50.0);
}
