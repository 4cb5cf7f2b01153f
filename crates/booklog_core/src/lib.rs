//! Core domain logic for booklog, a personal book tracker.
//! This crate owns the book model, its SQLite store and the library use-cases.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::book::{Book, BookId, BookValidationError, Genre, NewBook, UnknownGenre};
pub use repo::book_repo::{
    BookCounts, BookRepository, RepoError, RepoResult, SqliteBookRepository,
};
pub use search::book_search::{
    search_books, BookSearchQuery, SearchError, SearchField, SearchResult,
};
pub use service::library_service::{LibraryService, LibraryStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
