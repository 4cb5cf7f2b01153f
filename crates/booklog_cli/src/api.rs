//! Use-case API for the CLI surfaces.
//!
//! # Responsibility
//! - Expose one function per library operation with envelope results.
//! - Acquire a store connection per call and release it before returning.
//!
//! # Invariants
//! - Functions never panic; failures come back as `ok = false` envelopes.
//! - No connection outlives the call that opened it.

use booklog_core::db::{self, open_db};
use booklog_core::{
    search_books, Book, BookId, BookSearchQuery, LibraryService, LibraryStats, NewBook, RepoError,
    SqliteBookRepository,
};
use log::warn;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub const BOOK_ADDED: &str = "Book added successfully";
pub const BOOK_REMOVED: &str = "Book removed successfully";
pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const LIBRARY_EMPTY: &str = "Your library is empty";
pub const NO_MATCHES: &str = "No matching book found";

/// Result of a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created book, for add.
    pub book_id: Option<BookId>,
    /// Rows deleted, for remove.
    pub removed: usize,
    pub message: String,
}

impl ActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            book_id: None,
            removed: 0,
            message: message.into(),
        }
    }
}

/// Result of a listing operation (search or list-all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListResponse {
    pub ok: bool,
    pub items: Vec<Book>,
    /// Heading for non-empty results, empty-state text otherwise.
    pub message: String,
}

impl ListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Result of the statistics operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub ok: bool,
    pub stats: Option<LibraryStats>,
    pub message: String,
}

/// Creates the library schema when missing.
pub fn initialize(db_path: &Path) -> ActionResponse {
    match db::initialize(db_path) {
        Ok(()) => ActionResponse {
            ok: true,
            book_id: None,
            removed: 0,
            message: format!("Library ready at {}", db_path.display()),
        },
        Err(err) => ActionResponse::failure(format!("initialize failed: {err}")),
    }
}

/// Adds one book.
pub fn add_book(db_path: &Path, book: &NewBook) -> ActionResponse {
    match with_library_service(db_path, |service| service.add_book(book)) {
        Ok(id) => ActionResponse {
            ok: true,
            book_id: Some(id),
            removed: 0,
            message: BOOK_ADDED.to_string(),
        },
        Err(err) => ActionResponse::failure(format!("add failed: {err}")),
    }
}

/// Removes every book whose title matches `title` ignoring case.
pub fn remove_book(db_path: &Path, title: &str) -> ActionResponse {
    match with_library_service(db_path, |service| service.remove_by_title(title)) {
        Ok(removed) => ActionResponse {
            ok: true,
            book_id: None,
            removed,
            message: if removed == 1 {
                BOOK_REMOVED.to_string()
            } else {
                format!("{BOOK_REMOVED} ({removed} copies)")
            },
        },
        Err(ApiError::Repo(RepoError::TitleNotFound(_))) => {
            ActionResponse::failure(BOOK_NOT_FOUND)
        }
        Err(err) => ActionResponse::failure(format!("remove failed: {err}")),
    }
}

/// Looks up books by exact title or author.
pub fn search(db_path: &Path, query: &BookSearchQuery) -> ListResponse {
    let conn = match open_store(db_path) {
        Ok(conn) => conn,
        Err(err) => return ListResponse::failure(format!("search failed: {err}")),
    };

    match search_books(&conn, query) {
        Ok(items) => {
            let message = if items.is_empty() {
                NO_MATCHES
            } else {
                "Matching books:"
            };
            ListResponse {
                ok: true,
                items,
                message: message.to_string(),
            }
        }
        Err(err) => ListResponse::failure(format!("search failed: {err}")),
    }
}

/// Lists every book in storage order.
pub fn list_all(db_path: &Path) -> ListResponse {
    match with_library_service(db_path, |service| service.list_all()) {
        Ok(items) => {
            let message = if items.is_empty() {
                LIBRARY_EMPTY
            } else {
                "Your library:"
            };
            ListResponse {
                ok: true,
                items,
                message: message.to_string(),
            }
        }
        Err(err) => ListResponse::failure(format!("list failed: {err}")),
    }
}

/// Computes total count and read percentage.
pub fn statistics(db_path: &Path) -> StatsResponse {
    match with_library_service(db_path, |service| service.statistics()) {
        Ok(stats) => StatsResponse {
            ok: true,
            stats: Some(stats),
            message: format!(
                "Total books: {}\nPercentage read: {:.2}%",
                stats.total, stats.percentage_read
            ),
        },
        Err(err) => StatsResponse {
            ok: false,
            stats: None,
            message: format!("statistics failed: {err}"),
        },
    }
}

#[derive(Debug)]
enum ApiError {
    Open(db::DbError),
    Repo(RepoError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "library open failed: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

/// Opens the library for one call; the connection closes when dropped.
fn open_store(db_path: &Path) -> Result<Connection, ApiError> {
    open_db(db_path).map_err(|err| {
        warn!("event=api_call module=cli status=error error_code=db_open_failed");
        ApiError::Open(err)
    })
}

fn with_library_service<T>(
    db_path: &Path,
    f: impl FnOnce(&LibraryService<SqliteBookRepository<'_>>) -> booklog_core::RepoResult<T>,
) -> Result<T, ApiError> {
    let conn = open_store(db_path)?;
    let service = LibraryService::new(SqliteBookRepository::new(&conn));
    f(&service).map_err(ApiError::Repo)
}
