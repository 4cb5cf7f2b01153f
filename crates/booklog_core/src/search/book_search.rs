//! Exact-match book search.
//!
//! # Responsibility
//! - Look up books by one field with case-sensitive equality.
//! - Return full records in storage order.
//!
//! # Invariants
//! - The searched column comes from [`SearchField`], never from user text.
//! - No match yields an empty list, not an error.

use crate::db::DbError;
use crate::model::book::Book;
use crate::repo::book_repo::{parse_book_row, RepoError, BOOK_SELECT_SQL};
use log::debug;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Column a search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            other => Err(format!(
                "unsupported search field `{other}`; expected title|author"
            )),
        }
    }
}

/// Exact-match search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearchQuery {
    pub field: SearchField,
    /// Compared verbatim; no trimming or case folding.
    pub value: String,
}

impl BookSearchQuery {
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn by_title(value: impl Into<String>) -> Self {
        Self::new(SearchField::Title, value)
    }

    pub fn by_author(value: impl Into<String>) -> Self {
        Self::new(SearchField::Author, value)
    }
}

/// Returns every book whose `query.field` equals `query.value` exactly.
pub fn search_books(conn: &Connection, query: &BookSearchQuery) -> SearchResult<Vec<Book>> {
    let sql = format!(
        "{BOOK_SELECT_SQL} WHERE {} = ?1 ORDER BY id ASC;",
        query.field.column()
    );

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([query.value.as_str()])?;
    let mut books = Vec::new();

    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }

    debug!(
        "event=book_search module=search status=ok field={} hits={}",
        query.field.column(),
        books.len()
    );
    Ok(books)
}
