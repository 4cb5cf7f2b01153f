//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide add/remove/list/count APIs over the `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewBook::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing order is storage order (`id ASC`).

use crate::db::DbError;
use crate::model::book::{Book, BookId, BookValidationError, Genre, NewBook};
use log::{debug, info};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year,
    genre,
    read_status
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    /// No row matched a remove-by-title request.
    TitleNotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::TitleNotFound(title) => write!(f, "book not found: `{title}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::TitleNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw row counts backing library statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookCounts {
    pub total: u64,
    pub read: u64,
}

/// Repository interface for book operations.
pub trait BookRepository {
    fn add_book(&self, book: &NewBook) -> RepoResult<BookId>;
    /// Removes every book whose title equals `title` ignoring ASCII case.
    ///
    /// Returns the number of removed rows, or `TitleNotFound` when zero.
    fn remove_books_by_title(&self, title: &str) -> RepoResult<usize>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn count_books(&self) -> RepoResult<BookCounts>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn add_book(&self, book: &NewBook) -> RepoResult<BookId> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (
                title,
                author,
                year,
                genre,
                read_status
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year,
                book.genre.label(),
                bool_to_int(book.read_status),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("event=book_add module=repo status=ok book_id={id}");
        Ok(id)
    }

    fn remove_books_by_title(&self, title: &str) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM books WHERE LOWER(title) = LOWER(?1);",
            [title],
        )?;

        if removed == 0 {
            info!("event=book_remove module=repo status=not_found removed=0");
            return Err(RepoError::TitleNotFound(title.to_string()));
        }

        info!("event=book_remove module=repo status=ok removed={removed}");
        Ok(removed)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        debug!("event=book_list module=repo status=ok count={}", books.len());
        Ok(books)
    }

    fn count_books(&self) -> RepoResult<BookCounts> {
        let (total, read): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(read_status = 1), 0) FROM books;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let to_count = |value: i64, column: &str| {
            u64::try_from(value).map_err(|_| {
                RepoError::InvalidData(format!("negative {column} count `{value}`"))
            })
        };

        Ok(BookCounts {
            total: to_count(total, "total")?,
            read: to_count(read, "read")?,
        })
    }
}

pub(crate) fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let genre_text: String = row.get("genre")?;
    let genre = Genre::from_label(&genre_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid genre `{genre_text}` in books.genre"))
    })?;

    let read_status = match row.get::<_, i64>("read_status")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid read_status value `{other}` in books.read_status"
            )));
        }
    };

    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        genre,
        read_status,
    };
    book.validate()?;
    Ok(book)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
