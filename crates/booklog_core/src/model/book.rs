//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its insert payload.
//! - Keep field constraints (non-empty text, year range) in one place.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another book.
//! - Records are immutable after insert; there is no update path.
//! - `year` stays within [`MIN_YEAR`, `MAX_YEAR`].

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned identifier of a book row.
pub type BookId = i64;

/// Earliest publication year accepted by the library.
pub const MIN_YEAR: i32 = 0;
/// Latest publication year accepted by the library.
pub const MAX_YEAR: i32 = 2100;

/// Fixed genre vocabulary.
///
/// Stored and serialized by display label, e.g. `"Non-fiction"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-fiction")]
    NonFiction,
    Science,
    Religious,
    Biography,
    Fantasy,
    Mystery,
    Others,
}

impl Genre {
    /// All genres in menu order.
    pub const ALL: [Genre; 8] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Science,
        Genre::Religious,
        Genre::Biography,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Others,
    ];

    /// Returns the display label, which is also the stored value.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-fiction",
            Genre::Science => "Science",
            Genre::Religious => "Religious",
            Genre::Biography => "Biography",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Others => "Others",
        }
    }

    /// Parses a stored label exactly as written by [`Genre::label`].
    pub fn from_label(value: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|genre| genre.label() == value)
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when user input does not name a known genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGenre(pub String);

impl Display for UnknownGenre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let expected = Genre::ALL
            .iter()
            .map(|genre| genre.label())
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "unknown genre `{}`; expected {expected}", self.0)
    }
}

impl Error for UnknownGenre {}

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Accepts labels case-insensitively; `nonfiction` and `non_fiction` are
    /// aliases of `Non-fiction`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        if normalized == "nonfiction" {
            return Ok(Genre::NonFiction);
        }
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label().to_ascii_lowercase() == normalized)
            .ok_or_else(|| UnknownGenre(s.trim().to_string()))
    }
}

/// Field-level validation failure for book payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    YearOutOfRange(i32),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::YearOutOfRange(year) => {
                write!(f, "year {year} must be within {MIN_YEAR}..={MAX_YEAR}")
            }
        }
    }
}

impl Error for BookValidationError {}

/// Insert payload for a new book; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Genre,
    pub read_status: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: Genre,
        read_status: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre,
            read_status,
        }
    }

    /// Checks text and year constraints.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyAuthor` when the field is blank after trimming.
    /// - `YearOutOfRange` when `year` is outside [`MIN_YEAR`, `MAX_YEAR`].
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year)
    }
}

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookWire")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Genre,
    pub read_status: bool,
}

impl Book {
    /// Combines a store-assigned id with an insert payload.
    pub fn from_new(id: BookId, book: NewBook) -> Self {
        Self {
            id,
            title: book.title,
            author: book.author,
            year: book.year,
            genre: book.genre,
            read_status: book.read_status,
        }
    }

    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year)
    }

    /// `"Read"` or `"Unread"`.
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} ({} - {}) {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

#[derive(Deserialize)]
struct BookWire {
    id: BookId,
    title: String,
    author: String,
    year: i32,
    genre: Genre,
    read_status: bool,
}

impl TryFrom<BookWire> for Book {
    type Error = BookValidationError;

    fn try_from(wire: BookWire) -> Result<Self, Self::Error> {
        let book = Book {
            id: wire.id,
            title: wire.title,
            author: wire.author,
            year: wire.year,
            genre: wire.genre,
            read_status: wire.read_status,
        };
        book.validate()?;
        Ok(book)
    }
}

fn validate_fields(title: &str, author: &str, year: i32) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }
    if author.trim().is_empty() {
        return Err(BookValidationError::EmptyAuthor);
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(BookValidationError::YearOutOfRange(year));
    }
    Ok(())
}
