//! Library use-case service.
//!
//! # Responsibility
//! - Provide add/remove/list/statistics entry points for core callers.
//! - Derive read-percentage statistics from raw repository counts.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Statistics never divide by zero; an empty library reports 0%.

use crate::model::book::{Book, BookId, Genre, NewBook};
use crate::repo::book_repo::{BookCounts, BookRepository, RepoResult};
use serde::Serialize;

/// Aggregate statistics over the whole library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryStats {
    pub total: u64,
    pub read: u64,
    /// Share of books marked read, in percent (0.0..=100.0).
    pub percentage_read: f64,
}

impl From<BookCounts> for LibraryStats {
    fn from(counts: BookCounts) -> Self {
        let percentage_read = if counts.total == 0 {
            0.0
        } else {
            counts.read as f64 / counts.total as f64 * 100.0
        };
        Self {
            total: counts.total,
            read: counts.read,
            percentage_read,
        }
    }
}

/// Use-case service wrapper for library operations.
pub struct LibraryService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> LibraryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one book; duplicates of existing titles are allowed.
    pub fn add_book(&self, book: &NewBook) -> RepoResult<BookId> {
        self.repo.add_book(book)
    }

    /// Convenience form of [`Self::add_book`] taking individual fields.
    pub fn add(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: Genre,
        read_status: bool,
    ) -> RepoResult<BookId> {
        self.repo
            .add_book(&NewBook::new(title, author, year, genre, read_status))
    }

    /// Removes all books matching `title` case-insensitively.
    ///
    /// Returns repository-level `TitleNotFound` unchanged.
    pub fn remove_by_title(&self, title: &str) -> RepoResult<usize> {
        self.repo.remove_books_by_title(title)
    }

    /// Lists every book in storage order.
    pub fn list_all(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    pub fn statistics(&self) -> RepoResult<LibraryStats> {
        self.repo.count_books().map(LibraryStats::from)
    }
}
