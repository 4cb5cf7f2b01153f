//! Search module for book lookups.
//!
//! # Responsibility
//! - Expose exact-match lookup by title or author.
//!
//! # See also
//! - `repo::book_repo` for the shared row decoding.

pub mod book_search;
