//! Domain model for the personal library.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every stored book is identified by a store-assigned `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
