//! Candidate catalog domain model.
//!
//! # Responsibility
//! - Define validated field types and the immutable `Record` value.
//! - Define the duplicate-free, insertion-ordered `Catalog` collection.
//!
//! # Invariants
//! - Every `Record` is identified by its `Email`.
//! - A `Catalog` never holds two records with the same email.
//! - Records are never edited in place; edits build a new `Record`.

pub mod catalog;
pub mod fields;
pub mod record;
