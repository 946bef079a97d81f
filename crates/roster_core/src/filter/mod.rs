//! Record filtering by composed keyword predicates.
//!
//! # Responsibility
//! - Model keyword predicates as a tagged enum with AND composition.
//! - Validate classify criteria into one conjunctive predicate.
//! - Materialize the displayed subset of a snapshot.
//!
//! # Invariants
//! - Predicates are pure; evaluating one never touches catalog state.
//! - Filtered output keeps the snapshot's insertion order.

pub mod classify;
pub mod predicate;
pub mod view;
