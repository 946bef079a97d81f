//! Linear undo/redo history over catalog snapshots.
//!
//! # Responsibility
//! - Own the single mutable path to "the current catalog".
//! - Record one snapshot per committed mutation.
//!
//! # Invariants
//! - `0 <= cursor < len` at all times; a fresh store has one snapshot.
//! - Commit after undo discards every snapshot past the cursor.

pub mod versioned_store;
