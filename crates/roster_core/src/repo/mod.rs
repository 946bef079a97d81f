//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define load/save contracts for whole catalog states.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Loaded records pass field validation and identity uniqueness; bad
//!   persisted rows surface as `RepoError::InvalidData`, never as a
//!   partially loaded catalog.

pub mod record_repo;
