//! Core domain logic for Roster, a single-user candidate catalog.
//! The versioned store and the predicate filter engine live here; parsing and
//! rendering belong to the callers.

pub mod db;
pub mod filter;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use filter::classify::{classify_predicate, ClassifyCriteria, Criterion, FilterError};
pub use filter::predicate::{compose, RecordPredicate};
pub use filter::view::{filter_records, FilterView};
pub use history::versioned_store::{HistoryError, VersionedStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Catalog, CatalogError};
pub use model::fields::{
    Address, Email, FieldError, InterviewDuration, JobPosition, Name, Notes, Phone, StartTime,
    Tag, Team,
};
pub use model::record::{Record, RecordDraft, RecordPatch};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::catalog_service::{CatalogService, DisplayOrder, ServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
