//! Catalog use-case service.
//!
//! # Responsibility
//! - Execute mutating actions as exactly one history commit each.
//! - Execute list/find/classify/sort as queries that never commit.
//! - Re-apply the last successful predicate whenever the current snapshot
//!   changes, and save the current snapshot through the repository.
//!
//! # Invariants
//! - A rejected action leaves history, view and storage untouched.
//! - `ServiceError::Repo` is reported after the history move; the new
//!   snapshot and view stay in place and storage lags behind.
//! - Indexes are 1-based positions in the displayed list.
//! - Log lines carry metadata only, never record field values.

use crate::filter::classify::{classify_predicate, ClassifyCriteria, FilterError};
use crate::filter::predicate::RecordPredicate;
use crate::filter::view::FilterView;
use crate::history::versioned_store::{HistoryError, VersionedStore};
use crate::model::catalog::{Catalog, CatalogError};
use crate::model::fields::{InterviewDuration, Notes, StartTime};
use crate::model::record::{Record, RecordPatch};
use crate::repo::record_repo::{RecordRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Index outside the displayed list.
    InvalidIndex { index: usize, displayed: usize },
    /// Edit request changes no field.
    NothingToEdit,
    Catalog(CatalogError),
    History(HistoryError),
    Filter(FilterError),
    /// Persistence failure. For mutations the commit already happened.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIndex { index, displayed } => write!(
                f,
                "invalid candidate index {index}: {displayed} candidate(s) displayed"
            ),
            Self::NothingToEdit => write!(f, "at least one field to edit must be provided"),
            Self::Catalog(err) => write!(f, "{err}"),
            Self::History(err) => write!(f, "{err}"),
            Self::Filter(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::History(err) => Some(err),
            Self::Filter(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidIndex { .. } | Self::NothingToEdit => None,
        }
    }
}

impl From<CatalogError> for ServiceError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<HistoryError> for ServiceError {
    fn from(value: HistoryError) -> Self {
        Self::History(value)
    }
}

impl From<FilterError> for ServiceError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Ordering applied on top of the filtered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    /// Catalog insertion order.
    #[default]
    Insertion,
    /// Scheduled interviews first, earliest start first.
    StartTime,
}

/// Catalog session facade over a repository implementation.
pub struct CatalogService<R: RecordRepository> {
    repo: R,
    store: VersionedStore,
    view: FilterView,
    active_predicate: RecordPredicate,
    order: DisplayOrder,
}

impl<R: RecordRepository> CatalogService<R> {
    /// Loads the stored catalog and starts a fresh history on top of it.
    pub fn open(repo: R) -> Result<Self, ServiceError> {
        let catalog = repo.load_catalog()?;
        info!(
            "event=catalog_open module=service status=ok records={}",
            catalog.len()
        );
        Ok(Self::with_catalog(repo, catalog))
    }

    /// Starts a session from an in-memory catalog without reading storage.
    pub fn with_catalog(repo: R, catalog: Catalog) -> Self {
        let view = FilterView::new(&catalog);
        Self {
            repo,
            store: VersionedStore::new(catalog),
            view,
            active_predicate: RecordPredicate::MatchAll,
            order: DisplayOrder::Insertion,
        }
    }

    /// Records currently shown to the user.
    pub fn displayed(&self) -> &[Record] {
        self.view.displayed()
    }

    /// Current catalog snapshot.
    pub fn current(&self) -> &Catalog {
        self.store.current()
    }

    /// Read-only access to history position and length.
    pub fn history(&self) -> &VersionedStore {
        &self.store
    }

    /// Predicate the displayed list was last computed with.
    pub fn active_predicate(&self) -> &RecordPredicate {
        &self.active_predicate
    }

    pub fn display_order(&self) -> DisplayOrder {
        self.order
    }

    /// Adds a new candidate.
    pub fn add_record(&mut self, record: Record) -> Result<Record, ServiceError> {
        let added = record.clone();
        self.commit_with("add", |catalog| catalog.add(record))?;
        Ok(added)
    }

    /// Deletes the candidate at displayed `index` and returns it.
    pub fn delete_record(&mut self, index: usize) -> Result<Record, ServiceError> {
        let target = self.record_at(index)?;
        self.commit_with("delete", |catalog| catalog.remove(&target))
    }

    /// Applies `patch` to the candidate at displayed `index`.
    pub fn edit_record(
        &mut self,
        index: usize,
        patch: &RecordPatch,
    ) -> Result<Record, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::NothingToEdit);
        }
        let target = self.record_at(index)?;
        let edited = patch.apply_to(&target);
        self.replace_record("edit", &target, edited)
    }

    /// Sets or clears the interview slot of the candidate at `index`.
    pub fn schedule_interview(
        &mut self,
        index: usize,
        start_time: Option<StartTime>,
        duration: Option<InterviewDuration>,
    ) -> Result<Record, ServiceError> {
        let target = self.record_at(index)?;
        let edited = target.with_schedule(start_time, duration);
        self.replace_record("schedule", &target, edited)
    }

    /// Replaces the notes of the candidate at `index`.
    pub fn set_notes(&mut self, index: usize, notes: Notes) -> Result<Record, ServiceError> {
        let target = self.record_at(index)?;
        let edited = target.with_notes(notes);
        self.replace_record("notes", &target, edited)
    }

    /// Removes every candidate. Undoable like any other mutation.
    pub fn clear(&mut self) -> Result<(), ServiceError> {
        self.commit_with("clear", |catalog| {
            *catalog = Catalog::new();
            Ok::<(), CatalogError>(())
        })
    }

    /// Shows every candidate in insertion order.
    pub fn list_all(&mut self) -> &[Record] {
        self.show(RecordPredicate::MatchAll, "list")
    }

    /// Shows candidates whose name contains any of `keywords` as a word.
    pub fn find_by_name(&mut self, keywords: Vec<String>) -> &[Record] {
        self.show(RecordPredicate::NameContains(keywords), "find")
    }

    /// Shows candidates matching every classify criterion.
    ///
    /// On error the displayed list and active predicate are unchanged.
    pub fn classify(&mut self, criteria: &ClassifyCriteria) -> Result<&[Record], ServiceError> {
        let predicate = match classify_predicate(criteria) {
            Ok(predicate) => predicate,
            Err(err) => {
                warn!("event=catalog_query module=service op=classify status=error error={err}");
                return Err(err.into());
            }
        };
        Ok(self.show(predicate, "classify"))
    }

    /// Orders the displayed candidates by interview start time.
    ///
    /// Display-only: the catalog and history are not touched. The order
    /// sticks until the next list/find/classify.
    pub fn sort_by_start_time(&mut self) -> &[Record] {
        self.order = DisplayOrder::StartTime;
        self.view.order_by_start_time();
        info!(
            "event=catalog_query module=service op=sort status=ok displayed={}",
            self.view.len()
        );
        self.view.displayed()
    }

    /// Moves back one snapshot.
    pub fn undo(&mut self) -> Result<(), ServiceError> {
        self.move_cursor("undo", VersionedStore::undo)
    }

    /// Moves forward one snapshot.
    pub fn redo(&mut self) -> Result<(), ServiceError> {
        self.move_cursor("redo", VersionedStore::redo)
    }

    fn record_at(&self, index: usize) -> Result<Record, ServiceError> {
        index
            .checked_sub(1)
            .and_then(|zero_based| self.view.get(zero_based))
            .cloned()
            .ok_or(ServiceError::InvalidIndex {
                index,
                displayed: self.view.len(),
            })
    }

    fn replace_record(
        &mut self,
        op: &'static str,
        target: &Record,
        edited: Record,
    ) -> Result<Record, ServiceError> {
        let result = edited.clone();
        self.commit_with(op, |catalog| catalog.replace(target, edited))?;
        Ok(result)
    }

    fn commit_with<T>(
        &mut self,
        op: &'static str,
        mutation: impl FnOnce(&mut Catalog) -> Result<T, CatalogError>,
    ) -> Result<T, ServiceError> {
        let started_at = Instant::now();
        let value = match self.store.mutate(mutation) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=catalog_mutation module=service op={op} status=error error_code={} duration_ms={}",
                    catalog_error_code(&err),
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        self.refresh_view();
        self.persist(op)?;
        info!(
            "event=catalog_mutation module=service op={op} status=ok records={} history_len={} cursor={} duration_ms={}",
            self.store.current().len(),
            self.store.history_len(),
            self.store.cursor(),
            started_at.elapsed().as_millis()
        );
        Ok(value)
    }

    fn move_cursor(
        &mut self,
        op: &'static str,
        step: fn(&mut VersionedStore) -> Result<&Catalog, HistoryError>,
    ) -> Result<(), ServiceError> {
        if let Err(err) = step(&mut self.store) {
            warn!("event=history_move module=service op={op} status=error error={err}");
            return Err(err.into());
        }

        self.refresh_view();
        self.persist(op)?;
        info!(
            "event=history_move module=service op={op} status=ok cursor={} history_len={}",
            self.store.cursor(),
            self.store.history_len()
        );
        Ok(())
    }

    fn show(&mut self, predicate: RecordPredicate, op: &'static str) -> &[Record] {
        self.active_predicate = predicate;
        self.order = DisplayOrder::Insertion;
        self.refresh_view();
        info!(
            "event=catalog_query module=service op={op} status=ok displayed={}",
            self.view.len()
        );
        self.view.displayed()
    }

    fn refresh_view(&mut self) {
        self.view
            .apply(self.store.current(), &self.active_predicate);
        if self.order == DisplayOrder::StartTime {
            self.view.order_by_start_time();
        }
    }

    fn persist(&mut self, op: &'static str) -> Result<(), ServiceError> {
        if let Err(err) = self.repo.save_catalog(self.store.current()) {
            warn!("event=catalog_save module=service op={op} status=error error={err}");
            return Err(err.into());
        }
        Ok(())
    }
}

fn catalog_error_code(err: &CatalogError) -> &'static str {
    match err {
        CatalogError::DuplicateRecord(_) => "duplicate_record",
        CatalogError::RecordNotFound(_) => "record_not_found",
    }
}
