//! Snapshot history with a movable cursor.
//!
//! # Responsibility
//! - Expose the snapshot at the cursor as the current catalog.
//! - Append snapshots on commit and move the cursor on undo/redo.
//!
//! # Invariants
//! - Every commit grows reachable history by exactly one snapshot, even when
//!   the committed catalog equals the current one.
//! - Undo/redo never drop snapshots; only commit truncates redo history.
//! - Snapshots are owned values; callers only ever see `&Catalog`.

use crate::model::catalog::Catalog;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Cursor movement failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// Cursor already at the oldest snapshot.
    NoUndoableState,
    /// Cursor already at the newest snapshot.
    NoRedoableState,
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoUndoableState => write!(f, "no command to undo"),
            Self::NoRedoableState => write!(f, "no command to redo"),
        }
    }
}

impl Error for HistoryError {}

/// Append-only snapshot sequence plus cursor.
#[derive(Debug, Clone)]
pub struct VersionedStore {
    snapshots: Vec<Catalog>,
    cursor: usize,
}

impl VersionedStore {
    /// Starts history with `initial` as the only snapshot.
    pub fn new(initial: Catalog) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &Catalog {
        &self.snapshots[self.cursor]
    }

    /// Makes `next` the current snapshot.
    ///
    /// Snapshots after the cursor become unreachable and are dropped.
    pub fn commit(&mut self, next: Catalog) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(next);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Runs `op` on a copy of the current snapshot and commits the copy when
    /// `op` succeeds.
    ///
    /// On error nothing is committed and the current snapshot is unchanged.
    pub fn mutate<T, E>(
        &mut self,
        op: impl FnOnce(&mut Catalog) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut next = self.current().clone();
        let value = op(&mut next)?;
        self.commit(next);
        Ok(value)
    }

    /// Steps back one snapshot and returns the new current catalog.
    pub fn undo(&mut self) -> Result<&Catalog, HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NoUndoableState);
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    /// Steps forward one snapshot and returns the new current catalog.
    pub fn redo(&mut self) -> Result<&Catalog, HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NoRedoableState);
        }
        self.cursor += 1;
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Zero-based position of the current snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots, including redo history.
    pub fn history_len(&self) -> usize {
        self.snapshots.len()
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new(Catalog::new())
    }
}
