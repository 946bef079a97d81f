//! Duplicate-free, insertion-ordered record collection.
//!
//! # Responsibility
//! - Hold the records of one catalog state.
//! - Enforce identity uniqueness on every insert and replace.
//!
//! # Invariants
//! - No two records share an email.
//! - Failed mutations leave the collection untouched.
//! - `list()` order is insertion order; `replace` keeps the slot.

use crate::model::fields::Email;
use crate::model::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog mutation failure. Carries the offending identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Another record already uses this email.
    DuplicateRecord(Email),
    /// No record with this email exists.
    RecordNotFound(Email),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateRecord(email) => {
                write!(f, "a candidate with email {email} already exists")
            }
            Self::RecordNotFound(email) => write!(f, "candidate not found: {email}"),
        }
    }
}

impl Error for CatalogError {}

/// Ordered candidate collection keyed by email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from records in the given order.
    ///
    /// # Errors
    /// - `DuplicateRecord` for the first repeated email.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.add(record)?;
        }
        Ok(catalog)
    }

    /// Appends a record.
    pub fn add(&mut self, record: Record) -> Result<(), CatalogError> {
        if self.position_of(record.email()).is_some() {
            return Err(CatalogError::DuplicateRecord(record.email().clone()));
        }
        self.records.push(record);
        Ok(())
    }

    /// Removes the record identity-equal to `record` and returns it.
    pub fn remove(&mut self, record: &Record) -> Result<Record, CatalogError> {
        let position = self
            .position_of(record.email())
            .ok_or_else(|| CatalogError::RecordNotFound(record.email().clone()))?;
        Ok(self.records.remove(position))
    }

    /// Swaps `old` for `new` in the same slot.
    ///
    /// `new` may keep `old`'s email or take a fresh one, but must not collide
    /// with any other record.
    pub fn replace(&mut self, old: &Record, new: Record) -> Result<(), CatalogError> {
        let position = self
            .position_of(old.email())
            .ok_or_else(|| CatalogError::RecordNotFound(old.email().clone()))?;
        if !old.is_same_record(&new) && self.position_of(new.email()).is_some() {
            return Err(CatalogError::DuplicateRecord(new.email().clone()));
        }
        self.records[position] = new;
        Ok(())
    }

    /// Identity membership test.
    pub fn contains(&self, record: &Record) -> bool {
        self.position_of(record.email()).is_some()
    }

    pub fn find(&self, email: &Email) -> Option<&Record> {
        self.records.iter().find(|record| record.email() == email)
    }

    /// Read-only view in insertion order.
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position_of(&self, email: &Email) -> Option<usize> {
        self.records.iter().position(|record| record.email() == email)
    }
}
