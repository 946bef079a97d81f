//! Candidate record model.
//!
//! # Responsibility
//! - Define the canonical, immutable candidate record.
//! - Provide identity vs. full equality for duplicate and change detection.
//! - Build edited copies from a `RecordPatch` without touching the source.
//!
//! # Invariants
//! - `email` is the identity key; two records with the same email are the
//!   same candidate even when other fields differ.
//! - Scheduling fields are `None` when unset, never an empty placeholder.

use crate::model::fields::{
    Address, Email, InterviewDuration, JobPosition, Name, Notes, Phone, StartTime, Tag, Team,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Required fields for building a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    pub job_position: JobPosition,
    pub team: Team,
    pub tags: BTreeSet<Tag>,
}

/// One candidate entry in the catalog.
///
/// Fields are private; the only way to change a record is to build a new one
/// (`with_notes`, `with_schedule`, `RecordPatch::apply_to`). Derived
/// `PartialEq` is full equality over every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    job_position: JobPosition,
    team: Team,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default)]
    notes: Notes,
    #[serde(default)]
    start_time: Option<StartTime>,
    #[serde(default)]
    duration: Option<InterviewDuration>,
}

impl Record {
    /// Creates a record with empty notes and no interview scheduled.
    pub fn new(draft: RecordDraft) -> Self {
        Self {
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            job_position: draft.job_position,
            team: draft.team,
            tags: draft.tags,
            notes: Notes::default(),
            start_time: None,
            duration: None,
        }
    }

    /// Returns a copy with notes replaced.
    pub fn with_notes(&self, notes: Notes) -> Self {
        Self {
            notes,
            ..self.clone()
        }
    }

    /// Returns a copy with the interview slot replaced.
    ///
    /// Passing `None` clears the corresponding field.
    pub fn with_schedule(
        &self,
        start_time: Option<StartTime>,
        duration: Option<InterviewDuration>,
    ) -> Self {
        Self {
            start_time,
            duration,
            ..self.clone()
        }
    }

    /// Identity equality: both records describe the same candidate.
    pub fn is_same_record(&self, other: &Record) -> bool {
        self.email == other.email
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    /// Identity key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn job_position(&self) -> &JobPosition {
        &self.job_position
    }

    pub fn team(&self) -> &Team {
        &self.team
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn start_time(&self) -> Option<StartTime> {
        self.start_time
    }

    pub fn duration(&self) -> Option<InterviewDuration> {
        self.duration
    }
}

/// Partial replacement for the editable fields of a record.
///
/// Notes and the interview slot are edited through dedicated operations and
/// are carried over unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub job_position: Option<JobPosition>,
    pub team: Option<Team>,
    /// Replaces the whole tag set when present. `Some(empty)` clears tags.
    pub tags: Option<BTreeSet<Tag>>,
}

impl RecordPatch {
    /// Returns `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.job_position.is_none()
            && self.team.is_none()
            && self.tags.is_none()
    }

    /// Builds the edited record. `source` is left untouched.
    pub fn apply_to(&self, source: &Record) -> Record {
        Record {
            name: self.name.clone().unwrap_or_else(|| source.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| source.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| source.email.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| source.address.clone()),
            job_position: self
                .job_position
                .clone()
                .unwrap_or_else(|| source.job_position.clone()),
            team: self.team.clone().unwrap_or_else(|| source.team.clone()),
            tags: self.tags.clone().unwrap_or_else(|| source.tags.clone()),
            notes: source.notes.clone(),
            start_time: source.start_time,
            duration: source.duration,
        }
    }
}
