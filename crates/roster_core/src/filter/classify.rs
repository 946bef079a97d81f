//! Classify criteria validation and predicate construction.
//!
//! # Responsibility
//! - Turn tag/team/job-position criteria into one conjunctive predicate.
//!
//! # Invariants
//! - At least one criterion value is required.
//! - Team and job position are single-valued.
//! - Each tag becomes its own predicate so tags combine with AND.

use crate::filter::predicate::{compose, RecordPredicate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Classification dimension accepted by classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Tag,
    Team,
    JobPosition,
}

impl Display for Criterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag => write!(f, "tag"),
            Self::Team => write!(f, "team"),
            Self::JobPosition => write!(f, "job position"),
        }
    }
}

/// Classify input rejected before any filtering happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// No criterion supplied at all.
    EmptyCriteria,
    /// More than one value for a single-valued criterion.
    MultipleExclusiveCriteria { criterion: Criterion, count: usize },
    /// A supplied value is empty after trimming.
    BlankKeyword { criterion: Criterion },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCriteria => write!(
                f,
                "at least one tag, team or job position criterion is required"
            ),
            Self::MultipleExclusiveCriteria { criterion, count } => write!(
                f,
                "only one {criterion} is allowed, got {count}"
            ),
            Self::BlankKeyword { criterion } => write!(f, "{criterion} value cannot be empty"),
        }
    }
}

impl Error for FilterError {}

/// Raw classify criteria as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyCriteria {
    pub tags: Vec<String>,
    pub teams: Vec<String>,
    pub job_positions: Vec<String>,
}

impl ClassifyCriteria {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.teams.is_empty() && self.job_positions.is_empty()
    }
}

/// Builds the conjunctive classify predicate.
///
/// Predicate order is tags (in input order), then team, then job position.
///
/// # Errors
/// - `EmptyCriteria` when every list is empty.
/// - `MultipleExclusiveCriteria` when job position or team has 2+ values
///   (job position is checked first).
/// - `BlankKeyword` when any value trims to empty.
pub fn classify_predicate(criteria: &ClassifyCriteria) -> Result<RecordPredicate, FilterError> {
    if criteria.is_empty() {
        return Err(FilterError::EmptyCriteria);
    }
    ensure_single(Criterion::JobPosition, &criteria.job_positions)?;
    ensure_single(Criterion::Team, &criteria.teams)?;

    let mut predicates = Vec::with_capacity(
        criteria.tags.len() + criteria.teams.len() + criteria.job_positions.len(),
    );
    for tag in &criteria.tags {
        let keyword = non_blank(Criterion::Tag, tag)?;
        predicates.push(RecordPredicate::tags_contain([keyword]));
    }
    for team in &criteria.teams {
        let keyword = non_blank(Criterion::Team, team)?;
        predicates.push(RecordPredicate::team_contains([keyword]));
    }
    for job_position in &criteria.job_positions {
        let keyword = non_blank(Criterion::JobPosition, job_position)?;
        predicates.push(RecordPredicate::job_position_contains([keyword]));
    }

    Ok(compose(predicates))
}

fn ensure_single(criterion: Criterion, values: &[String]) -> Result<(), FilterError> {
    if values.len() > 1 {
        return Err(FilterError::MultipleExclusiveCriteria {
            criterion,
            count: values.len(),
        });
    }
    Ok(())
}

fn non_blank(criterion: Criterion, value: &str) -> Result<&str, FilterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FilterError::BlankKeyword { criterion });
    }
    Ok(trimmed)
}
