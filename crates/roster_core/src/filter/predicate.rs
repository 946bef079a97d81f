//! Keyword predicates over candidate records.
//!
//! # Responsibility
//! - Evaluate tag and free-text keyword tests against one record.
//! - Compose predicates by conjunction.
//!
//! # Invariants
//! - Matching is case-insensitive.
//! - Tag keywords match a whole tag; text keywords match whole tokens.
//! - Blank keywords never match.
//! - An empty conjunction matches every record.

use crate::model::fields::Tag;
use crate::model::record::Record;
use std::collections::{BTreeSet, HashSet};

/// Boolean test over a record.
///
/// Keyword variants match when any of their keywords matches. Use `All` (or
/// `compose`) to require several conditions at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordPredicate {
    /// Show-all predicate.
    #[default]
    MatchAll,
    /// Keyword equals one of the record's tags.
    TagsContain(Vec<String>),
    /// Keyword tokens all appear in the team name.
    TeamContains(Vec<String>),
    /// Keyword tokens all appear in the job position.
    JobPositionContains(Vec<String>),
    /// Keyword tokens all appear in the candidate name.
    NameContains(Vec<String>),
    /// Every inner predicate must match.
    All(Vec<RecordPredicate>),
}

impl RecordPredicate {
    pub fn tags_contain<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TagsContain(collect_keywords(keywords))
    }

    pub fn team_contains<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::TeamContains(collect_keywords(keywords))
    }

    pub fn job_position_contains<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::JobPositionContains(collect_keywords(keywords))
    }

    pub fn name_contains<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::NameContains(collect_keywords(keywords))
    }

    /// Evaluates this predicate against `record`.
    pub fn test(&self, record: &Record) -> bool {
        match self {
            Self::MatchAll => true,
            Self::TagsContain(keywords) => keywords
                .iter()
                .any(|keyword| tags_match(record.tags(), keyword)),
            Self::TeamContains(keywords) => keywords
                .iter()
                .any(|keyword| text_matches(record.team().as_str(), keyword)),
            Self::JobPositionContains(keywords) => keywords
                .iter()
                .any(|keyword| text_matches(record.job_position().as_str(), keyword)),
            Self::NameContains(keywords) => keywords
                .iter()
                .any(|keyword| text_matches(record.name().as_str(), keyword)),
            Self::All(predicates) => predicates.iter().all(|predicate| predicate.test(record)),
        }
    }
}

/// Combines predicates with logical AND.
pub fn compose(predicates: Vec<RecordPredicate>) -> RecordPredicate {
    RecordPredicate::All(predicates)
}

fn collect_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keywords.into_iter().map(Into::into).collect()
}

fn tags_match(tags: &BTreeSet<Tag>, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    tags.iter().any(|tag| tag.as_str().to_lowercase() == keyword)
}

fn text_matches(text: &str, keyword: &str) -> bool {
    let field_tokens: HashSet<String> = tokens(text).collect();
    let mut keyword_tokens = tokens(keyword).peekable();
    if keyword_tokens.peek().is_none() {
        return false;
    }
    keyword_tokens.all(|token| field_tokens.contains(&token))
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}
