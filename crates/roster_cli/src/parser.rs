//! Command-line grammar for the interactive shell.
//!
//! # Responsibility
//! - Split one input line into a command word and prefixed arguments.
//! - Build validated core values (`Record`, `RecordPatch`, criteria).
//!
//! # Invariants
//! - Parsing never touches the catalog; a `ParseError` means nothing ran.
//! - A prefix only starts an argument at the beginning of a word.

use once_cell::sync::Lazy;
use regex::Regex;
use roster_core::{
    Address, ClassifyCriteria, Email, FieldError, InterviewDuration, JobPosition, Name, Notes,
    Phone, Record, RecordDraft, RecordPatch, StartTime, Tag, Team,
};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(n/|p/|e/|a/|j/|tm/|t/|s/|d/)").expect("valid prefix regex")
});

pub const ADD_USAGE: &str = "add n/NAME p/PHONE e/EMAIL a/ADDRESS j/JOB tm/TEAM [t/TAG]...";
pub const EDIT_USAGE: &str =
    "edit INDEX [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [j/JOB] [tm/TEAM] [t/TAG]...";
pub const DELETE_USAGE: &str = "delete INDEX";
pub const SCHEDULE_USAGE: &str = "schedule INDEX s/yyyy-MM-dd HH:mm d/MINUTES";
pub const NOTE_USAGE: &str = "note INDEX NOTES";
pub const FIND_USAGE: &str = "find KEYWORD [KEYWORD]...";
pub const CLASSIFY_USAGE: &str = "classify [t/TAG]... [tm/TEAM] [j/JOB]";

/// Argument prefix such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Name,
    Phone,
    Email,
    Address,
    JobPosition,
    Team,
    Tag,
    StartTime,
    Duration,
}

impl Prefix {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "n/" => Some(Self::Name),
            "p/" => Some(Self::Phone),
            "e/" => Some(Self::Email),
            "a/" => Some(Self::Address),
            "j/" => Some(Self::JobPosition),
            "tm/" => Some(Self::Team),
            "t/" => Some(Self::Tag),
            "s/" => Some(Self::StartTime),
            "d/" => Some(Self::Duration),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "n/",
            Self::Phone => "p/",
            Self::Email => "e/",
            Self::Address => "a/",
            Self::JobPosition => "j/",
            Self::Team => "tm/",
            Self::Tag => "t/",
            Self::StartTime => "s/",
            Self::Duration => "d/",
        }
    }
}

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Record),
    Edit { index: usize, patch: RecordPatch },
    Delete { index: usize },
    Schedule {
        index: usize,
        start_time: Option<StartTime>,
        duration: Option<InterviewDuration>,
    },
    Note { index: usize, notes: Notes },
    List,
    Find { keywords: Vec<String> },
    Classify(ClassifyCriteria),
    Sort,
    Undo,
    Redo,
    Clear,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyInput,
    UnknownCommand(String),
    /// Arguments do not fit the command shape.
    InvalidFormat { usage: &'static str },
    InvalidIndex(String),
    DuplicatePrefix(Prefix),
    Field(FieldError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no command entered"),
            Self::UnknownCommand(word) => write!(
                f,
                "unknown command `{word}`; expected add|edit|delete|schedule|note|list|find|classify|sort|undo|redo|clear|exit"
            ),
            Self::InvalidFormat { usage } => write!(f, "invalid command format; usage: {usage}"),
            Self::InvalidIndex(raw) => {
                write!(f, "invalid index `{raw}`: expected a positive integer")
            }
            Self::DuplicatePrefix(prefix) => {
                write!(f, "prefix {} may only be given once", prefix.as_str())
            }
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ParseError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Arguments split into the free text before the first prefix and the
/// prefixed values in input order.
#[derive(Debug, Default)]
struct PrefixArgs<'a> {
    preamble: &'a str,
    values: Vec<(Prefix, &'a str)>,
}

impl<'a> PrefixArgs<'a> {
    /// Splits `args` on the prefixes in `accepted` only; any other prefix
    /// text stays inside the surrounding value.
    fn tokenize(args: &'a str, accepted: &[Prefix]) -> Self {
        let mut markers = Vec::new();
        for caps in PREFIX_RE.captures_iter(args) {
            if let Some(token) = caps.get(1) {
                match Prefix::from_token(token.as_str()) {
                    Some(prefix) if accepted.contains(&prefix) => {
                        markers.push((prefix, token.start(), token.end()));
                    }
                    _ => {}
                }
            }
        }

        let preamble_end = markers.first().map_or(args.len(), |(_, start, _)| *start);
        let values = markers
            .iter()
            .enumerate()
            .map(|(idx, (prefix, _, value_start))| {
                let value_end = markers
                    .get(idx + 1)
                    .map_or(args.len(), |(_, next_start, _)| *next_start);
                (*prefix, args[*value_start..value_end].trim())
            })
            .collect();

        Self {
            preamble: args[..preamble_end].trim(),
            values,
        }
    }

    fn all(&self, prefix: Prefix) -> Vec<&'a str> {
        self.values
            .iter()
            .filter(|(candidate, _)| *candidate == prefix)
            .map(|(_, value)| *value)
            .collect()
    }

    fn single(&self, prefix: Prefix) -> Result<Option<&'a str>, ParseError> {
        match self.all(prefix).as_slice() {
            [] => Ok(None),
            [value] => Ok(Some(*value)),
            _ => Err(ParseError::DuplicatePrefix(prefix)),
        }
    }

    fn required(&self, prefix: Prefix, usage: &'static str) -> Result<&'a str, ParseError> {
        self.single(prefix)?
            .ok_or(ParseError::InvalidFormat { usage })
    }
}

const RECORD_PREFIXES: &[Prefix] = &[
    Prefix::Name,
    Prefix::Phone,
    Prefix::Email,
    Prefix::Address,
    Prefix::JobPosition,
    Prefix::Team,
    Prefix::Tag,
];

/// Parses one input line.
///
/// # Errors
/// - Returns `ParseError` for unknown commands, malformed arguments or
///   invalid field values.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, args) = match line.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args.trim()),
        None => (line, ""),
    };

    match word {
        "" => Err(ParseError::EmptyInput),
        "add" => parse_add(args),
        "edit" => parse_edit(args),
        "delete" => Ok(Command::Delete {
            index: parse_index(args, DELETE_USAGE)?,
        }),
        "schedule" => parse_schedule(args),
        "note" => parse_note(args),
        "find" => parse_find(args),
        "classify" => parse_classify(args),
        "list" => Ok(Command::List),
        "sort" => Ok(Command::Sort),
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "clear" => Ok(Command::Clear),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let parsed = PrefixArgs::tokenize(args, RECORD_PREFIXES);
    if !parsed.preamble.is_empty() {
        return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
    }

    let draft = RecordDraft {
        name: Name::parse(parsed.required(Prefix::Name, ADD_USAGE)?)?,
        phone: Phone::parse(parsed.required(Prefix::Phone, ADD_USAGE)?)?,
        email: Email::parse(parsed.required(Prefix::Email, ADD_USAGE)?)?,
        address: Address::parse(parsed.required(Prefix::Address, ADD_USAGE)?)?,
        job_position: JobPosition::parse(parsed.required(Prefix::JobPosition, ADD_USAGE)?)?,
        team: Team::parse(parsed.required(Prefix::Team, ADD_USAGE)?)?,
        tags: parse_tags(&parsed.all(Prefix::Tag))?,
    };
    Ok(Command::Add(Record::new(draft)))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let parsed = PrefixArgs::tokenize(args, RECORD_PREFIXES);
    let index = parse_index(parsed.preamble, EDIT_USAGE)?;

    let tag_values = parsed.all(Prefix::Tag);
    // A lone empty `t/` clears every tag.
    let tags = match tag_values.as_slice() {
        [] => None,
        [""] => Some(BTreeSet::new()),
        values => Some(parse_tags(values)?),
    };

    let patch = RecordPatch {
        name: parsed.single(Prefix::Name)?.map(Name::parse).transpose()?,
        phone: parsed.single(Prefix::Phone)?.map(Phone::parse).transpose()?,
        email: parsed.single(Prefix::Email)?.map(Email::parse).transpose()?,
        address: parsed
            .single(Prefix::Address)?
            .map(Address::parse)
            .transpose()?,
        job_position: parsed
            .single(Prefix::JobPosition)?
            .map(JobPosition::parse)
            .transpose()?,
        team: parsed.single(Prefix::Team)?.map(Team::parse).transpose()?,
        tags,
    };
    Ok(Command::Edit { index, patch })
}

fn parse_schedule(args: &str) -> Result<Command, ParseError> {
    let parsed = PrefixArgs::tokenize(args, &[Prefix::StartTime, Prefix::Duration]);
    let index = parse_index(parsed.preamble, SCHEDULE_USAGE)?;

    let start_time = parsed.single(Prefix::StartTime)?;
    let duration = parsed.single(Prefix::Duration)?;
    match (start_time, duration) {
        // No arguments clears the interview slot.
        (None, None) => Ok(Command::Schedule {
            index,
            start_time: None,
            duration: None,
        }),
        (Some(start_time), Some(duration)) => Ok(Command::Schedule {
            index,
            start_time: Some(StartTime::parse(start_time)?),
            duration: Some(InterviewDuration::parse(duration)?),
        }),
        _ => Err(ParseError::InvalidFormat {
            usage: SCHEDULE_USAGE,
        }),
    }
}

fn parse_note(args: &str) -> Result<Command, ParseError> {
    let (raw_index, notes) = match args.split_once(char::is_whitespace) {
        Some((raw_index, notes)) => (raw_index, notes.trim()),
        None => (args, ""),
    };
    Ok(Command::Note {
        index: parse_index(raw_index, NOTE_USAGE)?,
        notes: Notes::parse(notes)?,
    })
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage: FIND_USAGE });
    }
    Ok(Command::Find { keywords })
}

/// Builds raw criteria; duplicate and blank checks belong to the core.
fn parse_classify(args: &str) -> Result<Command, ParseError> {
    let parsed = PrefixArgs::tokenize(args, &[Prefix::Tag, Prefix::Team, Prefix::JobPosition]);
    if !parsed.preamble.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: CLASSIFY_USAGE,
        });
    }

    let owned = |prefix| {
        parsed
            .all(prefix)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    Ok(Command::Classify(ClassifyCriteria {
        tags: owned(Prefix::Tag),
        teams: owned(Prefix::Team),
        job_positions: owned(Prefix::JobPosition),
    }))
}

fn parse_index(raw: &str, usage: &'static str) -> Result<usize, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    match raw.parse::<usize>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(ParseError::InvalidIndex(raw.to_string())),
    }
}

fn parse_tags(values: &[&str]) -> Result<BTreeSet<Tag>, ParseError> {
    values
        .iter()
        .map(|value| Tag::parse(*value).map_err(ParseError::from))
        .collect()
}
