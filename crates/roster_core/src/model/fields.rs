//! Validated field types for candidate records.
//!
//! # Responsibility
//! - Reject malformed field values before a `Record` can be built.
//! - Keep validation on deserialization paths via serde `try_from`.
//!
//! # Invariants
//! - A constructed field value always satisfies its format rule.
//! - `StartTime` ordering is chronological.

use chrono::{NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N}\s\-'./]*$").expect("valid name regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9](?:[A-Za-z0-9+_.\-]*[A-Za-z0-9])?@(?:[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid tag regex"));
static START_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").expect("valid start time regex")
});

const MIN_DURATION_MINUTES: u16 = 5;
const MAX_DURATION_MINUTES: u16 = 480;
const SLOT_MINUTES: u8 = 5;
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Validation failure for a single record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Name(String),
    Phone(String),
    Email(String),
    /// Required free-text field is blank or starts with whitespace.
    Blank(&'static str),
    Tag(String),
    StartTime(String),
    Duration(String),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(value) => write!(
                f,
                "invalid name `{value}`: must start with a letter or digit and contain only letters, digits, spaces, - ' . /"
            ),
            Self::Phone(value) => write!(
                f,
                "invalid phone `{value}`: must contain only digits and be at least 3 digits long"
            ),
            Self::Email(value) => write!(f, "invalid email `{value}`: expected local-part@domain"),
            Self::Blank(field) => write!(f, "{field} must not be blank"),
            Self::Tag(value) => write!(f, "invalid tag `{value}`: must be alphanumeric"),
            Self::StartTime(value) => write!(
                f,
                "invalid start time `{value}`: expected `yyyy-MM-dd HH:mm` with minutes in multiples of 5"
            ),
            Self::Duration(value) => write!(
                f,
                "invalid duration `{value}`: expected {MIN_DURATION_MINUTES}-{MAX_DURATION_MINUTES} minutes in multiples of 5"
            ),
        }
    }
}

impl Error for FieldError {}

macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident, $validate:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps a raw value.
            pub fn parse(value: impl Into<String>) -> Result<Self, FieldError> {
                let value = value.into();
                let validate: fn(&str) -> Result<(), FieldError> = $validate;
                validate(value.as_str())?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_field!(
    /// Candidate display name.
    Name,
    |value| {
        if NAME_RE.is_match(value) {
            Ok(())
        } else {
            Err(FieldError::Name(value.to_string()))
        }
    }
);

text_field!(
    /// Digits-only phone number.
    Phone,
    |value| {
        if PHONE_RE.is_match(value) {
            Ok(())
        } else {
            Err(FieldError::Phone(value.to_string()))
        }
    }
);

text_field!(
    /// Contact email. This is the record identity key.
    Email,
    |value| {
        if EMAIL_RE.is_match(value) {
            Ok(())
        } else {
            Err(FieldError::Email(value.to_string()))
        }
    }
);

text_field!(Address, |value| require_text("address", value));

text_field!(
    /// Position the candidate applied for.
    JobPosition,
    |value| require_text("job position", value)
);

text_field!(
    /// Hiring team, the single-valued classification dimension.
    Team,
    |value| require_text("team", value)
);

text_field!(
    /// Alphanumeric label. Case is preserved; matching is case-insensitive.
    Tag,
    |value| {
        if TAG_RE.is_match(value) {
            Ok(())
        } else {
            Err(FieldError::Tag(value.to_string()))
        }
    }
);

text_field!(
    /// Free-form interviewer notes. May be empty.
    Notes,
    |_| Ok(())
);

impl Default for Notes {
    fn default() -> Self {
        Self(String::new())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), FieldError> {
    match value.chars().next() {
        Some(first) if !first.is_whitespace() => Ok(()),
        _ => Err(FieldError::Blank(field)),
    }
}

/// Interview start time in local wall-clock minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartTime(NaiveDateTime);

impl StartTime {
    /// Parses `yyyy-MM-dd HH:mm`.
    ///
    /// # Errors
    /// - Returns `FieldError::StartTime` for malformed text, impossible
    ///   calendar dates, hours past 23, or minutes not on a 5-minute slot.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let invalid = || FieldError::StartTime(value.to_string());
        // chrono accepts unpadded fields; the stored form is always padded.
        if !START_TIME_RE.is_match(value) {
            return Err(invalid());
        }
        let parsed =
            NaiveDateTime::parse_from_str(value, START_TIME_FORMAT).map_err(|_| invalid())?;
        if parsed.minute() % u32::from(SLOT_MINUTES) != 0 {
            return Err(invalid());
        }
        Ok(Self(parsed))
    }
}

impl TryFrom<String> for StartTime {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<StartTime> for String {
    fn from(value: StartTime) -> Self {
        value.to_string()
    }
}

impl Display for StartTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(START_TIME_FORMAT))
    }
}

/// Interview length in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct InterviewDuration(u16);

impl InterviewDuration {
    /// Wraps a minute count.
    ///
    /// # Errors
    /// - Returns `FieldError::Duration` outside 5..=480 or off a 5-minute slot.
    pub fn from_minutes(minutes: u16) -> Result<Self, FieldError> {
        let in_range = (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes);
        if !in_range || minutes % u16::from(SLOT_MINUTES) != 0 {
            return Err(FieldError::Duration(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    /// Parses a decimal minute count such as `45`.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        let minutes = value
            .parse::<u16>()
            .map_err(|_| FieldError::Duration(value.to_string()))?;
        Self::from_minutes(minutes)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for InterviewDuration {
    type Error = FieldError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_minutes(value)
    }
}

impl From<InterviewDuration> for u16 {
    fn from(value: InterviewDuration) -> Self {
        value.0
    }
}

impl Display for InterviewDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} min", self.0)
    }
}
