//! Catalog repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the current catalog as ordered `records` rows plus tags.
//! - Rebuild a validated `Catalog` from storage.
//!
//! # Invariants
//! - `save_catalog` replaces every stored row in a single transaction.
//! - `position` mirrors catalog insertion order.
//! - Stored values that fail field validation load as `InvalidData`.

use crate::db::DbError;
use crate::model::catalog::Catalog;
use crate::model::fields::{
    Address, Email, FieldError, InterviewDuration, JobPosition, Name, Notes, Phone, StartTime,
    Tag, Team,
};
use crate::model::record::{Record, RecordDraft};
use rusqlite::{params, Connection, Row};
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    email,
    name,
    phone,
    address,
    job_position,
    team,
    notes,
    start_time,
    duration_minutes
FROM records
ORDER BY position ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for catalog load/save.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Stored rows do not form a valid catalog.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-catalog persistence.
pub trait RecordRepository {
    /// Reads the stored catalog; an empty store yields an empty catalog.
    fn load_catalog(&self) -> RepoResult<Catalog>;
    /// Overwrites the stored catalog with `catalog`.
    fn save_catalog(&mut self, catalog: &Catalog) -> RepoResult<()>;
}

/// SQLite-backed catalog repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a connection returned by `db::open_db*`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn load_catalog(&self) -> RepoResult<Catalog> {
        let mut tags_by_email = load_tags(&*self.conn)?;

        let mut stmt = self.conn.prepare(RECORD_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let email: String = row.get("email")?;
            let tags = tags_by_email.remove(&email).unwrap_or_default();
            records.push(parse_record_row(row, tags)?);
        }

        Catalog::from_records(records).map_err(|err| RepoError::InvalidData(err.to_string()))
    }

    fn save_catalog(&mut self, catalog: &Catalog) -> RepoResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM record_tags;", [])?;
        tx.execute("DELETE FROM records;", [])?;

        {
            let mut insert_record = tx.prepare(
                "INSERT INTO records (
                    email,
                    position,
                    name,
                    phone,
                    address,
                    job_position,
                    team,
                    notes,
                    start_time,
                    duration_minutes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            )?;
            let mut insert_tag =
                tx.prepare("INSERT INTO record_tags (email, tag) VALUES (?1, ?2);")?;

            for (position, record) in catalog.list().iter().enumerate() {
                let position = i64::try_from(position)
                    .map_err(|_| RepoError::InvalidData("catalog too large".to_string()))?;
                insert_record.execute(params![
                    record.email().as_str(),
                    position,
                    record.name().as_str(),
                    record.phone().as_str(),
                    record.address().as_str(),
                    record.job_position().as_str(),
                    record.team().as_str(),
                    record.notes().as_str(),
                    record.start_time().map(|start| start.to_string()),
                    record.duration().map(InterviewDuration::minutes),
                ])?;
                for tag in record.tags() {
                    insert_tag.execute(params![record.email().as_str(), tag.as_str()])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn load_tags(conn: &Connection) -> RepoResult<HashMap<String, BTreeSet<Tag>>> {
    let mut stmt = conn.prepare("SELECT email, tag FROM record_tags ORDER BY email, tag;")?;
    let mut rows = stmt.query([])?;
    let mut tags_by_email: HashMap<String, BTreeSet<Tag>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let email: String = row.get(0)?;
        let tag: String = row.get(1)?;
        let tag = Tag::parse(tag).map_err(|err| invalid_field("record_tags.tag", &err))?;
        tags_by_email.entry(email).or_default().insert(tag);
    }
    Ok(tags_by_email)
}

fn parse_record_row(row: &Row<'_>, tags: BTreeSet<Tag>) -> RepoResult<Record> {
    let draft = RecordDraft {
        name: Name::parse(row.get::<_, String>("name")?)
            .map_err(|err| invalid_field("records.name", &err))?,
        phone: Phone::parse(row.get::<_, String>("phone")?)
            .map_err(|err| invalid_field("records.phone", &err))?,
        email: Email::parse(row.get::<_, String>("email")?)
            .map_err(|err| invalid_field("records.email", &err))?,
        address: Address::parse(row.get::<_, String>("address")?)
            .map_err(|err| invalid_field("records.address", &err))?,
        job_position: JobPosition::parse(row.get::<_, String>("job_position")?)
            .map_err(|err| invalid_field("records.job_position", &err))?,
        team: Team::parse(row.get::<_, String>("team")?)
            .map_err(|err| invalid_field("records.team", &err))?,
        tags,
    };

    let notes = Notes::parse(row.get::<_, String>("notes")?)
        .map_err(|err| invalid_field("records.notes", &err))?;
    let start_time = row
        .get::<_, Option<String>>("start_time")?
        .map(|value| StartTime::parse(value.as_str()))
        .transpose()
        .map_err(|err| invalid_field("records.start_time", &err))?;
    let duration = row
        .get::<_, Option<i64>>("duration_minutes")?
        .map(|minutes| {
            u16::try_from(minutes)
                .map_err(|_| FieldError::Duration(minutes.to_string()))
                .and_then(InterviewDuration::from_minutes)
        })
        .transpose()
        .map_err(|err| invalid_field("records.duration_minutes", &err))?;

    Ok(Record::new(draft)
        .with_notes(notes)
        .with_schedule(start_time, duration))
}

fn invalid_field(column: &str, err: &FieldError) -> RepoError {
    RepoError::InvalidData(format!("{column}: {err}"))
}
