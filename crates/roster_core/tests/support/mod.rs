#![allow(dead_code)]

use roster_core::{
    Address, Catalog, Email, JobPosition, Name, Phone, Record, RecordDraft, Tag, Team,
};

pub fn candidate(name: &str, email: &str, job: &str, team: &str, tags: &[&str]) -> Record {
    Record::new(RecordDraft {
        name: Name::parse(name).unwrap(),
        phone: Phone::parse("94351253").unwrap(),
        email: Email::parse(email).unwrap(),
        address: Address::parse("123, Jurong West Ave 6, #08-111").unwrap(),
        job_position: JobPosition::parse(job).unwrap(),
        team: Team::parse(team).unwrap(),
        tags: tags.iter().map(|tag| Tag::parse(*tag).unwrap()).collect(),
    })
}

/// Seven candidates; only Benson carries both `friends` and `owesMoney`.
pub fn typical_records() -> Vec<Record> {
    vec![
        candidate("Alice Pauline", "alice@example.com", "Software Engineer", "Engineering", &["friends"]),
        candidate("Benson Meier", "johnd@example.com", "Product Manager", "Product", &["owesMoney", "friends"]),
        candidate("Carl Kurz", "heinz@example.com", "Data Analyst", "Analytics", &[]),
        candidate("Daniel Meier", "cornelia@example.com", "Software Engineer", "TikTok Live", &["friends"]),
        candidate("Elle Meyer", "werner@example.com", "Designer", "Design", &[]),
        candidate("Fiona Kunz", "lydia@example.com", "Frontend Developer", "TikTok Live", &["owesMoney"]),
        candidate("George Best", "anna@example.com", "Backend Developer", "Engineering", &[]),
    ]
}

pub fn typical_catalog() -> Catalog {
    Catalog::from_records(typical_records()).unwrap()
}

pub fn names(records: &[Record]) -> Vec<String> {
    records.iter().map(|record| record.name().to_string()).collect()
}
