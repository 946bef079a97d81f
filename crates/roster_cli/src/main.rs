//! Interactive shell over the candidate catalog.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the catalog database.
//! - Read one command per stdin line and print the outcome.
//!
//! # Invariants
//! - A rejected command leaves the session running.

mod config;
mod parser;

use config::CliConfig;
use log::{error, info};
use parser::{parse_command, Command};
use roster_core::db::open_db;
use roster_core::{CatalogService, Record, RecordRepository, ServiceError, SqliteRecordRepository};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = roster_core::init_logging(&config.log_level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        roster_core::core_version()
    );

    let mut conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "error: cannot open catalog `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let repo = SqliteRecordRepository::new(&mut conn);
    let mut service = match CatalogService::open(repo) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("error: cannot load catalog: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run_shell(&mut service, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_io module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_shell<R: RecordRepository>(
    service: &mut CatalogService<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "{}", render_list(service.displayed()))?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        if command == Command::Exit {
            writeln!(output, "Bye.")?;
            break;
        }

        match execute(service, command) {
            Ok(message) => writeln!(output, "{message}")?,
            Err(err) => writeln!(output, "error: {err}")?,
        }
    }
    Ok(())
}

fn execute<R: RecordRepository>(
    service: &mut CatalogService<R>,
    command: Command,
) -> Result<String, ServiceError> {
    let message = match command {
        Command::Add(record) => {
            let added = service.add_record(record)?;
            format!("Added candidate: {}", render_record(&added))
        }
        Command::Edit { index, patch } => {
            let edited = service.edit_record(index, &patch)?;
            format!("Edited candidate: {}", render_record(&edited))
        }
        Command::Delete { index } => {
            let deleted = service.delete_record(index)?;
            format!("Deleted candidate: {}", render_record(&deleted))
        }
        Command::Schedule {
            index,
            start_time,
            duration,
        } => {
            let scheduled = service.schedule_interview(index, start_time, duration)?;
            if scheduled.start_time().is_some() {
                format!("Scheduled interview: {}", render_record(&scheduled))
            } else {
                format!("Cleared interview: {}", render_record(&scheduled))
            }
        }
        Command::Note { index, notes } => {
            let noted = service.set_notes(index, notes)?;
            format!("Updated notes: {}", render_record(&noted))
        }
        Command::List => render_list(service.list_all()),
        Command::Find { keywords } => render_list(service.find_by_name(keywords)),
        Command::Classify(criteria) => render_list(service.classify(&criteria)?),
        Command::Sort => render_list(service.sort_by_start_time()),
        Command::Undo => {
            service.undo()?;
            format!("Undo success.\n{}", render_list(service.displayed()))
        }
        Command::Redo => {
            service.redo()?;
            format!("Redo success.\n{}", render_list(service.displayed()))
        }
        Command::Clear => {
            service.clear()?;
            "Catalog cleared.".to_string()
        }
        Command::Exit => String::new(),
    };
    Ok(message)
}

fn render_list(records: &[Record]) -> String {
    if records.is_empty() {
        return "0 candidates listed.".to_string();
    }
    let mut lines = vec![format!("{} candidate(s) listed:", records.len())];
    lines.extend(
        records
            .iter()
            .enumerate()
            .map(|(idx, record)| format!("{:>3}. {}", idx + 1, render_record(record))),
    );
    lines.join("\n")
}

fn render_record(record: &Record) -> String {
    let mut text = format!(
        "{}; Phone: {}; Email: {}; Address: {}; Job: {}; Team: {}",
        record.name(),
        record.phone(),
        record.email(),
        record.address(),
        record.job_position(),
        record.team()
    );
    if !record.tags().is_empty() {
        let tags: Vec<&str> = record.tags().iter().map(|tag| tag.as_str()).collect();
        text.push_str(&format!("; Tags: [{}]", tags.join(", ")));
    }
    if let (Some(start_time), Some(duration)) = (record.start_time(), record.duration()) {
        text.push_str(&format!("; Interview: {start_time} ({duration})"));
    }
    if !record.notes().as_str().is_empty() {
        text.push_str(&format!("; Notes: {}", record.notes()));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::run_shell;
    use roster_core::db::open_db_in_memory;
    use roster_core::{CatalogService, SqliteRecordRepository};

    fn run(script: &str) -> String {
        let mut conn = open_db_in_memory().unwrap();
        let repo = SqliteRecordRepository::new(&mut conn);
        let mut service = CatalogService::open(repo).unwrap();
        let mut output = Vec::new();
        run_shell(&mut service, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_undo_redo_session() {
        let output = run(
            "add n/Amy Bee p/85355255 e/amy@example.com a/123, Jurong West Ave 6 j/Designer tm/Design t/friends\n\
             undo\n\
             redo\n\
             exit\n\
             list\n",
        );
        assert!(output.contains("Added candidate: Amy Bee"));
        assert!(output.contains("Undo success.\n0 candidates listed."));
        assert!(output.contains("Redo success.\n1 candidate(s) listed:"));
        assert!(output.ends_with("Bye.\n"));
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let output = run("undo\ndelete 1\nfrobnicate\nclassify\nlist\n");
        assert!(output.contains("error: no command to undo"));
        assert!(output.contains("error: invalid candidate index 1"));
        assert!(output.contains("error: unknown command `frobnicate`"));
        assert!(output.contains("error: at least one tag, team or job position"));
        assert!(output.trim_end().ends_with("0 candidates listed."));
    }
}
