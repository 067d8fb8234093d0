//! Directory adapter binary.
//!
//! # Responsibility
//! - Translate command-line requests into directory service calls.
//! - Print found records as JSON; report absence as "not found".
//!
//! # Exit codes
//! - `0` success, `1` failure, `2` record not found.

mod commands;

use anyhow::{anyhow, Context, Result};
use commands::{CommandLine, Commands, FacultyCommand, StudentCommand};
use hogwarts_core::db::open_db;
use hogwarts_core::{
    default_log_level, init_logging, Faculty, FacultyDetail, FacultyService,
    SqliteFacultyRepository, SqliteStudentRepository, Student, StudentService,
};
use std::process::ExitCode;

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    NotFound,
}

fn main() -> ExitCode {
    let command_line = CommandLine::parse_args();
    ExitCode::from(exit_status(run(command_line)))
}

/// Maps a command result to the process exit status, reporting on stderr.
fn exit_status(result: Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Done) => EXIT_OK,
        Ok(Outcome::NotFound) => {
            eprintln!("not found");
            EXIT_NOT_FOUND
        }
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    }
}

fn run(command_line: CommandLine) -> Result<Outcome> {
    if let Some(log_dir) = command_line.log_dir.as_deref() {
        let level = command_line
            .log_level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    match command_line.command {
        Commands::Ping => {
            println!("hogwarts_core ping={}", hogwarts_core::ping());
            println!("hogwarts_core version={}", hogwarts_core::core_version());
            Ok(Outcome::Done)
        }
        Commands::Faculty(command) => {
            let conn = open_db(&command_line.db)
                .with_context(|| format!("failed to open `{}`", command_line.db.display()))?;
            let service = FacultyService::new(SqliteFacultyRepository::try_new(&conn)?);
            run_faculty(&service, command)
        }
        Commands::Student(command) => {
            let conn = open_db(&command_line.db)
                .with_context(|| format!("failed to open `{}`", command_line.db.display()))?;
            let service = StudentService::new(SqliteStudentRepository::try_new(&conn)?);
            run_student(&service, command)
        }
    }
}

fn run_faculty(
    service: &FacultyService<SqliteFacultyRepository<'_>>,
    command: FacultyCommand,
) -> Result<Outcome> {
    match command {
        FacultyCommand::Create(fields) => {
            let created = service.create_faculty(&Faculty::new(fields.name, fields.color))?;
            print_found(Some(service.detail_of(created)?))
        }
        FacultyCommand::Get { id } => print_found(service.get_faculty_detail(id)?),
        FacultyCommand::List => {
            print_found(Some(service.details_of(service.get_all_faculties()?)?))
        }
        FacultyCommand::Update { id, fields } => {
            let payload = Faculty::new(fields.name, fields.color).with_id(id);
            let updated = service.update_faculty(&payload)?;
            print_found(updated.map(|faculty| service.detail_of(faculty)).transpose()?)
        }
        FacultyCommand::Delete { id } => {
            // Deletion is restricted to faculties without students.
            let deleted = service.delete_faculty(id)?;
            print_found(deleted.map(|faculty| FacultyDetail::new(faculty, Vec::new())))
        }
        FacultyCommand::ByColor { color } => {
            let found = service.get_faculties_by_color(&color)?;
            print_found(Some(service.details_of(found)?))
        }
        FacultyCommand::Search { query } => {
            let found = service.search_by_name_or_color(&query)?;
            print_found(Some(service.details_of(found)?))
        }
        FacultyCommand::Students { id } => print_found(service.get_faculty_students(id)?),
    }
}

fn run_student(
    service: &StudentService<SqliteStudentRepository<'_>>,
    command: StudentCommand,
) -> Result<Outcome> {
    match command {
        StudentCommand::Create(fields) => {
            print_found(Some(service.create_student(&student_payload(fields))?))
        }
        StudentCommand::Get { id } => print_found(service.get_student(id)?),
        StudentCommand::List => print_found(Some(service.get_all_students()?)),
        StudentCommand::Update { id, fields } => {
            print_found(service.update_student(&student_payload(fields).with_id(id))?)
        }
        StudentCommand::Delete { id } => print_found(service.delete_student(id)?),
        StudentCommand::ByAge { age } => print_found(Some(service.get_students_by_age(age)?)),
        StudentCommand::AgeBetween { min, max } => {
            print_found(Some(service.get_students_by_age_between(min, max)?))
        }
        StudentCommand::ByFaculty { faculty_id } => {
            print_found(Some(service.get_students_by_faculty(faculty_id)?))
        }
    }
}

fn student_payload(fields: commands::StudentFields) -> Student {
    Student {
        id: None,
        name: fields.name,
        age: fields.age,
        faculty_id: fields.faculty,
    }
}

fn print_found<T: serde::Serialize>(value: Option<T>) -> Result<Outcome> {
    let Some(value) = value else {
        return Ok(Outcome::NotFound);
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(Outcome::Done)
}
