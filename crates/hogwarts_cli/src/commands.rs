//! Command-line surface of the directory adapter.

use clap::{Args, Parser, Subcommand};
use hogwarts_core::{FacultyId, StudentId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hogwarts")]
#[command(about = "Faculty and student directory backed by SQLite.")]
pub struct CommandLine {
    /// SQLite database file
    #[arg(long, env = "HOGWARTS_DB", default_value = "hogwarts.sqlite3")]
    pub db: PathBuf,
    /// trace|debug|info|warn|error
    #[arg(long, env = "HOGWARTS_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "HOGWARTS_LOG_DIR")]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the core ping/version check
    Ping,
    /// Faculty operations
    #[command(subcommand)]
    Faculty(FacultyCommand),
    /// Student operations
    #[command(subcommand)]
    Student(StudentCommand),
}

#[derive(Args)]
pub struct FacultyFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub color: String,
}

#[derive(Subcommand)]
pub enum FacultyCommand {
    /// Create a faculty
    Create(FacultyFields),
    /// Show a faculty with its students
    Get { id: FacultyId },
    /// List all faculties
    List,
    /// Replace a faculty's fields
    Update {
        id: FacultyId,
        #[command(flatten)]
        fields: FacultyFields,
    },
    /// Delete a faculty that has no students
    Delete { id: FacultyId },
    /// Faculties with this color, ignoring case
    ByColor { color: String },
    /// Faculties whose name or color equals the query, ignoring case
    Search { query: String },
    /// Students of one faculty
    Students { id: FacultyId },
}

#[derive(Args)]
pub struct StudentFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: i32,
    /// Faculty id; omit for an unaffiliated student
    #[arg(long)]
    pub faculty: Option<FacultyId>,
}

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Create a student
    Create(StudentFields),
    /// Show one student
    Get { id: StudentId },
    /// List all students
    List,
    /// Replace a student's fields
    Update {
        id: StudentId,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student
    Delete { id: StudentId },
    /// Students of exactly this age
    ByAge {
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },
    /// Students with MIN <= age <= MAX
    AgeBetween {
        #[arg(allow_negative_numbers = true)]
        min: i32,
        #[arg(allow_negative_numbers = true)]
        max: i32,
    },
    /// Students of one faculty
    ByFaculty { faculty_id: FacultyId },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandLine, Commands, StudentCommand};
    use clap::Parser;

    #[test]
    fn age_arguments_accept_negative_numbers() {
        let parsed =
            CommandLine::try_parse_from(["hogwarts", "student", "age-between", "-3", "5"])
                .unwrap();
        assert!(matches!(
            parsed.command,
            Commands::Student(StudentCommand::AgeBetween { min: -3, max: 5 })
        ));

        let parsed = CommandLine::try_parse_from(["hogwarts", "student", "by-age", "-1"]).unwrap();
        assert!(matches!(
            parsed.command,
            Commands::Student(StudentCommand::ByAge { age: -1 })
        ));
    }
}
