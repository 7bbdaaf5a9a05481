//! Command-line entry point for the resource dictionary store.
//!
//! # Responsibility
//! - Resolve configuration from environment and flags.
//! - Map typed service failures to stable exit codes.
//! - Print records as JSON on stdout, errors on stderr.

use clap::{Parser, Subcommand};
use resdict_core::db::open_db;
use resdict_core::{
    flush_logs, init_logging, DictionaryConfig, DictionaryService, DictionaryServiceError,
    ResourceDictionary, SqliteDictionaryRepository,
};
use std::fmt::Display;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "resdict", version, about = "Manage resource dictionary records")]
struct Cli {
    /// SQLite database file (overrides RESDICT_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level (overrides RESDICT_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute log directory (overrides RESDICT_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one record by name.
    Get { name: String },
    /// Validate and upsert a record; definition is read from --file or stdin.
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        updated_by: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print records matching any of the given names.
    SearchNames {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print records whose tags contain the query (case-insensitive).
    SearchTags { query: String },
    /// Delete a record by name.
    Delete { name: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = run(cli);
    flush_logs();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {}", failure.message);
            ExitCode::from(failure.code)
        }
    }
}

struct Failure {
    code: u8,
    message: String,
}

impl Failure {
    fn setup(err: impl Display) -> Self {
        Self {
            code: EXIT_FAILURE,
            message: err.to_string(),
        }
    }
}

impl From<DictionaryServiceError> for Failure {
    fn from(err: DictionaryServiceError) -> Self {
        let code = match err {
            DictionaryServiceError::InvalidInput(_)
            | DictionaryServiceError::Decode(_)
            | DictionaryServiceError::DefinitionValidation(_)
            | DictionaryServiceError::RecordValidation(_) => EXIT_INVALID,
            DictionaryServiceError::NotFound(_) => EXIT_NOT_FOUND,
            DictionaryServiceError::Repo(_) => EXIT_FAILURE,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

fn resolve_config(cli: &Cli) -> DictionaryConfig {
    let mut config = DictionaryConfig::from_env();
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = Some(dir);
    }
    config
}

fn run(cli: Cli) -> Result<(), Failure> {
    let config = resolve_config(&cli);
    config.validate().map_err(Failure::setup)?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).map_err(Failure::setup)?;
    }

    let conn = open_db(&config.db_path).map_err(Failure::setup)?;
    let service = DictionaryService::new(SqliteDictionaryRepository::new(&conn));

    match cli.command {
        Command::Get { name } => print_json(&service.get_by_name(&name)?),
        Command::Save {
            name,
            updated_by,
            file,
        } => {
            let definition = read_definition(file)?;
            let saved = service.save(ResourceDictionary::new(name, definition, updated_by))?;
            print_json(&saved)
        }
        Command::SearchNames { names } => print_json(&service.search_by_names(&names)?),
        Command::SearchTags { query } => print_json(&service.search_by_tags(&query)?),
        Command::Delete { name } => {
            let deleted = service.delete(&name)?;
            log::debug!("event=cli_delete module=cli status=ok deleted={deleted}");
            println!("deleted {deleted} record(s)");
            Ok(())
        }
    }
}

fn read_definition(file: Option<PathBuf>) -> Result<String, Failure> {
    match file {
        Some(path) => std::fs::read_to_string(&path).map_err(|err| {
            Failure::setup(format!("failed to read `{}`: {err}", path.display()))
        }),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| Failure::setup(format!("failed to read stdin: {err}")))?;
            Ok(buffer)
        }
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Failure> {
    let text = serde_json::to_string_pretty(value).map_err(Failure::setup)?;
    println!("{text}");
    Ok(())
}
