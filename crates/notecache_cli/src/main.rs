//! Command-line front end for the note cache.
//!
//! # Responsibility
//! - Translate user commands into `NoteService` calls.
//! - Print results as plain text or JSON; no business rules live here.

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use log::error;
use notecache_core::{
    init_logging_from_config, CoreConfig, Note, NoteService, NoteServiceError, NoteStats,
    NoteStore, Priority, SqliteNoteStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Browse and edit locally cached notes.", long_about = None)]
struct Cli {
    /// SQLite file to use (`:memory:` for a throwaway store).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a note.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "low", value_parser = parse_priority)]
        priority: Priority,
        #[arg(long)]
        json: bool,
    },
    /// Change fields of an existing note; omitted fields keep their value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        json: bool,
    },
    /// Show one note.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Delete a note.
    Rm { id: String },
    /// List notes, newest first.
    List {
        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,
        #[arg(long)]
        json: bool,
    },
    /// Counts by priority and notes created in the last 7 days.
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    value.parse::<Priority>().map_err(|err| err.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli);
    init_logging_from_config(&config).context("failed to initialize logging")?;

    let service = NoteService::new(SqliteNoteStore::new(config.store_location()));
    let result = dispatch(&service, cli.command).await;
    if let Err(err) = &result {
        error!("event=cli_command module=cli status=error error={err}");
    }
    result
}

fn resolve_config(cli: &Cli) -> CoreConfig {
    let mut config = CoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config
}

async fn dispatch(service: &NoteService<SqliteNoteStore>, command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            content,
            priority,
            json,
        } => {
            let note = service
                .create(&title, &content, priority)
                .await
                .map_err(describe)?;
            print_note(&note, json)?;
        }
        Commands::Edit {
            id,
            title,
            content,
            priority,
            json,
        } => {
            let edits = NoteEdits {
                title,
                content,
                priority,
            };
            let note = apply_edit(service, &id, edits).await.map_err(describe)?;
            print_note(&note, json)?;
        }
        Commands::Show { id, json } => {
            let note = service
                .get(&id)
                .await
                .map_err(describe)?
                .ok_or_else(|| describe(NoteServiceError::NotFound(id.clone())))?;
            print_note(&note, json)?;
        }
        Commands::Rm { id } => {
            service.remove(&id).await.map_err(describe)?;
            println!("deleted {id}");
        }
        Commands::List { priority, json } => {
            let notes = match priority {
                Some(priority) => service.list_by_priority(priority).await,
                None => service.list().await,
            }
            .map_err(describe)?;
            print_list(&notes, json)?;
        }
        Commands::Stats { json } => {
            let stats = service.stats().await.map_err(describe)?;
            print_stats(&stats, json)?;
        }
    }
    Ok(())
}

/// Fields given on the command line for `edit`.
#[derive(Debug, Default)]
struct NoteEdits {
    title: Option<String>,
    content: Option<String>,
    priority: Option<Priority>,
}

async fn apply_edit<S: NoteStore>(
    service: &NoteService<S>,
    id: &str,
    edits: NoteEdits,
) -> Result<Note, NoteServiceError> {
    let existing = service
        .get(id)
        .await?
        .ok_or_else(|| NoteServiceError::NotFound(id.to_string()))?;
    let title = edits.title.unwrap_or(existing.title);
    let content = edits.content.unwrap_or(existing.content);
    let priority = edits.priority.unwrap_or(existing.priority);
    service.update(id, &title, &content, priority).await
}

fn describe(err: NoteServiceError) -> anyhow::Error {
    let message = match &err {
        NoteServiceError::Validation(_) => format!("invalid input: {err}"),
        NoteServiceError::NotFound(id) => format!("no note with id `{id}`"),
        NoteServiceError::Storage(_) => format!("could not access note storage: {err}"),
    };
    anyhow::Error::new(err).context(message)
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    println!("{}  [{}]  {}", note.id, note.priority, format_date(note.timestamp));
    println!("{}", note.title);
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

fn print_list(notes: &[Note], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes yet. Create one with `notecache add --title <TITLE>`.");
        return Ok(());
    }
    for note in notes {
        println!(
            "{}  {:<6}  {}  {}",
            format_date(note.timestamp),
            note.priority.as_str(),
            note.id,
            note.title
        );
    }
    Ok(())
}

fn print_stats(stats: &NoteStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("total        {}", stats.total);
    for priority in Priority::ALL {
        println!("{:<12} {}", priority.as_str(), stats.count_for(priority));
    }
    println!("last 7 days  {}", stats.recent_week);
    Ok(())
}

fn format_date(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
