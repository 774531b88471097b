//! Command-line front end over the countdown core.
//!
//! # Responsibility
//! - Drive the same create/list/save/delete use cases the mobile UI uses.
//! - Inspect or edit a store file from a terminal.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use countdown_core::{
    default_db_path, parse_date, Countdown, Event, EventId, EventService, EventStore,
    SqliteEventRepository, SystemClock,
};
use serde::Serialize;
use std::path::PathBuf;

type Service<'store> = EventService<SqliteEventRepository<'store>, SystemClock>;

#[derive(Parser, Debug)]
#[command(name = "countdown", version, about = "Track countdowns to upcoming events")]
struct Cli {
    /// Database file; defaults to the user's documents directory.
    #[arg(long, global = true, env = "COUNTDOWN_DB_PATH")]
    db: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// List events, upcoming first, then most recently passed.
    List,
    /// Create a placeholder event dated now and print its id.
    Create,
    /// Show one event.
    Show { id: EventId },
    /// Edit fields of an existing event.
    Edit {
        id: EventId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// RFC 3339 timestamp or local `YYYY-MM-DD`.
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete one event.
    Delete { id: EventId },
}

#[derive(Debug, Serialize)]
struct ListedEvent<'a> {
    #[serde(flatten)]
    countdown: &'a Countdown,
    display_date: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = match cli.db {
        Some(path) => path,
        None => default_db_path().context("could not determine a documents directory; pass --db")?,
    };
    let store = EventStore::new(path);
    store
        .open()
        .with_context(|| format!("failed to open store at {}", display_path(&store)))?;
    let service = EventService::new(SqliteEventRepository::new(&store));

    match cli.command {
        Commands::List => list(&service, cli.json),
        Commands::Create => {
            let id = service.create_event()?;
            if cli.json {
                println!("{}", serde_json::json!({ "id": id }));
            } else {
                println!("Event created with ID {id}");
            }
            Ok(())
        }
        Commands::Show { id } => {
            let event = find(&service, id)?;
            print_event(&service, &event, cli.json)
        }
        Commands::Edit {
            id,
            title,
            description,
            date,
        } => {
            let mut event = find(&service, id)?;
            if let Some(title) = title {
                event.title = title;
            }
            if let Some(description) = description {
                event.description = description;
            }
            if let Some(date) = date {
                event.date = parse_cli_date(&date)?;
            }
            if !service.save_event(&event)? {
                bail!("event {id} disappeared before it could be saved");
            }
            print_event(&service, &event, cli.json)
        }
        Commands::Delete { id } => {
            if !service.delete_by_id(id)? {
                bail!("event {id} not found");
            }
            println!("{}", deleted_output(id, cli.json));
            Ok(())
        }
    }
}

fn list(service: &Service<'_>, json: bool) -> Result<()> {
    let countdowns = service.list_countdowns()?;
    if json {
        let rows = countdowns
            .iter()
            .map(|countdown| ListedEvent {
                countdown,
                display_date: service.format_for_display(&countdown.event.date),
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if countdowns.is_empty() {
        println!("No events.");
    }
    for countdown in &countdowns {
        println!(
            "{:>5}  {:>6} days left  {}  {}",
            countdown.event.id,
            countdown.days_left,
            service.format_for_display(&countdown.event.date),
            countdown.event.title
        );
    }
    Ok(())
}

fn find(service: &Service<'_>, id: EventId) -> Result<Event> {
    service
        .get_event(id)?
        .ok_or_else(|| anyhow!("event {id} not found"))
}

fn print_event(service: &Service<'_>, event: &Event, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(event)?);
    } else {
        println!("#{} {}", event.id, event.title);
        println!("{}", service.format_for_display(&event.date));
        println!("{}", event.description);
    }
    Ok(())
}

fn parse_cli_date(input: &str) -> Result<DateTime<Utc>> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }
    let day = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("`{input}` is neither RFC 3339 nor YYYY-MM-DD"))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .context("midnight is always a valid time")?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("`{input}` has no local midnight"))
}

fn deleted_output(id: EventId, json: bool) -> String {
    if json {
        serde_json::json!({ "id": id, "deleted": true }).to_string()
    } else {
        format!("Event {id} deleted")
    }
}

fn display_path(store: &EventStore) -> String {
    store
        .path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string())
}
