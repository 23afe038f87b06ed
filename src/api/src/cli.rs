//! CLI commands for catalog-api.
//!
//! Supports API server mode plus local listing, lookup and query inspection.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::Path;

use crate::config::AppConfig;
use crate::query::CompiledQuery;
use crate::storage::{events, races, Database, EventRepository, RaceRepository};
use crate::types::{Event, ListEventsRequestFilter, ListRacesRequestFilter, Race};

#[derive(Parser)]
#[command(name = "catalog-api")]
#[command(version, about = "Racing and sports catalog API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Entity {
    Races,
    Events,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List races from the racing database
    ListRaces {
        /// Only races in these meetings
        #[arg(short, long, value_delimiter = ',')]
        meeting_ids: Vec<i64>,

        /// Only visible races
        #[arg(long)]
        visible_only: bool,

        /// Order-by expression, e.g. "meeting_id desc, id"
        #[arg(short, long)]
        order_by: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List events from the sports database
    ListEvents {
        /// Only visible events
        #[arg(long)]
        visible_only: bool,

        /// Order-by expression, e.g. "name, id desc"
        #[arg(short, long)]
        order_by: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show a single event
    GetEvent {
        #[arg(value_name = "ID")]
        id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the SQL and arguments a listing filter compiles to
    Compile {
        #[arg(value_enum)]
        entity: Entity,

        /// Meeting ids (races only)
        #[arg(short, long, value_delimiter = ',')]
        meeting_ids: Vec<i64>,

        /// Only visible rows
        #[arg(long)]
        visible_only: bool,

        /// Order-by expression
        #[arg(short, long)]
        order_by: Option<String>,
    },
}

/// Open and initialise the racing repository.
pub fn open_races(config: &AppConfig) -> anyhow::Result<RaceRepository> {
    let db = Database::open(Path::new(&config.storage.racing_db))
        .context("Failed to open racing database")?;
    let repo = RaceRepository::new(db);
    repo.init(config.storage.seed_rows)
        .context("Failed to initialise racing database")?;
    Ok(repo)
}

/// Open and initialise the sports repository.
pub fn open_events(config: &AppConfig) -> anyhow::Result<EventRepository> {
    let db = Database::open(Path::new(&config.storage.sports_db))
        .context("Failed to open sports database")?;
    let repo = EventRepository::new(db);
    repo.init(config.storage.seed_rows)
        .context("Failed to initialise sports database")?;
    Ok(repo)
}

/// Run the list-races command.
pub fn run_list_races(
    meeting_ids: Vec<i64>,
    visible_only: bool,
    order_by: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let repo = open_races(&config)?;

    let filter = ListRacesRequestFilter {
        meeting_ids,
        visible_races_only: visible_only,
        order_by: order_by.unwrap_or_default(),
    };
    let races = repo.list(Some(&filter))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&races)?),
        OutputFormat::Table => print_races_table(&races),
    }
    Ok(())
}

/// Run the list-events command.
pub fn run_list_events(
    visible_only: bool,
    order_by: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let repo = open_events(&config)?;

    let filter = ListEventsRequestFilter {
        visible_events_only: visible_only,
        order_by: order_by.unwrap_or_default(),
    };
    let events = repo.list(Some(&filter))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&events)?),
        OutputFormat::Table => print_events_table(&events),
    }
    Ok(())
}

/// Run the get-event command.
pub fn run_get_event(id: i64, format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let repo = open_events(&config)?;
    let event = repo.get(id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&event)?),
        OutputFormat::Table => print_events_table(std::slice::from_ref(&event)),
    }
    Ok(())
}

/// Run the compile command. Does not touch storage.
pub fn run_compile(
    entity: Entity,
    meeting_ids: Vec<i64>,
    visible_only: bool,
    order_by: Option<String>,
) -> anyhow::Result<()> {
    let query = compile(entity, meeting_ids, visible_only, order_by)?;

    println!("{}", query.sql);
    let args: Vec<String> = query.args.iter().map(|a| a.to_string()).collect();
    println!("args: [{}]", args.join(", "));
    Ok(())
}

fn compile(
    entity: Entity,
    meeting_ids: Vec<i64>,
    visible_only: bool,
    order_by: Option<String>,
) -> anyhow::Result<CompiledQuery> {
    let order_by = order_by.unwrap_or_default();

    let query = match entity {
        Entity::Races => races::compile_list_query(Some(&ListRacesRequestFilter {
            meeting_ids,
            visible_races_only: visible_only,
            order_by,
        }))?,
        Entity::Events => {
            if !meeting_ids.is_empty() {
                anyhow::bail!("events cannot be filtered by meeting id");
            }
            events::compile_list_query(Some(&ListEventsRequestFilter {
                visible_events_only: visible_only,
                order_by,
            }))?
        }
    };
    Ok(query)
}

fn print_races_table(races: &[Race]) {
    println!(
        "{:>5} {:>8} {:<28} {:>3} {:>7} {:<26} {:<6}",
        "ID", "MEETING", "NAME", "NO", "VISIBLE", "START", "STATUS"
    );
    println!("{}", "-".repeat(89));
    for race in races {
        println!(
            "{:>5} {:>8} {:<28} {:>3} {:>7} {:<26} {:<6}",
            race.id,
            race.meeting_id,
            race.name,
            race.number,
            race.visible,
            race.advertised_start_time.to_rfc3339(),
            race.status.as_str()
        );
    }
    println!("\n{} races", races.len());
}

fn print_events_table(events: &[Event]) {
    println!(
        "{:>5} {:<28} {:>7} {:<26} {:<6}",
        "ID", "NAME", "VISIBLE", "START", "STATUS"
    );
    println!("{}", "-".repeat(76));
    for event in events {
        println!(
            "{:>5} {:<28} {:>7} {:<26} {:<6}",
            event.id,
            event.name,
            event.visible,
            event.advertised_start_time.to_rfc3339(),
            event.status.as_str()
        );
    }
    println!("\n{} events", events.len());
}
