pub mod cli;
pub mod cohort;
pub mod config;
pub mod data;
pub mod error;
pub mod ingest;
pub mod io_utils;
pub mod percentile;
pub mod position;
pub mod profile;
pub mod report;
pub mod roster;
pub mod session;
pub mod table;
pub mod templates;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info, warn};

use crate::{
    cli::{Cli, Commands, InputArgs, OutputFormat},
    config::Config,
    error::ProfileError,
    position::RoleToken,
    session::{Selection, Session},
    table::{Align, print_table},
    templates::{MetricTemplate, template_for},
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("player_profiles", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Players(args) => handle_players(&args),
        Commands::Roles(args) => handle_roles(&args),
        Commands::Cohort(args) => handle_cohort(&args),
        Commands::Templates(args) => handle_templates(&args),
        Commands::Pizza(args) => handle_pizza(&args),
        Commands::Radar(args) => handle_radar(&args),
    }
}

/// Builds a session from the shared input flags. Without `--input` the
/// session stays empty and every query reports missing input.
fn open_session(args: &InputArgs) -> Result<Session> {
    let config = Config::load_or_default(args.config.as_deref())?;
    debug!(
        "Position strategies: pizza={}, radar={}",
        config.pizza_positions, config.radar_positions
    );
    let mut session = Session::new(config);
    if let Some(path) = &args.input {
        let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
        let delimiter = io_utils::resolve_input_delimiter(path, args.delimiter);
        let table = ingest::load_table(path, delimiter, encoding)
            .with_context(|| format!("Loading statistics from {path:?}"))?;
        session
            .load(&table)
            .with_context(|| format!("Normalizing statistics from {path:?}"))?;
    }
    Ok(session)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_players(args: &cli::PlayersArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let names = session.player_names()?;
    info!("{} distinct player(s)", names.len());
    match args.format {
        OutputFormat::Json => print_json(&names)?,
        OutputFormat::Table => names.iter().for_each(|name| println!("{name}")),
    }
    Ok(())
}

fn handle_roles(args: &cli::RolesArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let roles = session.allowed_roles(&args.player)?;
    if !session.roster()?.contains_player(&args.player) {
        warn!("Player '{}' not found in the loaded table", args.player);
    } else if roles.is_empty() {
        warn!("No roles recorded for '{}'", args.player);
    }
    match args.format {
        OutputFormat::Json => print_json(&roles)?,
        OutputFormat::Table => roles.as_slice().iter().for_each(|role| println!("{role}")),
    }
    Ok(())
}

fn handle_cohort(args: &cli::CohortArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let min_minutes = args.min_minutes.unwrap_or(session.config().min_minutes);
    let cohort = session.cohort(&args.role, min_minutes)?;
    info!(
        "{} cohort at {}+ minutes holds {} player(s)",
        cohort.query.role,
        min_minutes,
        cohort.len()
    );
    let entries = report::cohort_entries(&cohort);
    match args.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => print!("{}", report::render_cohort(&entries)),
    }
    Ok(())
}

fn handle_templates(args: &cli::TemplatesArgs) -> Result<()> {
    let selected: Vec<&MetricTemplate> = match args.role.as_deref() {
        Some(raw) => {
            let template = raw
                .trim()
                .parse::<RoleToken>()
                .ok()
                .and_then(template_for)
                .ok_or_else(|| ProfileError::UnsupportedRole(raw.trim().to_string()))?;
            vec![template]
        }
        None => templates::supported_roles().filter_map(template_for).collect(),
    };
    match args.format {
        OutputFormat::Json => print_json(&selected)?,
        OutputFormat::Table => {
            let headers = ["Role", "Band", "Column", "Label"]
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>();
            let rows = selected
                .iter()
                .flat_map(|template| {
                    template.metrics().map(move |(band, column, label)| {
                        vec![
                            template.role.to_string(),
                            band.to_string(),
                            column.to_string(),
                            label.to_string(),
                        ]
                    })
                })
                .collect::<Vec<_>>();
            print_table(&headers, &rows, &[Align::Left; 4]);
        }
    }
    Ok(())
}

fn selection_from(args: &cli::ProfileArgs, config: &Config) -> Selection {
    let mut selection = Selection {
        league: args.league.clone(),
        season: args.season.clone(),
        min_minutes: args.min_minutes.unwrap_or(config.min_minutes),
        ..Selection::default()
    };
    if let Some(player) = &args.player {
        selection.choose_player(player.as_str());
    }
    if let Some(role) = &args.role {
        selection.choose_role(role.as_str());
    }
    selection
}

fn report_halt(err: ProfileError) -> ProfileError {
    if err.halted_before_compute() {
        debug!("Query halted before any computation: {err}");
    }
    err
}

fn handle_pizza(args: &cli::ProfileArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let selection = selection_from(args, session.config());
    let payload = session.pizza(&selection).map_err(report_halt)?;
    match args.format {
        OutputFormat::Json => println!("{}", payload.to_json()?),
        OutputFormat::Table => print!("{}", payload.render()),
    }
    Ok(())
}

fn handle_radar(args: &cli::ProfileArgs) -> Result<()> {
    let session = open_session(&args.input)?;
    let selection = selection_from(args, session.config());
    let payload = session.radar(&selection).map_err(report_halt)?;
    match args.format {
        OutputFormat::Json => println!("{}", payload.to_json()?),
        OutputFormat::Table => print!("{}", payload.render()),
    }
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
