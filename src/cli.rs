use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Percentile and radar profiles of players against a positional cohort",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the distinct player names in the statistics table
    Players(PlayersArgs),
    /// Show the roles a player has been listed at
    Roles(RolesArgs),
    /// Preview the players that qualify for a role at a minutes threshold
    Cohort(CohortArgs),
    /// Print the metric template for one role or for every supported role
    Templates(TemplatesArgs),
    /// Build a percentile (pizza) profile for a player
    Pizza(ProfileArgs),
    /// Build a raw-value radar profile for a player against cohort bounds
    Radar(ProfileArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Statistics export to load (CSV or TSV)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Optional YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct PlayersArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct RolesArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Player name exactly as it appears in the table
    #[arg(short, long)]
    pub player: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CohortArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Role to filter on (e.g. CB, LW, CF)
    #[arg(short, long)]
    pub role: String,
    /// Minimum minutes played (inclusive); defaults to the configured value
    #[arg(long = "min-minutes")]
    pub min_minutes: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Limit output to a single role
    #[arg(short, long)]
    pub role: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Player name exactly as it appears in the table
    #[arg(short, long)]
    pub player: Option<String>,
    /// Role to profile the player in
    #[arg(short, long)]
    pub role: Option<String>,
    /// League label shown with the profile; also selects the logo
    #[arg(long)]
    pub league: Option<String>,
    /// Season label shown with the profile
    #[arg(long)]
    pub season: Option<String>,
    /// Minimum minutes played (inclusive); defaults to the configured value
    #[arg(long = "min-minutes")]
    pub min_minutes: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
