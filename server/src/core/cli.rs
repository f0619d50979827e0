use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_DATA_FILE, ENV_DEBUG, ENV_HOST, ENV_PAGE_SIZE, ENV_PORT};
use crate::domain::records::{CategoricalField, FilterChange, FilterState};

#[derive(Parser)]
#[command(name = "centreview")]
#[command(version, about = "Centre user training completion viewer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (verbose request logging)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Path to the centre user dataset (JSON)
    #[arg(long, short = 'd', global = true, env = ENV_DATA_FILE)]
    pub data: Option<PathBuf>,

    /// Default rows per page
    #[arg(long, global = true, env = ENV_PAGE_SIZE)]
    pub page_size: Option<u32>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Load the dataset, filter it and print one page as JSON
    Query(QueryArgs),
    /// Load the dataset and print the filter options as JSON
    Options,
}

/// Filter flags for the `query` command
///
/// Omitting a selector means "All". Passing an empty value (`--status ""`)
/// selects records whose field is empty.
#[derive(Args, Clone, Debug, Default)]
pub struct QueryArgs {
    /// Case-insensitive text matched against every field
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Exact centre number
    #[arg(long)]
    pub centre: Option<String>,

    /// Exact customer journey point
    #[arg(long)]
    pub journey_point: Option<String>,

    /// Exact training type
    #[arg(long)]
    pub training_type: Option<String>,

    /// Exact status ("" for Not Started)
    #[arg(long)]
    pub status: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,
}

impl QueryArgs {
    pub fn filter_state(&self) -> FilterState {
        FilterState::new()
            .with(FilterChange::Search(self.search.clone()))
            .with(FilterChange::Select(
                CategoricalField::CentreNumber,
                self.centre.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::CustomerJourneyPoint,
                self.journey_point.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::TrainingType,
                self.training_type.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::Status,
                self.status.clone(),
            ))
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub page_size: Option<u32>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        data: cli.data,
        page_size: cli.page_size,
    };
    (config, cli.command)
}
