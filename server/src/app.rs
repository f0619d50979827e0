//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::ApiServer;
use crate::api::routes::centre_users::types::FilterOptionsResponse;
use crate::api::types::{PaginatedResponse, validate_limit, validate_page};
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, QueryArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::JsonFileLoader;
use crate::domain::dataset::{DatasetService, DatasetSnapshot};
use crate::domain::records::{FilterOptions, RecordQuery};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub dataset: Arc<DatasetService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config)?;
        match command {
            Some(Commands::Query(args)) => app.run_query(&args).await,
            Some(Commands::Options) => app.print_options().await,
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let loader = JsonFileLoader::new(config.data.path.clone());
        let dataset = Arc::new(DatasetService::new(Arc::new(loader)));

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            dataset,
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Load the dataset once for a one-shot command
    ///
    /// Unlike the server, a one-shot command fails when the load fails.
    async fn load_once(&self) -> Result<DatasetSnapshot> {
        self.dataset.load().await;
        let snapshot = self.dataset.snapshot();
        if let Some(error) = &snapshot.last_error {
            anyhow::bail!("{}", error);
        }
        Ok(snapshot)
    }

    async fn run_query(&self, args: &QueryArgs) -> Result<()> {
        let limit = args
            .limit
            .unwrap_or(self.config.pagination.default_page_size);
        validate_page(args.page).map_err(|e| anyhow::anyhow!("Invalid --page: {}", e))?;
        validate_limit(limit).map_err(|e| anyhow::anyhow!("Invalid --limit: {}", e))?;

        let snapshot = self.load_once().await?;
        let query = RecordQuery {
            filter: args.filter_state(),
            page: args.page,
            limit,
        };
        let result = query.run(&snapshot.records);
        tracing::debug!(total = result.total, "Query complete");

        print_json(&PaginatedResponse::new(
            result.rows,
            query.page,
            query.limit,
            result.total,
        ))
    }

    async fn print_options(&self) -> Result<()> {
        let snapshot = self.load_once().await?;
        let options = FilterOptions::from_records(&snapshot.records);
        print_json(&FilterOptionsResponse::build(
            &options,
            &self.config.pagination,
        ))
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        // The server answers 503 for record queries until this completes
        let (seq, handle) = app.dataset.spawn_load();
        app.shutdown.register(handle).await;
        tracing::debug!(seq, source = %app.dataset.source(), "Initial dataset load started");

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            &app.dataset.source(),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
