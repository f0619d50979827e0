use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_DATA_FILE, DEFAULT_HOST, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_SIZE_OPTIONS, DEFAULT_PORT, MAX_PAGE_LIMIT,
};

// =============================================================================
// File Config Structs (all fields optional, merged across sources)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Dataset configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DataFileConfig {
    pub path: Option<String>,
}

/// Pagination configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PaginationFileConfig {
    pub default_page_size: Option<u32>,
    pub page_size_options: Option<Vec<u32>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub data: Option<DataFileConfig>,
    pub pagination: Option<PaginationFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(data) = other.data {
            let current = self.data.get_or_insert_with(DataFileConfig::default);
            if data.path.is_some() {
                tracing::trace!(path = ?data.path, "Merging data.path");
                current.path = data.path;
            }
        }

        if let Some(pagination) = other.pagination {
            let current = self
                .pagination
                .get_or_insert_with(PaginationFileConfig::default);
            if pagination.default_page_size.is_some() {
                tracing::trace!(
                    default_page_size = ?pagination.default_page_size,
                    "Merging pagination.default_page_size"
                );
                current.default_page_size = pagination.default_page_size;
            }
            if pagination.page_size_options.is_some() {
                tracing::trace!(
                    page_size_options = ?pagination.page_size_options,
                    "Merging pagination.page_size_options"
                );
                current.page_size_options = pagination.page_size_options;
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Dataset configuration
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub path: PathBuf,
}

/// Pagination configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub pagination: PaginationConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.centreview/centreview.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_from_sources(cli, get_profile_config_path())
    }

    fn load_from_sources(cli: &CliConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir - skip if not exists
        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Extract file config values with defaults
        let file_server = file_config.server.unwrap_or_default();
        let file_data = file_config.data.unwrap_or_default();
        let file_pagination = file_config.pagination.unwrap_or_default();

        // 4. Layer configs: defaults -> file config -> CLI/env overrides
        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let data_path = cli
            .data
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .or(file_data.path)
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let pagination = PaginationConfig {
            default_page_size: cli
                .page_size
                .or(file_pagination.default_page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            page_size_options: file_pagination
                .page_size_options
                .unwrap_or_else(|| DEFAULT_PAGE_SIZE_OPTIONS.to_vec()),
        };

        // debug: CLI flag enables, otherwise file config, default false
        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            data: DataConfig {
                path: expand_path(&data_path),
            },
            pagination,
            debug,
        };

        config.validate()?;
        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            data = %config.data.path.display(),
            page_size = config.pagination.default_page_size,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind a random port the banner cannot report
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        let options = &self.pagination.page_size_options;
        if options.is_empty() {
            anyhow::bail!("Configuration error: pagination.page_size_options must not be empty");
        }
        if let Some(bad) = options.iter().find(|&&s| s == 0 || s > MAX_PAGE_LIMIT) {
            anyhow::bail!(
                "Configuration error: page size {} must be between 1 and {}",
                bad,
                MAX_PAGE_LIMIT
            );
        }
        if !options.contains(&self.pagination.default_page_size) {
            anyhow::bail!(
                "Configuration error: pagination.default_page_size ({}) must be one of {:?}",
                self.pagination.default_page_size,
                options
            );
        }

        if self.data.path.is_dir() {
            anyhow::bail!(
                "Configuration error: data.path points to a directory: {}",
                self.data.path.display()
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.centreview/centreview.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
