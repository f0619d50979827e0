//! Core application infrastructure

pub(crate) mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod shutdown;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands, QueryArgs};
pub use config::{AppConfig, DataConfig, PaginationConfig, ServerConfig};
pub use shutdown::ShutdownService;
