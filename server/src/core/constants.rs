// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "CentreView";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "centreview";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".centreview";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "centreview.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "CENTREVIEW_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "CENTREVIEW_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "CENTREVIEW_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "CENTREVIEW_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "CENTREVIEW_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default request body limit (the API only accepts empty bodies)
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Seconds to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Dataset
// =============================================================================

/// Environment variable for the dataset file path
pub const ENV_DATA_FILE: &str = "CENTREVIEW_DATA";

/// Default dataset file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/centre_users.json";

// =============================================================================
// Pagination
// =============================================================================

/// Environment variable for the default page size
pub const ENV_PAGE_SIZE: &str = "CENTREVIEW_PAGE_SIZE";

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the grid
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 3] = [5, 10, 25];

/// Maximum items per page accepted by the API
pub const MAX_PAGE_LIMIT: u32 = 500;
