use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via APP_DATABASE__URL
}

// --- Passes Config ---
// The PassKit deployment serves exactly one pass type; both values are
// deployment configuration and never vary per request.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PassesConfig {
    /// The single pass type identifier this deployment answers for.
    pub pass_type_identifier: String,
    /// Directory holding the `.pkpass` files.
    pub directory: String,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    pub passes: PassesConfig,
}
