use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning: `config/default`, `config/{RUN_ENV}`,
/// environment variables prefixed with `APP` (nested keys separated by
/// `__`, e.g. `APP_SERVER__PORT`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "APP".to_string());

    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_env)).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables,
/// exactly once per process.
pub fn ensure_dotenv_loaded() {
    INIT_DOTENV.get_or_init(|| {
        let _ = dotenv::dotenv();
    });
}
