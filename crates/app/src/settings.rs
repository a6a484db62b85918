//! Handles settings for the application.
//!
//! Settings are layered, later sources winning: built-in defaults, the TOML
//! file (`settings.toml` unless `--config` says otherwise, optional), then
//! `INVOICE_DASHBOARD__*` environment variables, then CLI flags.
use chrono_tz::Tz;
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    /// `tracing` level applied to every crate of the workspace.
    pub level: String,
    /// IANA timezone that decides which calendar day "today" is.
    pub timezone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
}

#[derive(Debug, Parser)]
#[command(name = "invoice_dashboard", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the SQLite database path (`memory` for an in-memory database).
    #[arg(long)]
    database: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.timezone", "UTC")?
            .set_default("server.port", 3000)?
            .set_default("database", "memory")?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("INVOICE_DASHBOARD").separator("__"))
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(database) = args.database {
            settings.database = match database.as_str() {
                "memory" => Database::Memory,
                _ => Database::Sqlite(database),
            };
        }

        Ok(settings)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.app
            .timezone
            .parse()
            .map_err(|_| ConfigError::Message(format!("unknown timezone {:?}", self.app.timezone)))
    }
}
