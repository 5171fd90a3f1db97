use crate::export::BackupProfile;
use crate::holiday::HolidayTable;
use crate::persistence::{PersistenceResult, load_table_from_json};
use crate::table::SprintTable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "VOP_CALENDAR_CONFIG";
pub const HTTP_ADDR_ENV: &str = "VOP_CALENDAR_HTTP_ADDR";
pub const OUTPUT_DIR_ENV: &str = "VOP_CALENDAR_OUTPUT_DIR";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config io error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backup: BackupProfile,
    /// Seconds before the "backup saved" indicator returns to idle (2 or 3).
    #[serde(default = "default_export_reset_secs")]
    pub export_reset_secs: u64,
    /// Replaces the built-in 2026 holiday list when present.
    #[serde(default)]
    pub holidays: Option<Vec<NaiveDate>>,
    /// JSON sprint table to use instead of the built-in one.
    #[serde(default)]
    pub sprint_table: Option<PathBuf>,
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
    #[serde(default)]
    pub display_host: Option<String>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_export_reset_secs() -> u64 {
    3
}

fn default_http_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backup: BackupProfile::default(),
            export_reset_secs: default_export_reset_secs(),
            holidays: None,
            sprint_table: None,
            http_addr: default_http_addr(),
            display_host: None,
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: AppConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration: explicit path, then `VOP_CALENDAR_CONFIG`,
    /// then defaults. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_json_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var(HTTP_ADDR_ENV) {
            self.http_addr = addr;
        }
        if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=3).contains(&self.export_reset_secs) {
            return Err(ConfigError::Invalid(format!(
                "export_reset_secs must be 2 or 3 (got {})",
                self.export_reset_secs
            )));
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.http_addr
            .parse()
            .map_err(|err| ConfigError::Invalid(format!("invalid http_addr '{}': {err}", self.http_addr)))
    }

    pub fn export_reset_delay(&self) -> Duration {
        Duration::from_secs(self.export_reset_secs)
    }

    pub fn holiday_table(&self) -> HolidayTable {
        match &self.holidays {
            Some(dates) => HolidayTable::from_dates(dates.iter().copied()),
            None => HolidayTable::default(),
        }
    }

    pub fn load_sprint_table(&self) -> PersistenceResult<SprintTable> {
        match &self.sprint_table {
            Some(path) => load_table_from_json(path),
            None => SprintTable::h1_2026(),
        }
    }

    /// Host name shown on the page and stamped into backups when no
    /// request host is available.
    pub fn display_host(&self) -> String {
        self.display_host
            .clone()
            .or_else(|| std::env::var("HOSTNAME").ok())
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }
}
