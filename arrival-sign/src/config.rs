//! Process settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::board::DEFAULT_CAPACITY;
use crate::catalog::ConfigError;

/// Settings for one sign process.
#[derive(Debug, Clone)]
pub struct SignConfig {
    /// Train Tracker API key; empty when not configured
    pub api_key: String,

    /// Station to display, by name or map id
    pub station: String,

    /// Directory holding the reference data files
    pub resources_dir: PathBuf,

    /// Directory for unusable feed payloads
    pub log_dir: PathBuf,

    pub refresh_interval: Duration,

    /// Rows on the physical sign
    pub capacity: usize,

    pub listen_addr: SocketAddr,

    /// Serve recorded responses from this directory instead of the live API
    pub mock_dir: Option<PathBuf>,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            station: "State/Lake".to_string(),
            resources_dir: PathBuf::from("resources"),
            log_dir: PathBuf::from("logs"),
            refresh_interval: Duration::from_secs(5),
            capacity: DEFAULT_CAPACITY,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            mock_dir: None,
        }
    }
}

impl SignConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset
    /// or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = get("CTA_API_KEY") {
            config = config.with_api_key(key);
        }
        if let Some(station) = get("SIGN_STATION") {
            config = config.with_station(station);
        }
        if let Some(dir) = get("SIGN_RESOURCES") {
            config = config.with_resources_dir(dir);
        }
        if let Some(dir) = get("SIGN_LOG_DIR") {
            config = config.with_log_dir(dir);
        }
        if let Some(secs) = get("SIGN_REFRESH_SECS") {
            let secs: u64 = parse_setting("SIGN_REFRESH_SECS", &secs)?;
            if secs == 0 {
                return Err(invalid("SIGN_REFRESH_SECS", "0"));
            }
            config = config.with_refresh_interval(Duration::from_secs(secs));
        }
        if let Some(capacity) = get("SIGN_CAPACITY") {
            let rows: usize = parse_setting("SIGN_CAPACITY", &capacity)?;
            if rows == 0 {
                return Err(invalid("SIGN_CAPACITY", "0"));
            }
            config = config.with_capacity(rows);
        }
        if let Some(addr) = get("SIGN_ADDR") {
            config = config.with_listen_addr(parse_setting("SIGN_ADDR", &addr)?);
        }
        if let Some(dir) = get("CTA_MOCK_DIR") {
            config = config.with_mock_dir(dir);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.station = station.into();
        self
    }

    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = dir.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_capacity(mut self, rows: usize) -> Self {
        self.capacity = rows;
        self
    }

    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }
}

fn parse_setting<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(name, value))
}

fn invalid(name: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        name,
        value: value.to_string(),
    }
}
