//! Runtime configuration.
//!
//! Precedence is CLI flag > environment variable > default. [`Config::new`]
//! reads the environment; the binary then applies its flags with the
//! `with_*` builders and calls [`Config::validate`] before serving.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

use crate::todoist::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::toolsets::ALL_TOOLSETS;

pub const ENV_TOKEN: &str = "TODOIST_API_TOKEN";
pub const ENV_API_URL: &str = "TODOIST_API_URL";
pub const ENV_TIMEOUT: &str = "TODOIST_TIMEOUT_SECS";
pub const ENV_MODE: &str = "TODOIST_MCP_MODE";
pub const ENV_ADDR: &str = "TODOIST_MCP_ADDR";
pub const ENV_TOOLSETS: &str = "TODOIST_TOOLSETS";
pub const ENV_READ_ONLY: &str = "TODOIST_READ_ONLY";

pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Todoist API token is not set")]
    #[diagnostic(
        code(todoist_mcp::config::missing_token),
        help("Pass --token or set TODOIST_API_TOKEN.")
    )]
    MissingToken,

    #[error("Invalid server mode: {value}")]
    #[diagnostic(
        code(todoist_mcp::config::invalid_mode),
        help("Use 'http' or 'stdio'.")
    )]
    InvalidMode { value: String },

    #[error("Invalid timeout: {value}")]
    #[diagnostic(
        code(todoist_mcp::config::invalid_timeout),
        help("Give the timeout as a whole number of seconds greater than zero.")
    )]
    InvalidTimeout { value: String },

    #[error("Invalid listen address: {value}")]
    #[diagnostic(
        code(todoist_mcp::config::invalid_address),
        help("Use host:port, e.g. 127.0.0.1:8080.")
    )]
    InvalidAddress { value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Transport the server listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ServerMode {
    /// Streamable HTTP on the configured address
    #[default]
    Http,
    /// JSON-RPC over stdin/stdout
    Stdio,
}

impl FromStr for ServerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ServerMode::Http),
            "stdio" => Ok(ServerMode::Stdio),
            _ => Err(ConfigError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ServerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMode::Http => write!(f, "http"),
            ServerMode::Stdio => write!(f, "stdio"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Todoist API token; required before serving
    pub token: Option<String>,
    pub api_url: String,
    /// Per-request timeout for backend calls
    pub timeout: Duration,
    pub mode: ServerMode,
    /// HTTP listen address (ignored in stdio mode)
    pub addr: SocketAddr,
    /// Toolsets to enable; `all` enables every toolset
    pub toolsets: Vec<String>,
    pub read_only: bool,
    /// How long in-flight HTTP requests may drain after shutdown starts
    pub shutdown_grace: Duration,
    /// Explicit tracing filter, overriding RUST_LOG
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            mode: ServerMode::default(),
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            toolsets: vec![ALL_TOOLSETS.to_string()],
            read_only: false,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            log_filter: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with the environment.
    pub fn new() -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(token) = env_var(ENV_TOKEN) {
            config.token = Some(token);
        }
        if let Some(url) = env_var(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(secs) = env_var(ENV_TIMEOUT) {
            config.timeout = parse_timeout(&secs)?;
        }
        if let Some(mode) = env_var(ENV_MODE) {
            config.mode = mode.parse()?;
        }
        if let Some(addr) = env_var(ENV_ADDR) {
            config.addr = parse_addr(&addr)?;
        }
        if let Some(toolsets) = env_var(ENV_TOOLSETS) {
            config.toolsets = parse_toolsets(&toolsets);
        }
        if let Some(read_only) = env_var(ENV_READ_ONLY) {
            config.read_only = parse_bool(&read_only);
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_toolsets<I, S>(mut self, toolsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.toolsets = toolsets.into_iter().map(Into::into).collect();
        self
    }

    /// Only ever switches read-only on; a flag left unset keeps the
    /// environment's choice.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only |= read_only;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// The API token, or [`ConfigError::MissingToken`] when unset or blank.
    pub fn token(&self) -> ConfigResult<&str> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)
    }

    /// Check that the configuration can be served.
    pub fn validate(&self) -> ConfigResult<()> {
        self.token()?;
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn parse_timeout(value: &str) -> ConfigResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            value: value.to_string(),
        }),
    }
}

pub fn parse_addr(value: &str) -> ConfigResult<SocketAddr> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAddress {
            value: value.to_string(),
        })
}

/// Split a comma separated toolset list. An empty list means `all`.
pub fn parse_toolsets(value: &str) -> Vec<String> {
    let toolsets: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if toolsets.is_empty() {
        vec![ALL_TOOLSETS.to_string()]
    } else {
        toolsets
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
