use std::{fmt, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_DOCUMENT: &str = "problem6.pdf";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Startup settings, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub data_dir: PathBuf,
    pub document_path: String,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidUrl { value: String, reason: String },
    InvalidTimeout(String),
    NoDataDir(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidUrl { value, reason } => {
                write!(f, "PRIME_TUI_BASE_URL {value:?} is not usable: {reason}")
            }
            ConfigError::InvalidTimeout(value) => {
                write!(f, "PRIME_TUI_TIMEOUT_SECS {value:?} is not a number of seconds")
            }
            ConfigError::NoDataDir(err) => write!(f, "cannot determine a data directory: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoDataDir(err) => Some(err),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = get("PRIME_TUI_BASE_URL");
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = match get("PRIME_TUI_TIMEOUT_SECS") {
            Some(value) => Some(parse_timeout(&value)?),
            None => None,
        };
        let data_dir = match get("PRIME_TUI_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            base_url,
            timeout,
            data_dir,
            document_path: get("PRIME_TUI_DOCUMENT").unwrap_or_else(|| DEFAULT_DOCUMENT.into()),
            log_filter: get("PRIME_TUI_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into()),
        })
    }
}

fn parse_base_url(value: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(value).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(value.trim_end_matches('/').to_string())
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .map(Duration::from_secs_f64)
        .ok_or_else(|| ConfigError::InvalidTimeout(value.to_string()))
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let base = match dirs::data_local_dir() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(ConfigError::NoDataDir)?,
    };
    let mut root = base.join("prime-tui");
    if cfg!(debug_assertions) {
        root = root.join("dev");
    }
    Ok(root)
}
