use std::str::FromStr;
use std::time::Duration;

/// Default backend origin used when `JOBWATCH_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Path prefix the job id is appended to.
pub const DEFAULT_CHECK_PREFIX: &str = "/check/";

/// Default delay between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// HTTP client configuration for the job-status backend.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Path prefix concatenated in front of the job id (default `/check/`).
    pub check_prefix: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            check_prefix: DEFAULT_CHECK_PREFIX.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Convenience constructor for a given origin with every other field
    /// left at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `JOBWATCH_BASE_URL`     | `http://localhost:8080` |
    /// | `JOBWATCH_CHECK_PREFIX` | `/check/`               |
    /// | `REQUEST_TIMEOUT_SECS`  | unset (no timeout)      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("JOBWATCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let check_prefix =
            std::env::var("JOBWATCH_CHECK_PREFIX").unwrap_or_else(|_| DEFAULT_CHECK_PREFIX.into());

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            check_prefix,
            request_timeout,
        })
    }
}

/// Poll loop configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Delay between the start of two consecutive checks.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var            | Default |
    /// |--------------------|---------|
    /// | `POLL_INTERVAL_MS` | `1000`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let interval = match std::env::var("POLL_INTERVAL_MS") {
            Ok(raw) => parse_interval_ms(&raw)?,
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        Ok(Self { interval })
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: raw.to_string(),
    })
}

/// `0` disables the timeout.
fn parse_timeout_secs(raw: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", raw)?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn parse_interval_ms(raw: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = parse_var("POLL_INTERVAL_MS", raw)?;
    if ms == 0 {
        return Err(ConfigError::Invalid {
            var: "POLL_INTERVAL_MS",
            value: raw.to_string(),
        });
    }
    Ok(Duration::from_millis(ms))
}
