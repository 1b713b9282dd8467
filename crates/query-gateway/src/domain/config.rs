//! Gateway configuration with validation.
//!
//! Every section defaults sensibly, so an empty TOML document is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use shared_types::MAX_WIRE_SIZE;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Forum parameter rules
    pub forum: ForumConfig,
    /// Chain information
    pub chain: ChainConfig,
}

impl GatewayConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GatewayConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.limits.max_transaction_size == 0
            || self.limits.max_transaction_size > MAX_WIRE_SIZE
        {
            return Err(ConfigError::InvalidLimit(format!(
                "max_transaction_size must be within 1..={}",
                MAX_WIRE_SIZE
            )));
        }

        if self.timeouts.request.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if self.forum.min_username_len == 0
            || self.forum.min_username_len > self.forum.max_username_len
        {
            return Err(ConfigError::Invalid(format!(
                "username bounds {}..={} are empty",
                self.forum.min_username_len, self.forum.max_username_len
            )));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 20334)
    pub port: u16,
    /// Enable HTTP server
    pub enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 20334,
            enabled: true,
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
    /// Max decoded size of a submitted transaction in bytes
    pub max_transaction_size: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024,
            max_transaction_size: 256 * 1024,
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound on one HTTP request, ledger read included
    #[serde(with = "humantime_serde")]
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(10),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec!["Content-Type".to_string()],
            max_age: 86400,
        }
    }
}

/// Forum parameter rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// Shortest accepted username, in characters
    pub min_username_len: usize,
    /// Longest accepted username, in characters
    pub max_username_len: usize,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            min_username_len: 3,
            max_username_len: 32,
        }
    }
}

/// Chain information reported by the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network name
    pub network_name: String,
    /// Node version string
    pub node_version: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network_name: "forum-ledger".to_string(),
            node_version: format!("query-gateway/v{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config: {0}")]
    Io(String),
    /// Config document is not valid TOML for this schema
    #[error("cannot parse config: {0}")]
    Parse(String),
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" must be checked before the bare 's' and 'm' suffixes
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            let mins = mins.trim().parse::<u64>().map_err(|_| "invalid minutes")?;
            mins.checked_mul(60)
                .map(Duration::from_secs)
                .ok_or("minutes out of range")
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
