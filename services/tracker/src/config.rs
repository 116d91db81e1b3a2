use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_FEED_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Service configuration
///
/// Every field has a default; `from_env` overrides them from `ISS_*` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// OEM XML feed location
    pub feed_url: String,
    pub bind_addr: SocketAddr,
    /// Upper bound on a single feed download
    pub fetch_timeout: Duration,
    /// Base URL of a Nominatim-compatible reverse geocoder
    pub geocoder_url: String,
    /// Upper bound on a single reverse-geocode lookup
    pub geocode_timeout: Duration,
    /// Most labels the geocode cache keeps; 0 disables caching
    pub geocode_cache_capacity: usize,
    /// Sent on every outbound request; Nominatim rejects anonymous clients
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            fetch_timeout: Duration::from_secs(30),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocode_timeout: Duration::from_secs(5),
            geocode_cache_capacity: 10_000,
            user_agent: format!("iss-tracker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("ISS_FEED_URL") {
            config.feed_url = url;
        }
        if let Some(addr) = lookup("ISS_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    name: "ISS_BIND_ADDR",
                    value: addr.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        if let Some(secs) = lookup("ISS_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = parse_secs("ISS_FETCH_TIMEOUT_SECS", &secs)?;
        }
        if let Some(url) = lookup("ISS_GEOCODER_URL") {
            config.geocoder_url = url;
        }
        if let Some(secs) = lookup("ISS_GEOCODE_TIMEOUT_SECS") {
            config.geocode_timeout = parse_secs("ISS_GEOCODE_TIMEOUT_SECS", &secs)?;
        }
        if let Some(cap) = lookup("ISS_GEOCODE_CACHE_CAPACITY") {
            config.geocode_cache_capacity = cap.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "ISS_GEOCODE_CACHE_CAPACITY",
                value: cap.clone(),
                reason: "expected a non-negative integer".to_string(),
            })?;
        }
        if let Some(agent) = lookup("ISS_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: "expected whole seconds".to_string(),
    })?;
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "timeout must be positive".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
