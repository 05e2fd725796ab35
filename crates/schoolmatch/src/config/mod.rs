use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::funnel::candidates::MatchStrategy;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("FUNNEL_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("FUNNEL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("FUNNEL_PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("FUNNEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let strategy = match env::var("FUNNEL_MATCH_STRATEGY") {
            Ok(raw) => MatchStrategy::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidMatchStrategy { value: raw })?,
            Err(_) => MatchStrategy::default(),
        };
        let mentor_roster = env::var("FUNNEL_MENTOR_ROSTER").ok().map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: MatchingConfig {
                strategy,
                mentor_roster,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Mentor matching controls: the overlap strategy and an optional roster CSV
/// loaded at startup.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub strategy: MatchStrategy,
    pub mentor_roster: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMatchStrategy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "FUNNEL_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "FUNNEL_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatchStrategy { value } => {
                write!(
                    f,
                    "FUNNEL_MATCH_STRATEGY '{}' is not 'first_overlap' or 'best_overlap'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMatchStrategy { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
