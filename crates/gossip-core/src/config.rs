//! gossipd.toml configuration parser.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeMode;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_SNAPSHOT_PATH: &str = "/var/lib/gossip/output.json";
pub const DEFAULT_COLLECT_TIMEOUT: &str = "61s";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {error}")]
    Read {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExporterConfig {
    pub server: ServerConfig,
    pub snapshot: SnapshotConfig,
    pub collect: CollectConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    pub metrics_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: PathBuf,
    pub decode: DecodeMode,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            decode: DecodeMode::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectConfig {
    /// Upper bound on one collection, e.g. "500ms", "30s", "2m".
    pub timeout: String,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_COLLECT_TIMEOUT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` takes precedence.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        })
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "unknown log format {other:?} (expected \"text\" or \"json\")"
            )),
        }
    }
}

impl ExporterConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Read {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.listen.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "server.listen {:?} is not a socket address",
                self.server.listen
            ))
        })
    }

    pub fn collect_timeout(&self) -> Result<Duration, ConfigError> {
        match parse_duration(&self.collect.timeout) {
            Some(d) if !d.is_zero() => Ok(d),
            Some(_) => Err(ConfigError::Invalid("collect.timeout must be non-zero".to_string())),
            None => Err(ConfigError::Invalid(format!(
                "collect.timeout {:?} is not a duration",
                self.collect.timeout
            ))),
        }
    }

    /// Check every field that can only be validated at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        if !self.server.metrics_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "server.metrics_path {:?} must start with '/'",
                self.server.metrics_path
            )));
        }
        if self.snapshot.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("snapshot.path must not be empty".to_string()));
        }
        self.collect_timeout()?;
        Ok(())
    }
}

/// Parse "500ms", "30s", "2m", or a bare number of seconds.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ExporterConfig::default();
        config.validate().unwrap();
        assert_eq!(config.listen_addr().unwrap().port(), 8080);
        assert_eq!(config.collect_timeout().unwrap(), Duration::from_secs(61));
        assert_eq!(config.snapshot.decode, DecodeMode::Strict);
    }

    #[test]
    fn parse_empty_uses_defaults() {
        let config = ExporterConfig::from_toml_str("").unwrap();
        assert_eq!(config, ExporterConfig::default());
    }

    #[test]
    fn parse_partial() {
        let toml_str = r#"
[snapshot]
path = "/tmp/gossip.json"
decode = "per_record"

[log]
format = "json"
"#;
        let config = ExporterConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.snapshot.path, PathBuf::from("/tmp/gossip.json"));
        assert_eq!(config.snapshot.decode, DecodeMode::PerRecord);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.server.listen, DEFAULT_LISTEN);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn unknown_decode_mode_rejected() {
        let err =
            ExporterConfig::from_toml_str("[snapshot]\ndecode = \"lenient\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn round_trip_through_toml() {
        let config = ExporterConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("metrics_path"));
        assert_eq!(ExporterConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gossipd.toml");
        std::fs::write(&path, "[server]\nlisten = \"127.0.0.1:9100\"\n").unwrap();

        let config = ExporterConfig::from_file(&path).unwrap();
        assert_eq!(config.listen_addr().unwrap().port(), 9100);
    }

    #[test]
    fn from_file_missing() {
        let err =
            ExporterConfig::from_file(Path::new("/nonexistent/gossipd.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_listen_rejected() {
        let mut config = ExporterConfig::default();
        config.server.listen = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_metrics_path_rejected() {
        let mut config = ExporterConfig::default();
        config.server.metrics_path = "metrics".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_snapshot_path_rejected() {
        let mut config = ExporterConfig::default();
        config.snapshot.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = ExporterConfig::default();
        config.collect.timeout = "0s".to_string();
        assert!(config.validate().is_err());
        config.collect.timeout = "soon".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn overflowing_timeout_rejected() {
        let mut config = ExporterConfig::default();
        config.collect.timeout = "999999999999999999m".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert_eq!(parse_duration("999999999999999999m"), None);
    }

    #[test]
    fn parse_duration_forms() {
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration("10"), Some(Duration::from_secs(10)));
        assert_eq!(parse_duration("ten"), None);
    }
}
