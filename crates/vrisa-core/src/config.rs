//! Configuration management for the VrISA console

use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Institution, Station};

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Directory of known stations and institutions
    pub directory: DirectoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            directory: DirectoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file, or fall back to defaults
    /// when no path is given
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json(&fs::read_to_string(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 8080,
        }
    }
}

/// Directory of stations and institutions offered in selection inputs
///
/// The console only enumerates these; alert rules keep station ids as
/// opaque strings and are never cross-checked against the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Known monitoring stations
    pub stations: Vec<Station>,
    /// Known institutions
    pub institutions: Vec<Institution>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            stations: vec![
                Station::new("estacion1", "Estación 1"),
                Station::new("estacion2", "Estación 2"),
                Station::new("estacion3", "Estación 3"),
            ],
            institutions: vec![
                Institution::new("1", "Universidad Nacional"),
                Institution::new("2", "Universidad del Valle"),
                Institution::new("3", "Institución Educativa VrISA"),
            ],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_cover_the_demo_directory() {
        let config = Config::default();

        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.directory.stations.len(), 3);
        assert_eq!(config.directory.stations[0].id, "estacion1");
        assert_eq!(config.directory.institutions.len(), 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn json_round_trip() {
        let config = Config::default();

        let json = serde_json::to_string(&config).unwrap();
        let back = Config::from_json(&json).unwrap();

        assert_eq!(back.server.host, config.server.host);
        assert_eq!(back.directory.stations, config.directory.stations);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let result = Config::from_json("{not json");

        assert!(result.is_err());
    }
}
