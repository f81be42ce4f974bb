//! Application configuration, loaded from an optional TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use disaster_map_map::MapSettings;
use serde::{Deserialize, Serialize};

use crate::AppError;

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "disaster_map.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Map viewport and tiles.
    pub map: MapSettings,
    /// UI delays.
    pub timing: TimingConfig,
    /// Report output.
    pub report: ReportConfig,
    /// HTTP listener.
    pub server: ServerConfig,
}

/// Delays of the scheduled UI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between start-up and bootstrap, in milliseconds.
    pub startup_delay_ms: u64,
    /// Delay between a marker click and the detail panel opening, in
    /// milliseconds. Lets the popup open first.
    pub popup_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: 500,
            popup_delay_ms: 100,
        }
    }
}

impl TimingConfig {
    /// Start-up delay as a [`Duration`].
    #[must_use]
    pub const fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    /// Popup delay as a [`Duration`].
    #[must_use]
    pub const fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }
}

/// Where exported reports go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory reports are written to, created on first export.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reportes"),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Overrides the listener from the `BIND_ADDR` and `PORT` environment
    /// variables, when set. An unparseable `PORT` is ignored with a warning.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Same as [`ServerConfig::apply_env`], reading variables through
    /// `lookup`.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(e) => log::warn!("Ignoring invalid PORT '{port}': {e}"),
            }
        }
    }
}

impl AppConfig {
    /// Parses a configuration document. Missing sections and keys take
    /// their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the document is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ConfigIo`] if the file cannot be read, or
    /// [`AppError::Config`] if it cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| AppError::ConfigIo {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timing.startup_delay(), Duration::from_millis(500));
        assert_eq!(config.timing.popup_delay(), Duration::from_millis(100));
        assert_eq!(config.map.initial_zoom, 7);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[map]
focus_zoom = 12

[timing]
popup_delay_ms = 0

[report]
output_dir = "/tmp/reportes"
"#,
        )
        .unwrap();

        assert_eq!(config.map.focus_zoom, 12);
        assert_eq!(config.map.initial_zoom, 7);
        assert_eq!(config.timing.popup_delay_ms, 0);
        assert_eq!(config.timing.startup_delay_ms, 500);
        assert_eq!(config.report.output_dir, PathBuf::from("/tmp/reportes"));
        assert_eq!(config.server.bind_addr, "127.0.0.1");
    }

    #[test]
    fn listener_variables_override_server_section() {
        let mut server = ServerConfig::default();
        server.apply_vars(|key| match key {
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9000".to_string()),
            _ => None,
        });
        assert_eq!(server.bind_addr, "0.0.0.0");
        assert_eq!(server.port, 9000);

        server.apply_vars(|key| (key == "PORT").then(|| "puerto".to_string()));
        assert_eq!(server.port, 9000);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let result = AppConfig::from_toml_str("[server]\nport = \"ocho mil\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let result = AppConfig::load(Some(path.as_path()));
        assert!(matches!(result, Err(AppError::ConfigIo { .. })));

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Failed to read config "));
        assert!(message.contains("missing.toml"));
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disaster_map.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();

        assert_eq!(config.server.port, 9090);
    }
}
