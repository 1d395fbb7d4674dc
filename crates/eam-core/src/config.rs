//! Service configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! provenance = "eam"
//!
//! [grid]
//! fetch_timeout_ms = 5000
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use crate::error::{ServiceError, ServiceResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EamConfig {
    /// Provenance stamped on records this system creates
    pub provenance: String,
    /// Report grid settings
    pub grid: GridConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl EamConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// `ServiceError::Configuration` if the text is not valid configuration
    pub fn from_toml_str(text: &str) -> ServiceResult<Self> {
        toml::from_str(text).map_err(|e| ServiceError::Configuration(e.to_string()))
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `ServiceError::Configuration` if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// With grid fetch timeout
    #[inline]
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.grid.fetch_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With provenance
    #[inline]
    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }
}

impl Default for EamConfig {
    fn default() -> Self {
        Self {
            provenance: "eam".to_string(),
            grid: GridConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Report grid settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Upper bound on one grid assembly, all fetches included
    pub fetch_timeout_ms: u64,
}

impl GridConfig {
    /// Fetch timeout as a duration
    #[inline]
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 30_000,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_is_default() {
        assert_eq!(EamConfig::from_toml_str("").unwrap(), EamConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = EamConfig::from_toml_str("[grid]\nfetch_timeout_ms = 250\n").unwrap();
        assert_eq!(config.grid.fetch_timeout(), Duration::from_millis(250));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.provenance, "eam");
    }

    #[test]
    fn malformed_text_is_configuration_error() {
        let err = EamConfig::from_toml_str("[grid]\nfetch_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provenance = \"import\"\n[logging]\njson = true").unwrap();

        let config = EamConfig::load(file.path()).unwrap();
        assert_eq!(config.provenance, "import");
        assert!(config.logging.json);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = EamConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }

    #[test]
    fn builder_methods() {
        let config = EamConfig::new()
            .with_fetch_timeout(Duration::from_secs(2))
            .with_provenance("test");
        assert_eq!(config.grid.fetch_timeout_ms, 2000);
        assert_eq!(config.provenance, "test");
    }
}
