/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tunebox_session::SessionConfig;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tunebox.toml";

/// Prefix for environment overrides (`TUNEBOX_LIBRARY`, `TUNEBOX_SESSION__PAGE_SIZE`)
pub const ENV_PREFIX: &str = "TUNEBOX";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Library file to open when none is passed on the command line
    #[serde(default)]
    pub library: Option<PathBuf>,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library: None,
            session: SessionConfig::default(),
            logging: default_logging(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `tunebox.toml` is read if
    /// present. `TUNEBOX_*` variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Nested keys use a double underscore: TUNEBOX_SESSION__PAGE_SIZE
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.session
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config(
                "logging filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "tunebox=info,tunebox_session=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        let config = AppConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(config.session, SessionConfig::default());
        assert_eq!(config.logging.filter, "tunebox=info,tunebox_session=info");
        assert!(config.library.is_none());
    }

    #[test]
    fn file_values_are_read() {
        let file = config_file(
            r#"
            library = "music.json"

            [session]
            page_size = 30
            image_endpoint = "https://img.example/"
            "#,
        );

        let config = AppConfig::load_from(Some(file.path()), env(&[])).unwrap();
        assert_eq!(config.library, Some(PathBuf::from("music.json")));
        assert_eq!(config.session.page_size, 30);
        assert_eq!(config.session.initial_visible, 15);
        assert_eq!(config.session.image_endpoint, "https://img.example/");
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file("[session]\npage_size = 30\n");

        let config = AppConfig::load_from(
            Some(file.path()),
            env(&[
                ("TUNEBOX_SESSION__PAGE_SIZE", "5"),
                ("TUNEBOX_LOGGING__FILTER", "debug"),
                ("TUNEBOX_LIBRARY", "/tmp/lib.json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.session.page_size, 5);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.library, Some(PathBuf::from("/tmp/lib.json")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Some(Path::new("/nonexistent/tunebox.toml")), env(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = AppConfig::load_from(None, env(&[("TUNEBOX_SESSION__PAGE_SIZE", "0")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
