use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;

use crate::domain::errors::ConfigError;
use crate::domain::models::config::LoggerConfig;

/// Prefix of environment overrides, e.g. `LINEAGE_PACKAGE_NAME`,
/// `LINEAGE_TRANSPORTS__CONSOLE=info`.
pub const ENV_PREFIX: &str = "LINEAGE_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. lineage.yaml in the working directory
    /// 3. lineage.local.yaml (local overrides, optional)
    /// 4. Environment variables (LINEAGE_* prefix, highest priority)
    pub fn load() -> Result<LoggerConfig> {
        let config: LoggerConfig = Self::base()
            .merge(Yaml::file("lineage.yaml"))
            .merge(Yaml::file("lineage.local.yaml"))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<LoggerConfig> {
        let config: LoggerConfig = Self::base()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string (no environment overrides)
    pub fn load_from_str(yaml: &str) -> Result<LoggerConfig> {
        let config: LoggerConfig = Self::base()
            .merge(Yaml::string(yaml))
            .extract()
            .context("Failed to parse configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Missing package identity is not an error here: it is reported by
    /// `Logger::from_config`, which needs it.
    pub fn validate(config: &LoggerConfig) -> Result<(), ConfigError> {
        if config.package_name.as_deref() == Some("") {
            return Err(ConfigError::EmptyPackageName);
        }

        if config.package_version.as_deref() == Some("") {
            return Err(ConfigError::EmptyPackageVersion);
        }

        if config.max_file_size == 0 {
            return Err(ConfigError::InvalidMaxFileSize(config.max_file_size));
        }

        if config.max_files == 0 {
            return Err(ConfigError::InvalidMaxFiles(config.max_files));
        }

        if let Some(http) = &config.transports.http {
            if http.url.is_empty() {
                return Err(ConfigError::ValidationFailed(
                    "HTTP transport url cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn base() -> Figment {
        Figment::new().merge(Serialized::defaults(LoggerConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{DEFAULT_MAX_FILES, DEFAULT_MAX_FILE_SIZE};
    use crate::domain::models::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.max_files, DEFAULT_MAX_FILES);
        assert!(config.directory.ends_with("logs"));
        assert!(!config.silent);
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
package_name: svc
package_version: 1.0.0
directory: /var/log/svc
max_file_size: 1024
max_files: 3
focus: http
filters:
  - meta.secret
  - user.password
transports:
  console: info
  file: [error, debug]
  http:
    url: https://collector.example.com/logs
    headers:
      - [authorization, Bearer abc]
";

        let config = ConfigLoader::load_from_str(yaml).expect("YAML should parse");

        assert_eq!(config.package_name.as_deref(), Some("svc"));
        assert_eq!(config.package_version.as_deref(), Some("1.0.0"));
        assert_eq!(config.directory, PathBuf::from("/var/log/svc"));
        assert_eq!(config.max_file_size, 1024);
        assert_eq!(config.max_files, 3);
        assert_eq!(config.focus.as_deref(), Some("http"));
        assert_eq!(config.filters, vec!["meta.secret", "user.password"]);
        assert_eq!(config.transports.console, Some(LogLevel::Info));
        assert_eq!(config.transports.tail, None);
        assert_eq!(config.transports.file, vec![LogLevel::Error, LogLevel::Debug]);

        let http = config.transports.http.expect("http transport should be configured");
        assert_eq!(http.level, LogLevel::Info);
        assert_eq!(http.url, "https://collector.example.com/logs");
        assert_eq!(http.headers, vec![("authorization".to_string(), "Bearer abc".to_string())]);
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let yaml = "transports:\n  console: loud\n";
        assert!(ConfigLoader::load_from_str(yaml).is_err());
    }

    #[test]
    fn test_validate_empty_package_name() {
        let config = LoggerConfig {
            package_name: Some(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyPackageName)
        ));
    }

    #[test]
    fn test_validate_zero_max_file_size() {
        let config = LoggerConfig {
            max_file_size: 0,
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxFileSize(0))
        ));
    }

    #[test]
    fn test_validate_zero_max_files() {
        let config = LoggerConfig {
            max_files: 0,
            ..Default::default()
        };

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxFiles(0))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("lineage.yaml");
        std::fs::write(&path, "package_name: from-file\npackage_version: 1.0.0\n").unwrap();

        temp_env::with_vars(
            [
                ("LINEAGE_PACKAGE_NAME", Some("from-env")),
                ("LINEAGE_TRANSPORTS__CONSOLE", Some("warn")),
            ],
            || {
                let config = ConfigLoader::load_from_file(&path).unwrap();
                assert_eq!(config.package_name.as_deref(), Some("from-env"));
                assert_eq!(config.package_version.as_deref(), Some("1.0.0"));
                assert_eq!(config.transports.console, Some(LogLevel::Warn));
            },
        );
    }
}
