use std::path::PathBuf;

/// Settings for [`Diagnostics::init`](super::Diagnostics::init), taken from
/// the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsConfig {
    /// Default directive when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub level: String,
    /// Render stderr events as JSON objects
    pub json: bool,
    /// Also write JSON events to a daily `lineage.log` in this directory
    pub log_dir: Option<PathBuf>,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet_stderr_only() {
        let config = DiagnosticsConfig::default();
        assert_eq!(config.level, "warn");
        assert!(!config.json);
        assert!(config.log_dir.is_none());
    }
}
