//! Configuration loading
//!
//! Settings come from one of two places:
//! - **User store**: managed by `confy` under the platform config directory
//! - **Explicit file**: a TOML file passed by the host (replays, tests)
//!
//! Missing keys fall back to [`ActionProgressConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use action_progress_types::ActionProgressConfig;

/// Application name used for the confy store and the config directory.
pub const APP_NAME: &str = "action-progress";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("config store error: {0}")]
    Store(#[from] confy::ConfyError),
}

/// Load settings from a TOML file
pub fn load_file(path: &Path) -> Result<ActionProgressConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save settings to a TOML file
pub fn save_file(path: &Path, config: &ActionProgressConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Load the user's stored settings, creating the store on first use.
pub fn load_user_config() -> Result<ActionProgressConfig, ConfigError> {
    Ok(confy::load(APP_NAME, None)?)
}

/// Persist the user's settings.
pub fn store_user_config(config: &ActionProgressConfig) -> Result<(), ConfigError> {
    confy::store(APP_NAME, None, config)?;
    Ok(())
}

/// Resolve settings for a run: an explicit file if given, otherwise the
/// user store. Failures are logged and fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> ActionProgressConfig {
    let result = match path {
        Some(path) => load_file(path),
        None => load_user_config(),
    };

    match result {
        Ok(config) => {
            tracing::info!(source = ?path, "Loaded action progress config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            ActionProgressConfig::default()
        }
    }
}

/// Platform directory holding the user's settings
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{APP_NAME}-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_save_then_load_file() {
        let path = temp_path("roundtrip.toml");
        let config = ActionProgressConfig {
            ignore_single_actions: true,
            herblore: false,
            ..Default::default()
        };

        save_file(&path, &config).unwrap();
        let loaded = load_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = temp_path("does-not-exist.toml");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let path = temp_path("bad.toml");
        fs::write(&path, "ignore_single_actions = \"yes\"").unwrap();
        let err = load_file(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let path = temp_path("fallback.toml");
        fs::write(&path, "not = [valid").unwrap();
        let config = load_or_default(Some(&path));
        let _ = fs::remove_file(&path);

        assert_eq!(config, ActionProgressConfig::default());
    }

    #[test]
    fn test_config_dir_named_after_app() {
        if let Some(dir) = default_config_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }
}
