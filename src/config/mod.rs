//! Configuration management for the mood diary.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MOOD_DIARY_DIR`: Data directory (defaults to ~/.mood-diary)
//! - `MOOD_DIARY_TOKEN`: Inference API token
//! - `HF_TOKEN`: Fallback token if MOOD_DIARY_TOKEN is not set
//! - `MOOD_DIARY_MODEL_URL`: Model endpoint (defaults to the Turkish BERT sentiment model)
//! - `MOOD_DIARY_TIMEOUT_SECS`: Request timeout in seconds (no timeout when unset)
//! - `MOOD_DIARY_BACKEND`: `file` (default) or `sqlite`
//! - `MOOD_DIARY_LABEL_ALIASES`: Extra `token=CATEGORY` label mappings
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, DEFAULT_MODEL_URL, ENV_VAR_BACKEND, ENV_VAR_DATA_DIR, ENV_VAR_HF_TOKEN,
    ENV_VAR_HOME, ENV_VAR_LABEL_ALIASES, ENV_VAR_MODEL_URL, ENV_VAR_TIMEOUT_SECS, ENV_VAR_TOKEN,
    REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use crate::sentiment::LabelTable;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use zeroize::Zeroizing;

/// Which persistence backend holds the diary slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// One JSON file per slot in the data directory.
    #[default]
    File,
    /// A SQLite database in the data directory.
    Sqlite,
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(AppError::Config(format!(
                "Unknown storage backend '{}'. Expected 'file' or 'sqlite'",
                other
            ))),
        }
    }
}

/// Configuration for the mood diary.
///
/// # Examples
///
/// ```
/// use mood_diary::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     token: "hf_xxx".to_string().into(),
///     data_dir: PathBuf::from("/var/lib/mood-diary"),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Inference API token, sent as a bearer token.
    ///
    /// Loaded from MOOD_DIARY_TOKEN, then HF_TOKEN.
    pub token: Zeroizing<String>,

    /// Model endpoint receiving classification requests.
    pub model_url: String,

    /// Optional timeout for one classification request.
    pub timeout: Option<Duration>,

    /// Directory holding the persisted history.
    pub data_dir: PathBuf,

    /// Storage backend for the history.
    pub backend: BackendKind,

    /// Raw label to category mapping.
    pub labels: LabelTable,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &REDACTED_PLACEHOLDER)
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .field("data_dir", &"[REDACTED_PATH]")
            .field("backend", &self.backend)
            .field("labels", &self.labels.len())
            .finish()
    }
}

impl Default for Config {
    /// Creates a new Config with default values and no token.
    fn default() -> Self {
        Config {
            token: Zeroizing::new(String::new()),
            model_url: DEFAULT_MODEL_URL.to_string(),
            timeout: None,
            data_dir: PathBuf::from(""),
            backend: BackendKind::File,
            labels: LabelTable::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand` to handle `~`
    /// and environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails or yields an empty path
    /// - The timeout is not a positive whole number of seconds
    /// - The backend name or a label alias is not recognized
    ///
    /// A missing token is not an error here; see [`Config::validate`].
    pub fn load() -> AppResult<Self> {
        let token = env::var(ENV_VAR_TOKEN)
            .or_else(|_| env::var(ENV_VAR_HF_TOKEN))
            .unwrap_or_default();

        let model_url = env::var(ENV_VAR_MODEL_URL)
            .map(|url| url.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_MODEL_URL.to_string());

        let timeout = match env::var(ENV_VAR_TIMEOUT_SECS) {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        let data_dir_str = env::var(ENV_VAR_DATA_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let backend = match env::var(ENV_VAR_BACKEND) {
            Ok(raw) => raw.parse()?,
            Err(_) => BackendKind::default(),
        };

        let labels = match env::var(ENV_VAR_LABEL_ALIASES) {
            Ok(raw) => LabelTable::default().with_aliases_from_str(&raw)?,
            Err(_) => LabelTable::default(),
        };

        Ok(Config {
            token: Zeroizing::new(token),
            model_url,
            timeout,
            data_dir,
            backend,
            labels,
        })
    }

    /// Validates that the configuration is usable for classifying and storing.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "API token is missing" if no token was provided
    /// - "Model URL must start with http:// or https://" for other URLs
    /// - "Data directory path is empty" / "Data directory must be an absolute path"
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config(format!(
                "API token is missing. Set {} or {}",
                ENV_VAR_TOKEN, ENV_VAR_HF_TOKEN
            )));
        }

        if !(self.model_url.starts_with("http://") || self.model_url.starts_with("https://")) {
            return Err(AppError::Config(
                "Model URL must start with http:// or https://".to_string(),
            ));
        }

        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_timeout(raw: &str) -> AppResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Config(format!(
            "{} must be a positive number of seconds, got '{}'",
            ENV_VAR_TIMEOUT_SECS, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Category;
    use serial_test::serial;
    use tempfile::tempdir;

    const ALL_VARS: &[&str] = &[
        ENV_VAR_TOKEN,
        ENV_VAR_HF_TOKEN,
        ENV_VAR_MODEL_URL,
        ENV_VAR_TIMEOUT_SECS,
        ENV_VAR_DATA_DIR,
        ENV_VAR_BACKEND,
        ENV_VAR_LABEL_ALIASES,
        ENV_VAR_HOME,
    ];

    /// Runs `f` with only the given variables set, restoring the originals afterwards.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let saved: Vec<_> = ALL_VARS.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in ALL_VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            token: Zeroizing::new("hf_test".to_string()),
            data_dir: PathBuf::from("/absolute/path"),
            ..Config::default()
        }
    }

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let config = Config {
            token: Zeroizing::new("hf_very_secret".to_string()),
            data_dir: PathBuf::from("/home/someone/.mood-diary"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("hf_very_secret"));
        assert!(!debug_output.contains("/home/someone"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(debug_output.contains("[REDACTED_PATH]"));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_token() {
        let config = Config {
            token: Zeroizing::new("  ".to_string()),
            ..valid_config()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("API token is missing")),
            _ => panic!("Expected AppError::Config variant"),
        }
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = Config {
            model_url: "ftp://models.example/x".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("relative/dir"),
            ..valid_config()
        };
        match config.validate() {
            Err(AppError::Config(msg)) => assert!(msg.contains("absolute")),
            _ => panic!("Expected AppError::Config variant"),
        }
    }

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("file".parse::<BackendKind>().unwrap(), BackendKind::File);
        assert_eq!(" SQLite ".parse::<BackendKind>().unwrap(), BackendKind::Sqlite);
        assert!("postgres".parse::<BackendKind>().is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    #[serial]
    fn test_load_with_environment_vars() {
        let temp_dir = tempdir().unwrap();
        let dir_path = temp_dir.path().to_string_lossy().to_string();

        with_env(
            &[
                (ENV_VAR_TOKEN, "hf_primary"),
                (ENV_VAR_HF_TOKEN, "hf_fallback"),
                (ENV_VAR_MODEL_URL, "http://127.0.0.1:9000/models/test"),
                (ENV_VAR_TIMEOUT_SECS, "20"),
                (ENV_VAR_DATA_DIR, &dir_path),
                (ENV_VAR_BACKEND, "sqlite"),
                (ENV_VAR_LABEL_ALIASES, "joy=POSITIVE"),
            ],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.token.as_str(), "hf_primary");
                assert_eq!(config.model_url, "http://127.0.0.1:9000/models/test");
                assert_eq!(config.timeout, Some(Duration::from_secs(20)));
                assert_eq!(config.data_dir, PathBuf::from(&dir_path));
                assert_eq!(config.backend, BackendKind::Sqlite);
                assert_eq!(config.labels.resolve("joy"), Category::Positive);
                assert!(config.validate().is_ok());
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_with_fallbacks() {
        let temp_dir = tempdir().unwrap();
        let home_path = temp_dir.path().to_string_lossy().to_string();

        with_env(
            &[(ENV_VAR_HOME, &home_path), (ENV_VAR_HF_TOKEN, "hf_fallback")],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.token.as_str(), "hf_fallback");
                assert_eq!(config.model_url, DEFAULT_MODEL_URL);
                assert_eq!(config.timeout, None);
                assert_eq!(config.backend, BackendKind::File);
                assert_eq!(
                    config.data_dir,
                    PathBuf::from(&home_path).join(DEFAULT_DATA_SUBDIR)
                );
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_expands_tilde() {
        let temp_dir = tempdir().unwrap();
        let home_path = temp_dir.path().to_string_lossy().to_string();

        with_env(
            &[(ENV_VAR_HOME, &home_path), (ENV_VAR_DATA_DIR, "~/diary-data")],
            || {
                let config = Config::load().unwrap();
                assert_eq!(config.data_dir, PathBuf::from(&home_path).join("diary-data"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_values() {
        let temp_dir = tempdir().unwrap();
        let home_path = temp_dir.path().to_string_lossy().to_string();

        for (key, value) in [
            (ENV_VAR_TIMEOUT_SECS, "-3"),
            (ENV_VAR_BACKEND, "redis"),
            (ENV_VAR_LABEL_ALIASES, "joy=ELATED"),
        ] {
            with_env(&[(ENV_VAR_HOME, &home_path), (key, value)], || {
                match Config::load() {
                    Err(AppError::Config(_)) => {}
                    other => panic!("Expected config error for {}={}, got {:?}", key, value, other),
                }
            });
        }
    }
}
