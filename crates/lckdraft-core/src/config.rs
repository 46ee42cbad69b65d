// Configuration loading and parsing (config/lckdraft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::stats::DEFAULT_RANKING_LIMIT;

/// Name of the configuration file inside `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "lckdraft.toml";

/// Share origin used when no config file exists.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// lckdraft.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,
    pub share: ShareConfig,
}

/// `[stats]`: where completed drafts are recorded for the composition ranking.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// When false, results are never saved and rankings are empty.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub backend: StatsBackend,
    /// SQLite database file. An empty path leaves statistics unconfigured.
    #[serde(default)]
    pub db_path: String,
    /// Maximum number of compositions per ranking.
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            enabled: false,
            backend: StatsBackend::default(),
            db_path: String::new(),
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsBackend {
    #[default]
    Sqlite,
    Memory,
}

/// `[share]`: how share links are built.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// Origin of the result page, e.g. `https://lck-draft.example`.
    pub base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        ShareConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_ranking_limit() -> usize {
    DEFAULT_RANKING_LIMIT
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/lckdraft.toml` relative to
/// `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

/// Parse configuration text without touching the filesystem.
pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // Keep the user's edited copy.
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

/// Load config relative to `base_dir`, falling back to [`Config::default`]
/// (statistics off, local share origin) when neither `defaults/` nor
/// `config/` provides a config file. A file that exists but is invalid is
/// still an error.
pub fn load_config_or_default_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let default_file = base_dir.join("defaults").join(CONFIG_FILE);
    let config_file = base_dir.join("config").join(CONFIG_FILE);
    if !default_file.is_file() && !config_file.is_file() {
        warn!(
            "no {} found in {}; using built-in defaults with statistics off",
            CONFIG_FILE,
            base_dir.display()
        );
        return Ok(Config::default());
    }
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

/// [`load_config_or_default_from`] for the current working directory.
pub fn load_config_or_default() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_or_default_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.stats.ranking_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "stats.ranking_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    let base_url = &config.share.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "share.base_url".into(),
            message: format!("must start with http:// or https://, got {base_url:?}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root, where `defaults/` lives.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lckdraft_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_config(dir: &Path, text: &str) {
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(dir.join("config").join(CONFIG_FILE), text).unwrap();
    }

    #[test]
    fn load_default_config_from_project_files() {
        let tmp = scratch_dir("defaults");
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE),
            tmp.join("defaults").join(CONFIG_FILE),
        )
        .unwrap();

        let copied = ensure_config_files(&tmp).expect("should copy default configs");
        assert_eq!(copied, vec![tmp.join("config").join(CONFIG_FILE)]);

        let config = load_config_from(&tmp).expect("should load valid config");
        assert!(config.stats.enabled);
        assert_eq!(config.stats.backend, StatsBackend::Sqlite);
        assert_eq!(config.stats.db_path, "lckdraft.db");
        assert_eq!(config.stats.ranking_limit, 20);
        assert!(config.share.base_url.starts_with("http"));

        // Second run leaves the existing copy alone.
        assert!(ensure_config_files(&tmp).unwrap().is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_stats_section_disables_stats() {
        let config = parse_config(
            r#"
            [share]
            base_url = "https://lck.example"
            "#,
        )
        .unwrap();
        assert!(!config.stats.enabled);
        assert_eq!(config.stats.ranking_limit, DEFAULT_RANKING_LIMIT);
    }

    #[test]
    fn memory_backend_parses() {
        let config = parse_config(
            r#"
            [stats]
            backend = "memory"

            [share]
            base_url = "http://localhost:3000"
            "#,
        )
        .unwrap();
        assert!(config.stats.enabled);
        assert_eq!(config.stats.backend, StatsBackend::Memory);
        assert!(config.stats.db_path.is_empty());
    }

    #[test]
    fn unknown_backend_is_parse_error() {
        let tmp = scratch_dir("bad_backend");
        write_config(
            &tmp,
            r#"
            [stats]
            backend = "supabase"

            [share]
            base_url = "https://lck.example"
            "#,
        );
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }), "{err}");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn zero_ranking_limit_is_rejected() {
        let tmp = scratch_dir("zero_limit");
        write_config(
            &tmp,
            r#"
            [stats]
            ranking_limit = 0

            [share]
            base_url = "https://lck.example"
            "#,
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "stats.ranking_limit")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn base_url_must_be_http() {
        let tmp = scratch_dir("bad_url");
        write_config(
            &tmp,
            r#"
            [share]
            base_url = "lck.example"
            "#,
        );
        match load_config_from(&tmp) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, "share.base_url"),
            other => panic!("expected validation error, got {other:?}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_reported() {
        let tmp = scratch_dir("missing");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_directory_falls_back_to_builtin_config() {
        let tmp = scratch_dir("fallback");
        let config = load_config_or_default_from(&tmp).expect("should fall back");
        assert!(!config.stats.enabled);
        assert_eq!(config.share.base_url, DEFAULT_BASE_URL);
        assert!(!tmp.join("config").exists());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn fallback_still_loads_and_validates_present_config() {
        let tmp = scratch_dir("fallback_present");
        write_config(
            &tmp,
            r#"
            [stats]
            backend = "memory"

            [share]
            base_url = "https://lck.example"
            "#,
        );
        let config = load_config_or_default_from(&tmp).unwrap();
        assert_eq!(config.stats.backend, StatsBackend::Memory);
        assert_eq!(config.share.base_url, "https://lck.example");

        write_config(&tmp, "[share]\nbase_url = \"lck.example\"\n");
        assert!(matches!(
            load_config_or_default_from(&tmp),
            Err(ConfigError::ValidationError { .. })
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn no_defaults_and_no_config_is_an_error() {
        let tmp = scratch_dir("empty");
        let err = ensure_config_files(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }
}
