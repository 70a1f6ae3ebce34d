//! Runtime configuration for embedding the core.
//!
//! # Responsibility
//! - Collect storage location, blob key, search debounce window and logging
//!   settings in one value.
//! - Resolve overrides from `SMARTNOTE_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are ignored, not treated as empty settings.
//! - Resolution never fails; unparsable values fall back to defaults.

use crate::logging::default_log_level;
use crate::repo::blob_store::DEFAULT_BLOB_KEY;
use crate::search::debounce::SEARCH_DEBOUNCE;
use std::path::PathBuf;
use std::time::Duration;

const DB_FILE_NAME: &str = "smartnote.sqlite3";

pub const ENV_DB_PATH: &str = "SMARTNOTE_DB_PATH";
pub const ENV_BLOB_KEY: &str = "SMARTNOTE_BLOB_KEY";
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "SMARTNOTE_SEARCH_DEBOUNCE_MS";
pub const ENV_LOG_LEVEL: &str = "SMARTNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SMARTNOTE_LOG_DIR";

/// Settings consumed by callers wiring up a [`crate::NotesService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartNotesConfig {
    /// SQLite file holding the note blob.
    pub db_path: PathBuf,
    /// Key the note blob is stored under.
    pub blob_key: String,
    /// Quiet period before typed search text is applied.
    pub search_debounce: Duration,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for SmartNotesConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            blob_key: DEFAULT_BLOB_KEY.to_string(),
            search_debounce: SEARCH_DEBOUNCE,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl SmartNotesConfig {
    /// Builds a config from process environment over defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup over defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(value) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_BLOB_KEY) {
            config.blob_key = value;
        }
        if let Some(millis) = read(ENV_SEARCH_DEBOUNCE_MS).and_then(|v| v.parse::<u64>().ok()) {
            config.search_debounce = Duration::from_millis(millis);
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            config.log_level = value;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        config
    }
}
