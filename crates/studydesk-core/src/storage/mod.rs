mod config;
pub mod database;
pub mod state;

pub use config::{CgpaConfig, Config, ShortcutsConfig, StreakConfig, UiConfig};
pub use database::Database;
pub use state::{load_state, save_state, KvStore, MemoryStore, CGPA_KEY, STREAK_KEY, TASKS_KEY};

use std::path::PathBuf;

use crate::error::DatabaseError;

/// Returns the studydesk data directory.
///
/// `STUDYDESK_HOME` wins when set. Otherwise `~/.config/studydesk[-dev]/`
/// based on `STUDYDESK_ENV` (set it to `dev` for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, DatabaseError> {
    let dir = match std::env::var_os("STUDYDESK_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("STUDYDESK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studydesk-dev")
            } else {
                base_dir.join("studydesk")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| DatabaseError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
