//! Path management for notion-expenses
//!
//! Provides XDG-compliant path resolution for settings, secrets, logs and the
//! snapshot cache.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSES_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/notion-expenses` or `~/.config/notion-expenses`
//! 3. Windows: `%APPDATA%\notion-expenses`

use std::path::PathBuf;

use crate::error::ExpenseError;

const APP_DIR_NAME: &str = "notion-expenses";

/// Manages all paths used by notion-expenses
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for all notion-expenses files
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Create a new ExpensePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = match std::env::var("EXPENSES_DATA_DIR") {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/notion-expenses/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the secrets file (token and database id)
    pub fn secrets_file(&self) -> PathBuf {
        self.base_dir.join("secrets.json")
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("expenses.log")
    }

    /// Get the snapshot cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join("cache")
    }

    /// Ensure the base and cache directories exist
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.cache_dir())
            .map_err(|e| ExpenseError::Io(format!("Failed to create cache directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !config_home.is_empty() {
            return Ok(PathBuf::from(config_home).join(APP_DIR_NAME));
        }
    }

    let base = directories::BaseDirs::new()
        .ok_or_else(|| ExpenseError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join(APP_DIR_NAME))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| ExpenseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(base.config_dir().join(APP_DIR_NAME))
}
