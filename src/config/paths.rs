//! Path management for famfin
//!
//! ## Path Resolution Order
//!
//! 1. `FAMFIN_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (`~/.config/famfin` on Linux, `~/Library/Application Support/famfin`
//!    on macOS, `%APPDATA%\famfin\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FamfinError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "FAMFIN_DATA_DIR";

/// Manages all paths used by famfin
#[derive(Debug, Clone)]
pub struct FamfinPaths {
    base_dir: PathBuf,
}

impl FamfinPaths {
    /// Resolve the base directory from the environment or the platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FamfinError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding one JSON file per table
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn debts_file(&self) -> PathBuf {
        self.data_dir().join("debts.json")
    }

    pub fn shopping_file(&self) -> PathBuf {
        self.data_dir().join("shopping.json")
    }

    pub fn spaces_file(&self) -> PathBuf {
        self.data_dir().join("spaces.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FamfinError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FamfinError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FamfinError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if famfin has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FamfinError> {
    ProjectDirs::from("", "", "famfin")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FamfinError::Config("Could not determine a home directory".into()))
}
