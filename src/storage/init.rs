//! Storage initialization
//!
//! Handles first-run setup: directories plus one empty file per table.

use crate::config::FamfinPaths;
use crate::error::FamfinError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing table files are left untouched.
pub fn initialize_storage(paths: &FamfinPaths) -> Result<(), FamfinError> {
    paths.ensure_directories()?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    storage.save_all()?;

    tracing::info!(data_dir = %paths.data_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FamfinPaths) -> bool {
    !paths.accounts_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType};
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage_creates_tables() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        initialize_storage(&paths).unwrap();
        assert!(!needs_initialization(&paths));

        assert!(paths.transactions_file().exists());
        assert!(paths.goals_file().exists());
        assert!(paths.spaces_file().exists());
    }

    #[test]
    fn test_initialize_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage
            .accounts
            .upsert(Account::new("Wallet", AccountType::Cash))
            .unwrap();
        storage.save_all().unwrap();

        initialize_storage(&paths).unwrap();

        let reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.accounts.count().unwrap(), 1);
    }
}
