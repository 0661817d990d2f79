//! Storage layer for famfin
//!
//! One JSON file per table under the data directory, written atomically.
//! `Storage` owns every repository, the audit logger and the view the
//! current command runs in.

pub mod accounts;
pub mod budgets;
pub mod debts;
pub mod file_io;
pub mod goals;
pub mod init;
pub mod repository;
pub mod shopping;
pub mod spaces;
pub mod transactions;

pub use accounts::AccountRepository;
pub use budgets::BudgetRepository;
pub use debts::DebtRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use init::initialize_storage;
pub use repository::{JsonRepository, Record};
pub use shopping::ShoppingRepository;
pub use spaces::SpaceRepository;
pub use transactions::TransactionRepository;

use std::fmt::Display;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{CurrentView, FamfinPaths};
use crate::error::FamfinError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FamfinPaths,
    audit: AuditLogger,
    view: CurrentView,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub goals: GoalRepository,
    pub budgets: BudgetRepository,
    pub debts: DebtRepository,
    pub shopping: ShoppingRepository,
    pub spaces: SpaceRepository,
}

impl Storage {
    /// Create a storage rooted at `paths`, in the personal view
    pub fn new(paths: FamfinPaths) -> Result<Self, FamfinError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            view: CurrentView::Personal,
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            goals: GoalRepository::new(paths.goals_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            debts: DebtRepository::new(paths.debts_file()),
            shopping: ShoppingRepository::new(paths.shopping_file()),
            spaces: SpaceRepository::new(paths.spaces_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FamfinPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// The view records are scoped to
    pub fn view(&self) -> &CurrentView {
        &self.view
    }

    pub fn set_view(&mut self, view: CurrentView) {
        self.view = view;
    }

    /// Load all tables from disk
    pub fn load_all(&self) -> Result<(), FamfinError> {
        self.accounts.load()?;
        self.transactions.load()?;
        self.goals.load()?;
        self.budgets.load()?;
        self.debts.load()?;
        self.shopping.load()?;
        self.spaces.load()?;
        Ok(())
    }

    /// Save all tables to disk
    pub fn save_all(&self) -> Result<(), FamfinError> {
        self.accounts.save()?;
        self.transactions.save()?;
        self.goals.save()?;
        self.budgets.save()?;
        self.debts.save()?;
        self.shopping.save()?;
        self.spaces.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: impl Display,
        name: Option<String>,
        entity: &T,
    ) -> Result<(), FamfinError> {
        self.audit
            .log(&AuditEntry::create(entity_type, id.to_string(), name, entity))
    }

    /// Log an update with a summary of the changed fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: impl Display,
        name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), FamfinError> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            id.to_string(),
            name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        id: impl Display,
        name: Option<String>,
        entity: &T,
    ) -> Result<(), FamfinError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, id.to_string(), name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(*storage.view(), CurrentView::Personal);
    }

    #[test]
    fn test_log_update_records_diff() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let before = Account::new("Wallet", AccountType::Cash);
        let mut after = before.clone();
        after.rename("Pocket");
        storage
            .log_update(EntityType::Account, before.id, Some("Pocket".into()), &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].diff_summary.as_deref(),
            Some("name: \"Wallet\" -> \"Pocket\"")
        );
    }
}
