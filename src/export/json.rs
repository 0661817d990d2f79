//! JSON Export functionality
//!
//! Exports every table to one JSON document with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FamfinError, FamfinResult};
use crate::models::{
    Account, BudgetPlan, DebtCreditItem, FamilySpace, Goal, ShoppingList, Transaction,
};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub accounts: Vec<Account>,

    pub transactions: Vec<Transaction>,

    pub goals: Vec<Goal>,

    pub budgets: Vec<BudgetPlan>,

    pub debts: Vec<DebtCreditItem>,

    pub shopping_lists: Vec<ShoppingList>,

    pub spaces: Vec<FamilySpace>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,

    pub transaction_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FamfinResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let transactions = storage.transactions.get_all()?;

        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            account_count: accounts.len(),
            transaction_count: transactions.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            transactions,
            goals: storage.goals.get_all()?,
            budgets: storage.budgets.get_all()?,
            debts: storage.debts.get_all()?,
            shopping_lists: storage.shopping.get_all()?,
            spaces: storage.spaces.get_all()?,
            metadata,
        })
    }

    /// Check the links between tables
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let account_ids: HashSet<_> = self.accounts.iter().map(|a| a.id).collect();
        let goal_ids: HashSet<_> = self.goals.iter().map(|g| g.id).collect();
        let debt_ids: HashSet<_> = self.debts.iter().map(|d| d.id).collect();

        for txn in &self.transactions {
            for account in std::iter::once(txn.account_id).chain(txn.destination_account_id) {
                if !account_ids.contains(&account) {
                    return Err(format!(
                        "Transaction {} references unknown account {}",
                        txn.id, account
                    ));
                }
            }
            if let Some(goal) = txn.goal_id.filter(|g| !goal_ids.contains(g)) {
                return Err(format!(
                    "Transaction {} references unknown goal {}",
                    txn.id, goal
                ));
            }
            if let Some(debt) = txn.debt_id.filter(|d| !debt_ids.contains(d)) {
                return Err(format!(
                    "Transaction {} references unknown debt {}",
                    txn.id, debt
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
///
/// Dangling links (left behind by deleted goals or debts) are reported in
/// the log but do not stop the export.
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FamfinResult<FullExport> {
    let export = FullExport::from_storage(storage)?;

    if let Err(problem) = export.validate() {
        tracing::warn!(%problem, "exporting data with dangling links");
    }

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FamfinError::Export(e.to_string()))?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamfinPaths;
    use crate::models::{AccountType, GoalCategory, GoalId, Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn expense(account: &Account, day: u32) -> Transaction {
        Transaction::new(
            account.id,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            TransactionKind::Expense,
            Money::from_units(50),
            "Food",
            "Market",
        )
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();

        let account = Account::new("Bank", AccountType::Bank);
        storage.accounts.upsert(account.clone()).unwrap();
        storage.transactions.upsert(expense(&account, 3)).unwrap();
        storage.transactions.upsert(expense(&account, 15)).unwrap();
        storage
            .goals
            .upsert(Goal::new("Car", Money::from_units(10), GoalCategory::Investment))
            .unwrap();

        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.goals.len(), 1);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-01-15"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_dangling_goal() {
        let (_temp_dir, storage) = create_test_storage();

        let account = Account::new("Bank", AccountType::Bank);
        storage.accounts.upsert(account.clone()).unwrap();
        let mut txn = expense(&account, 3);
        txn.goal_id = Some(GoalId::new());
        storage.transactions.upsert(txn).unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert!(export.validate().unwrap_err().contains("unknown goal"));
    }

    #[test]
    fn test_json_output_parses() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .accounts
            .upsert(Account::new("Bank", AccountType::Bank))
            .unwrap();

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.accounts.len(), 1);
        assert_eq!(parsed.accounts[0].name, "Bank");
        assert!(parsed.spaces.is_empty());
    }
}
