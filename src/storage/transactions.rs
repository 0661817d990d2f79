//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, with an
//! index from each account to the transactions that touch it (as source or
//! transfer destination).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FamfinError;
use crate::models::{AccountId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

type AccountIndex = HashMap<AccountId, Vec<TransactionId>>;

/// Repository for transaction persistence with an account index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    by_account: RwLock<AccountIndex>,
}

/// Newest first, most recently created first within a day
fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

fn accounts_of(txn: &Transaction) -> impl Iterator<Item = AccountId> {
    std::iter::once(txn.account_id).chain(txn.destination_account_id.filter(|_| txn.is_transfer()))
}

fn index(by_account: &mut AccountIndex, txn: &Transaction) {
    for account in accounts_of(txn) {
        by_account.entry(account).or_default().push(txn.id);
    }
}

fn unindex(by_account: &mut AccountIndex, txn: &Transaction) {
    for account in accounts_of(txn) {
        if let Some(ids) = by_account.get_mut(&account) {
            ids.retain(|&id| id != txn.id);
        }
    }
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    fn read_data(&self) -> Result<RwLockReadGuard<'_, HashMap<TransactionId, Transaction>>, FamfinError> {
        self.data
            .read()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_data(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<TransactionId, Transaction>>, FamfinError> {
        self.data
            .write()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn write_index(&self) -> Result<RwLockWriteGuard<'_, AccountIndex>, FamfinError> {
        self.by_account
            .write()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk and build the account index
    pub fn load(&self) -> Result<(), FamfinError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.write_data()?;
        let mut by_account = self.write_index()?;

        data.clear();
        by_account.clear();

        for txn in file_data.transactions {
            index(&mut by_account, &txn);
            data.insert(txn.id, txn);
        }

        tracing::debug!(count = data.len(), "loaded transactions");
        Ok(())
    }

    pub fn save(&self) -> Result<(), FamfinError> {
        let mut transactions: Vec<_> = self.read_data()?.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FamfinError> {
        Ok(self.read_data()?.get(&id).cloned())
    }

    /// Find a transaction by id prefix; a prefix shared by several
    /// transactions is an error
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, FamfinError> {
        let data = self.read_data()?;
        let mut matching = data.values().filter(|t| t.id.matches(identifier));

        match (matching.next(), matching.next()) {
            (None, _) => Ok(None),
            (Some(found), None) => Ok(Some(found.clone())),
            (Some(_), Some(_)) => Err(FamfinError::Ambiguous {
                entity_type: "Transaction",
                identifier: identifier.trim().to_string(),
                matches: 2 + matching.count(),
            }),
        }
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FamfinError> {
        let mut transactions: Vec<_> = self.read_data()?.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Transactions moving money in or out of an account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, FamfinError> {
        let data = self.read_data()?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_account.get(&account_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FamfinError> {
        let mut data = self.write_data()?;
        let mut by_account = self.write_index()?;

        if let Some(old) = data.get(&txn.id) {
            unindex(&mut by_account, old);
        }

        index(&mut by_account, &txn);
        data.insert(txn.id, txn);
        Ok(())
    }

    pub fn delete(&self, id: TransactionId) -> Result<Option<Transaction>, FamfinError> {
        let mut data = self.write_data()?;
        let mut by_account = self.write_index()?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            unindex(&mut by_account, txn);
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        Ok(self.read_data()?.len())
    }
}
