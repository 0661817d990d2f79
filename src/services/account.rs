//! Account service
//!
//! Account management scoped to the current view: creation, renaming,
//! deletion (with its transactions) and derived balances.

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{Account, AccountId, AccountType, Money};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// An account with its derived balance
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    pub balance: Money,
    pub transaction_count: usize,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an account in the current view
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        initial_balance: Money,
    ) -> FamfinResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FamfinError::Validation("Account name cannot be empty".into()));
        }

        let view = self.storage.view();
        if self.storage.accounts.name_exists(name, view, None)? {
            return Err(FamfinError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::with_initial_balance(name, account_type, initial_balance);
        account.space_id = view.space_id();
        account
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &account,
        )?;

        tracing::info!(account = %account.id, "account created");
        Ok(account)
    }

    /// Find a visible account by name or id prefix
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<Account>> {
        self.storage.accounts.find(identifier, self.storage.view())
    }

    /// Like `find`, but a missing account is an error
    pub fn require(&self, identifier: &str) -> FamfinResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::account_not_found(identifier))
    }

    /// Get a visible account by id
    pub fn get_visible(&self, id: AccountId) -> FamfinResult<Option<Account>> {
        Ok(self
            .storage
            .accounts
            .get(id)?
            .filter(|a| self.storage.view().includes(a.space_id)))
    }

    pub fn list(&self) -> FamfinResult<Vec<Account>> {
        self.storage.accounts.get_visible(self.storage.view())
    }

    pub fn list_with_balances(&self) -> FamfinResult<Vec<AccountSummary>> {
        self.list()?
            .into_iter()
            .map(|account| self.get_summary(account))
            .collect()
    }

    pub fn get_summary(&self, account: Account) -> FamfinResult<AccountSummary> {
        let transactions = self.storage.transactions.get_by_account(account.id)?;
        let balance = account.initial_balance
            + transactions
                .iter()
                .map(|t| t.balance_effect(account.id))
                .sum::<Money>();

        Ok(AccountSummary {
            account,
            balance,
            transaction_count: transactions.len(),
        })
    }

    /// Current balance: the initial balance plus every transaction's effect
    pub fn balance(&self, account_id: AccountId) -> FamfinResult<Money> {
        let account = self
            .storage
            .accounts
            .get(account_id)?
            .ok_or_else(|| FamfinError::account_not_found(account_id.to_string()))?;

        Ok(self.get_summary(account)?.balance)
    }

    /// Sum of the balances of every visible account
    pub fn global_balance(&self) -> FamfinResult<Money> {
        Ok(self
            .list_with_balances()?
            .iter()
            .map(|s| s.balance)
            .sum())
    }

    pub fn rename(&self, id: AccountId, new_name: &str) -> FamfinResult<Account> {
        let mut account = self
            .get_visible(id)?
            .ok_or_else(|| FamfinError::account_not_found(id.to_string()))?;
        let before = account.clone();

        let new_name = new_name.trim();
        if self
            .storage
            .accounts
            .name_exists(new_name, self.storage.view(), Some(id))?
        {
            return Err(FamfinError::Duplicate {
                entity_type: "Account",
                identifier: new_name.to_string(),
            });
        }

        account.rename(new_name);
        account
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_update(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &before,
            &account,
        )?;

        Ok(account)
    }

    /// Delete an account and every transaction touching it
    ///
    /// Returns the number of transactions removed with it.
    pub fn delete(&self, id: AccountId) -> FamfinResult<usize> {
        let account = self
            .get_visible(id)?
            .ok_or_else(|| FamfinError::account_not_found(id.to_string()))?;

        let transactions = self.storage.transactions.get_by_account(id)?;
        for txn in &transactions {
            self.storage.transactions.delete(txn.id)?;
            self.storage.log_delete(
                EntityType::Transaction,
                txn.id,
                Some(txn.description.clone()),
                txn,
            )?;
        }

        self.storage.accounts.delete(id)?;
        self.storage.transactions.save()?;
        self.storage.accounts.save()?;

        self.storage.log_delete(
            EntityType::Account,
            account.id,
            Some(account.name.clone()),
            &account,
        )?;

        tracing::info!(account = %id, removed = transactions.len(), "account deleted");
        Ok(transactions.len())
    }
}
