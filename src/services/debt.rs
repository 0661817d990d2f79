//! Debt service
//!
//! Debts and credits in the current view. Each repayment is mirrored by a
//! transaction on the chosen account: an expense for a debt, an income for
//! a credit.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::category::{CREDIT_COLLECTION, DEBT_REPAYMENT};
use crate::models::{
    AccountId, DebtCreditItem, DebtId, DebtKind, Money, Transaction, TransactionKind,
};
use crate::storage::Storage;

use super::transaction::TransactionService;

pub struct DebtService<'a> {
    storage: &'a Storage,
}

impl<'a> DebtService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an item; `initial_paid` is what was settled before tracking
    /// started and becomes the first contribution, without a transaction
    pub fn create(
        &self,
        name: &str,
        kind: DebtKind,
        total: Money,
        initial_paid: Option<Money>,
        today: NaiveDate,
    ) -> FamfinResult<DebtCreditItem> {
        let mut item = DebtCreditItem::new(name.trim(), kind, total);
        item.space_id = self.storage.view().space_id();
        item.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;
        if let Some(paid) = initial_paid {
            item.set_initial_paid(today, paid)
                .map_err(|e| FamfinError::Validation(e.to_string()))?;
        }

        self.storage.debts.upsert(item.clone())?;
        self.storage.debts.save()?;

        self.storage
            .log_create(EntityType::DebtCredit, item.id, Some(item.name.clone()), &item)?;

        Ok(item)
    }

    pub fn find(&self, identifier: &str) -> FamfinResult<Option<DebtCreditItem>> {
        self.storage.debts.find(identifier, self.storage.view())
    }

    pub fn require(&self, identifier: &str) -> FamfinResult<DebtCreditItem> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::debt_not_found(identifier))
    }

    /// Items of the current view, optionally of one kind
    pub fn list(&self, kind: Option<DebtKind>) -> FamfinResult<Vec<DebtCreditItem>> {
        let mut items = self.storage.debts.get_visible(self.storage.view())?;
        if let Some(kind) = kind {
            items.retain(|i| i.kind == kind);
        }
        Ok(items)
    }

    fn get_visible(&self, id: DebtId) -> FamfinResult<DebtCreditItem> {
        self.storage
            .debts
            .get(id)?
            .filter(|i| self.storage.view().includes(i.space_id))
            .ok_or_else(|| FamfinError::debt_not_found(id.to_string()))
    }

    /// Record a repayment and its linked transaction on `account_id`
    pub fn repay(
        &self,
        id: DebtId,
        amount: Money,
        account_id: AccountId,
        date: NaiveDate,
    ) -> FamfinResult<DebtCreditItem> {
        let mut item = self.get_visible(id)?;
        let before = item.clone();

        item.repay(date, amount)
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        let (kind, category, description) = match item.kind {
            DebtKind::Debt => (
                TransactionKind::Expense,
                DEBT_REPAYMENT,
                format!("Repayment: {}", item.name),
            ),
            DebtKind::Credit => (
                TransactionKind::Income,
                CREDIT_COLLECTION,
                format!("Collection: {}", item.name),
            ),
        };
        let mut txn = Transaction::new(account_id, date, kind, amount, category, description);
        txn.debt_id = Some(item.id);
        TransactionService::new(self.storage).record(txn)?;

        self.storage.debts.upsert(item.clone())?;
        self.storage.debts.save()?;

        self.storage.log_update(
            EntityType::DebtCredit,
            item.id,
            Some(item.name.clone()),
            &before,
            &item,
        )?;

        if item.is_settled() {
            tracing::info!(debt = %item.id, kind = %item.kind, "settled");
        }
        Ok(item)
    }

    /// Delete an item; its repayment transactions are kept
    pub fn delete(&self, id: DebtId) -> FamfinResult<DebtCreditItem> {
        let item = self.get_visible(id)?;
        self.storage.debts.delete(id)?;
        self.storage.debts.save()?;

        self.storage
            .log_delete(EntityType::DebtCredit, item.id, Some(item.name.clone()), &item)?;

        Ok(item)
    }
}
