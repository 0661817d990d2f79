//! Transaction service
//!
//! Recording, editing and listing transactions in the current view, plus the
//! category lists offered to the user and category suggestions.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::category::{
    DEFAULT_EXPENSE_CATEGORIES, INCOME_CATEGORIES, OTHER, SAVINGS, TRANSFER,
};
use crate::models::{
    AccountId, Frequency, Money, Transaction, TransactionId, TransactionKind,
};
use crate::storage::Storage;

use super::categorize::{resolve_suggestion, CategorySuggester, Suggestion};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive text matched against description and category
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_amount: Option<Money>,
    pub max_amount: Option<Money>,
    pub kind: Option<TransactionKind>,
    /// Source or transfer destination
    pub account_id: Option<AccountId>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Inclusive date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Inclusive amount range
    pub fn amount_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a transaction against every criterion except the limit
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            if !txn.matches_text(search.trim()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if txn.category != *category {
                return false;
            }
        }
        if self.start_date.is_some_and(|start| txn.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| txn.date > end) {
            return false;
        }
        if self.min_amount.is_some_and(|min| txn.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| txn.amount > max) {
            return false;
        }
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if let Some(account) = self.account_id {
            if !txn.touches(account) {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id: AccountId,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: Money,
    /// Required for income and expenses, ignored for transfers
    pub category: Option<String>,
    pub description: String,
    pub frequency: Frequency,
    pub attachment_name: Option<String>,
    pub destination_account_id: Option<AccountId>,
    pub transfer_fee: Option<Money>,
}

impl CreateTransactionInput {
    /// An income or expense with default frequency and no attachment
    pub fn simple(
        account_id: AccountId,
        kind: TransactionKind,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_id,
            kind,
            date,
            amount,
            category: Some(category.into()),
            description: description.into(),
            frequency: Frequency::OneTime,
            attachment_name: None,
            destination_account_id: None,
            transfer_fee: None,
        }
    }
}

/// Fields to change on an existing transaction; `None` keeps the value
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub account_id: Option<AccountId>,
    pub kind: Option<TransactionKind>,
    pub date: Option<NaiveDate>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub attachment_name: Option<String>,
    pub destination_account_id: Option<AccountId>,
    pub transfer_fee: Option<Money>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Check that an account exists and belongs to the current view
    fn require_visible_account(&self, id: AccountId) -> FamfinResult<()> {
        match self.storage.accounts.get(id)? {
            Some(account) if self.storage.view().includes(account.space_id) => Ok(()),
            _ => Err(FamfinError::account_not_found(id.to_string())),
        }
    }

    /// Force the transfer-only fields to be consistent with the kind
    fn normalize(txn: &mut Transaction) {
        txn.description = txn.description.trim().to_string();
        txn.category = txn.category.trim().to_string();
        if txn.is_transfer() {
            txn.category = TRANSFER.to_string();
            txn.transfer_fee.get_or_insert(Money::zero());
        } else {
            txn.destination_account_id = None;
            txn.transfer_fee = None;
        }
    }

    fn validate(&self, txn: &Transaction) -> FamfinResult<()> {
        txn.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.require_visible_account(txn.account_id)?;
        if let Some(dest) = txn.destination_account_id {
            self.require_visible_account(dest)?;
        }
        Ok(())
    }

    /// Validate, store and audit a fully built transaction
    ///
    /// Goal, debt and shopping operations record their linked transactions
    /// through here.
    pub fn record(&self, mut txn: Transaction) -> FamfinResult<Transaction> {
        Self::normalize(&mut txn);
        self.validate(&txn)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id,
            Some(txn.description.clone()),
            &txn,
        )?;

        tracing::debug!(transaction = %txn.id, kind = %txn.kind, "transaction recorded");
        Ok(txn)
    }

    pub fn create(&self, input: CreateTransactionInput) -> FamfinResult<Transaction> {
        let mut txn = Transaction::new(
            input.account_id,
            input.date,
            input.kind,
            input.amount,
            input.category.unwrap_or_default(),
            input.description,
        );
        txn.frequency = input.frequency;
        txn.attachment_name = input.attachment_name.filter(|a| !a.trim().is_empty());
        txn.destination_account_id = input.destination_account_id;
        txn.transfer_fee = input.transfer_fee;

        self.record(txn)
    }

    /// Get a transaction if its account is visible
    pub fn get(&self, id: TransactionId) -> FamfinResult<Option<Transaction>> {
        Ok(self
            .storage
            .transactions
            .get(id)?
            .filter(|t| self.is_visible(t)))
    }

    /// Find a visible transaction by id prefix
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<Transaction>> {
        Ok(self
            .storage
            .transactions
            .find(identifier)?
            .filter(|t| self.is_visible(t)))
    }

    pub fn require(&self, identifier: &str) -> FamfinResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::transaction_not_found(identifier))
    }

    fn is_visible(&self, txn: &Transaction) -> bool {
        matches!(
            self.storage.accounts.get(txn.account_id),
            Ok(Some(account)) if self.storage.view().includes(account.space_id)
        )
    }

    /// Every transaction whose account is visible, newest first
    pub fn visible(&self) -> FamfinResult<Vec<Transaction>> {
        let visible: std::collections::HashSet<AccountId> = self
            .storage
            .accounts
            .get_visible(self.storage.view())?
            .into_iter()
            .map(|a| a.id)
            .collect();

        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| visible.contains(&t.account_id))
            .collect())
    }

    /// Visible transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> FamfinResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .visible()?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Apply a patch; goal and debt links are preserved
    pub fn update(&self, id: TransactionId, patch: UpdateTransactionInput) -> FamfinResult<Transaction> {
        let mut txn = self
            .get(id)?
            .ok_or_else(|| FamfinError::transaction_not_found(id.to_string()))?;
        let before = txn.clone();

        if let Some(account_id) = patch.account_id {
            txn.account_id = account_id;
        }
        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(frequency) = patch.frequency {
            txn.frequency = frequency;
        }
        if let Some(attachment) = patch.attachment_name {
            txn.attachment_name = Some(attachment).filter(|a| !a.trim().is_empty());
        }
        if let Some(dest) = patch.destination_account_id {
            txn.destination_account_id = Some(dest);
        }
        if let Some(fee) = patch.transfer_fee {
            txn.transfer_fee = Some(fee);
        }

        Self::normalize(&mut txn);
        self.validate(&txn)?;
        txn.touch();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id,
            Some(txn.description.clone()),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    pub fn delete(&self, id: TransactionId) -> FamfinResult<Transaction> {
        let txn = self
            .get(id)?
            .ok_or_else(|| FamfinError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id,
            Some(txn.description.clone()),
            &txn,
        )?;

        Ok(txn)
    }

    /// Expense categories: the latest budget plan's lines plus `Savings`
    /// and `Other`, or the defaults when no plan exists
    pub fn expense_categories(&self) -> FamfinResult<Vec<String>> {
        let latest = self
            .storage
            .budgets
            .get_visible(self.storage.view())?
            .into_iter()
            .next();

        let mut categories = match latest {
            Some(plan) => plan.categories(),
            None => {
                return Ok(DEFAULT_EXPENSE_CATEGORIES
                    .iter()
                    .map(|c| c.to_string())
                    .collect())
            }
        };

        for extra in [SAVINGS, OTHER] {
            if !categories.iter().any(|c| c == extra) {
                categories.push(extra.to_string());
            }
        }
        Ok(categories)
    }

    pub fn income_categories(&self) -> Vec<String> {
        INCOME_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    /// Ask a suggester for a category and resolve it against the expense
    /// categories on offer
    pub fn suggest_category(
        &self,
        suggester: &dyn CategorySuggester,
        description: &str,
    ) -> FamfinResult<Suggestion> {
        let description = description.trim();
        if description.is_empty() {
            return Ok(Suggestion::None);
        }

        let available = self.expense_categories()?;
        Ok(resolve_suggestion(suggester.suggest(description), &available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamfinPaths;
    use crate::models::{Account, AccountType, BudgetMethod, BudgetPlan, Month};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn account(storage: &Storage, name: &str) -> AccountId {
        let account = Account::new(name, AccountType::Bank);
        let id = account.id;
        storage.accounts.upsert(account).unwrap();
        id
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn expense(account: AccountId, d: u32, units: i64, category: &str, desc: &str) -> CreateTransactionInput {
        CreateTransactionInput::simple(
            account,
            TransactionKind::Expense,
            day(d),
            Money::from_units(units),
            category,
            desc,
        )
    }

    struct Fixed(&'static str);

    impl CategorySuggester for Fixed {
        fn suggest(&self, _description: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn test_create_validates_input() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let bank = account(&storage, "Bank");

        assert!(service.create(expense(bank, 1, 10, "Food", "Market")).is_ok());
        assert!(service
            .create(expense(bank, 1, 0, "Food", "Market"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(expense(bank, 1, 10, "Food", "  "))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(expense(bank, 1, 10, "", "Market"))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(expense(AccountId::new(), 1, 10, "Food", "Market"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_transfer_forces_category_and_fee() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let bank = account(&storage, "Bank");
        let cash = account(&storage, "Cash");

        let mut input = expense(bank, 2, 100, "Food", "ATM");
        input.kind = TransactionKind::Transfer;
        input.destination_account_id = Some(cash);

        let txn = service.create(input.clone()).unwrap();
        assert_eq!(txn.category, TRANSFER);
        assert_eq!(txn.transfer_fee, Some(Money::zero()));

        input.destination_account_id = Some(bank);
        assert!(service.create(input.clone()).unwrap_err().is_validation());

        input.destination_account_id = None;
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let bank = account(&storage, "Bank");

        service.create(expense(bank, 1, 10, "Food", "Market")).unwrap();
        service.create(expense(bank, 5, 50, "Transport", "Taxi")).unwrap();
        service.create(expense(bank, 9, 90, "Food", "Restaurant")).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].description, "Restaurant");

        let food = service.list(&TransactionFilter::new().category("Food")).unwrap();
        assert_eq!(food.len(), 2);

        let search = service.list(&TransactionFilter::new().search("TAXI")).unwrap();
        assert_eq!(search.len(), 1);

        let range = service
            .list(&TransactionFilter::new().date_range(day(1), day(5)))
            .unwrap();
        assert_eq!(range.len(), 2);

        let amounts = service
            .list(&TransactionFilter::new().amount_range(Some(Money::from_units(50)), Some(Money::from_units(90))))
            .unwrap();
        assert_eq!(amounts.len(), 2);

        let limited = service.list(&TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_update_preserves_links_and_clears_transfer_fields() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let bank = account(&storage, "Bank");
        let cash = account(&storage, "Cash");

        let mut input = expense(bank, 2, 100, "Food", "Move");
        input.kind = TransactionKind::Transfer;
        input.destination_account_id = Some(cash);
        let mut txn = service.create(input).unwrap();

        let goal = crate::models::GoalId::new();
        txn.goal_id = Some(goal);
        storage.transactions.upsert(txn.clone()).unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Expense),
                    category: Some("Food".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.goal_id, Some(goal));
        assert!(updated.destination_account_id.is_none());
        assert!(updated.transfer_fee.is_none());
        assert_eq!(updated.category, "Food");
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let bank = account(&storage, "Bank");

        let txn = service.create(expense(bank, 1, 10, "Food", "Market")).unwrap();
        service.delete(txn.id).unwrap();
        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_expense_categories_follow_latest_plan() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        assert_eq!(
            service.expense_categories().unwrap(),
            vec!["Food", "Transport", "Housing", "Leisure", "Savings", "Other"]
        );

        storage
            .budgets
            .upsert(BudgetPlan::generate(
                Money::from_units(1000),
                BudgetMethod::Balanced,
                Month::new(2025, 3).unwrap(),
            ))
            .unwrap();

        let categories = service.expense_categories().unwrap();
        assert_eq!(categories[0], "Rent / Mortgage");
        assert!(categories.contains(&"Groceries".to_string()));
        assert_eq!(&categories[categories.len() - 2..], &["Savings", "Other"]);
    }

    #[test]
    fn test_suggest_category() {
        let (_temp, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        assert_eq!(
            service.suggest_category(&Fixed("food"), "Market").unwrap(),
            Suggestion::Available("Food".into())
        );
        assert_eq!(
            service.suggest_category(&Fixed("Health"), "Pharmacy").unwrap(),
            Suggestion::Unavailable("Health".into())
        );
        assert_eq!(
            service.suggest_category(&Fixed("Food"), "  ").unwrap(),
            Suggestion::None
        );
    }
}
