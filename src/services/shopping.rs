//! Shopping service
//!
//! Shopping lists and their items. Only active lists can be edited;
//! archiving freezes the analysis and can record the amount spent as an
//! expense.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::category::GROCERIES;
use crate::models::{
    AccountId, Money, ShoppingAnalysis, ShoppingItem, ShoppingItemId, ShoppingList,
    ShoppingListId, Transaction, TransactionKind,
};
use crate::storage::Storage;

use super::account::AccountService;
use super::transaction::TransactionService;

/// Description of the expense recorded for an unnamed list
const UNNAMED_LIST_EXPENSE: &str = "Shopping list";

pub struct ShoppingService<'a> {
    storage: &'a Storage,
}

/// Changes to one item; `None` keeps the value
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub quantity: Option<u32>,
    pub estimated_price: Option<Money>,
    pub actual_price: Option<Money>,
    pub purchased: Option<bool>,
}

/// How an archived list was settled
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub list: ShoppingList,
    pub expense: Option<Transaction>,
}

impl<'a> ShoppingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: Option<&str>, today: NaiveDate) -> FamfinResult<ShoppingList> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| ShoppingList::default_name(today));

        let list = ShoppingList::new(name, today);
        self.storage.shopping.upsert(list.clone())?;
        self.storage.shopping.save()?;

        self.storage.log_create(
            EntityType::ShoppingList,
            list.id,
            Some(list.name.clone()),
            &list,
        )?;

        Ok(list)
    }

    pub fn find(&self, identifier: &str) -> FamfinResult<Option<ShoppingList>> {
        self.storage.shopping.find(identifier, self.storage.view())
    }

    pub fn require(&self, identifier: &str) -> FamfinResult<ShoppingList> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::shopping_list_not_found(identifier))
    }

    /// Active lists first, then by date, newest first
    pub fn list(&self) -> FamfinResult<Vec<ShoppingList>> {
        self.storage.shopping.get_visible(self.storage.view())
    }

    fn get(&self, id: ShoppingListId) -> FamfinResult<ShoppingList> {
        self.storage
            .shopping
            .get(id)?
            .ok_or_else(|| FamfinError::shopping_list_not_found(id.to_string()))
    }

    /// Load an active list for editing
    fn get_active(&self, id: ShoppingListId) -> FamfinResult<ShoppingList> {
        let list = self.get(id)?;
        if list.is_archived() {
            return Err(FamfinError::Archived(list.name));
        }
        Ok(list)
    }

    fn save_update(&self, before: &ShoppingList, list: &mut ShoppingList) -> FamfinResult<()> {
        list.touch();
        self.storage.shopping.upsert(list.clone())?;
        self.storage.shopping.save()?;
        self.storage.log_update(
            EntityType::ShoppingList,
            list.id,
            Some(list.name.clone()),
            before,
            list,
        )
    }

    fn item_not_found(id: ShoppingItemId) -> FamfinError {
        FamfinError::NotFound {
            entity_type: "Shopping item",
            identifier: id.to_string(),
        }
    }

    pub fn add_item(
        &self,
        id: ShoppingListId,
        name: &str,
        quantity: u32,
        estimated_price: Money,
    ) -> FamfinResult<(ShoppingList, ShoppingItemId)> {
        let mut list = self.get_active(id)?;
        let before = list.clone();

        let item = ShoppingItem::new(name.trim(), quantity, estimated_price);
        item.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;
        let item_id = item.id;
        list.items.push(item);

        self.save_update(&before, &mut list)?;
        Ok((list, item_id))
    }

    pub fn remove_item(&self, id: ShoppingListId, item_id: ShoppingItemId) -> FamfinResult<ShoppingList> {
        let mut list = self.get_active(id)?;
        let before = list.clone();

        let position = list
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| Self::item_not_found(item_id))?;
        list.items.remove(position);

        self.save_update(&before, &mut list)?;
        Ok(list)
    }

    pub fn update_item(
        &self,
        id: ShoppingListId,
        item_id: ShoppingItemId,
        update: ItemUpdate,
    ) -> FamfinResult<ShoppingList> {
        let mut list = self.get_active(id)?;
        let before = list.clone();

        let item = list
            .item_mut(item_id)
            .ok_or_else(|| Self::item_not_found(item_id))?;
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = update.estimated_price {
            item.estimated_price = price;
        }
        if let Some(price) = update.actual_price {
            item.actual_price = Some(price);
        }
        if let Some(purchased) = update.purchased {
            item.purchased = purchased;
        }
        item.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.save_update(&before, &mut list)?;
        Ok(list)
    }

    /// Tick an item off; without an actual price the estimate is assumed
    /// unless one was already recorded
    pub fn mark_purchased(
        &self,
        id: ShoppingListId,
        item_id: ShoppingItemId,
        actual_price: Option<Money>,
    ) -> FamfinResult<ShoppingList> {
        let list = self.get_active(id)?;
        let item = list
            .items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| Self::item_not_found(item_id))?;

        let actual_price = actual_price
            .or(item.actual_price)
            .unwrap_or(item.estimated_price);

        self.update_item(
            id,
            item_id,
            ItemUpdate {
                actual_price: Some(actual_price),
                purchased: Some(true),
                ..Default::default()
            },
        )
    }

    /// Current analysis, or the frozen one for an archived list
    pub fn analyze(&self, id: ShoppingListId) -> FamfinResult<ShoppingAnalysis> {
        Ok(self.get(id)?.analysis())
    }

    /// Archive a list, optionally recording what was spent as a `Food`
    /// expense on `account_id` (or the first visible account)
    pub fn archive(
        &self,
        id: ShoppingListId,
        record_expense: bool,
        account_id: Option<AccountId>,
        receipt_file_name: Option<String>,
        today: NaiveDate,
    ) -> FamfinResult<ArchiveOutcome> {
        let mut list = self.get_active(id)?;
        let before = list.clone();

        let expense = if record_expense {
            let account_id = match account_id {
                Some(account_id) => account_id,
                None => AccountService::new(self.storage)
                    .list()?
                    .first()
                    .map(|a| a.id)
                    .ok_or_else(|| {
                        FamfinError::Validation(
                            "Create an account before recording an expense".into(),
                        )
                    })?,
            };

            let description = if list.name.trim().is_empty() {
                UNNAMED_LIST_EXPENSE.to_string()
            } else {
                list.name.clone()
            };
            let txn = Transaction::new(
                account_id,
                today,
                TransactionKind::Expense,
                list.analyze().spent,
                GROCERIES,
                description,
            );
            Some(TransactionService::new(self.storage).record(txn)?)
        } else {
            None
        };

        let receipt = receipt_file_name.filter(|r| !r.trim().is_empty());
        list.archive(expense.is_some(), receipt);
        self.save_update(&before, &mut list)?;

        tracing::info!(list = %list.id, expense = expense.is_some(), "shopping list archived");
        Ok(ArchiveOutcome { list, expense })
    }

    pub fn delete(&self, id: ShoppingListId) -> FamfinResult<ShoppingList> {
        let list = self
            .storage
            .shopping
            .delete(id)?
            .ok_or_else(|| FamfinError::shopping_list_not_found(id.to_string()))?;
        self.storage.shopping.save()?;

        self.storage.log_delete(
            EntityType::ShoppingList,
            list.id,
            Some(list.name.clone()),
            &list,
        )?;

        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamfinPaths;
    use crate::models::{Account, AccountType, WELL_MANAGED_INSIGHT};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 7).unwrap()
    }

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_create_default_name() {
        let (_temp, storage) = create_test_storage();
        let service = ShoppingService::new(&storage);

        let list = service.create(None, today()).unwrap();
        assert_eq!(list.name, "New list - 2025-06-07");
        let named = service.create(Some("Weekend"), today()).unwrap();
        assert_eq!(named.name, "Weekend");
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_item_editing_and_analysis() {
        let (_temp, storage) = create_test_storage();
        let service = ShoppingService::new(&storage);
        let list = service.create(Some("Groceries"), today()).unwrap();

        let (_, milk) = service.add_item(list.id, "Milk", 2, cents(150)).unwrap();
        let (_, bread) = service.add_item(list.id, "Bread", 1, cents(200)).unwrap();

        service.mark_purchased(list.id, milk, Some(cents(180))).unwrap();
        service.mark_purchased(list.id, bread, None).unwrap();

        let analysis = service.analyze(list.id).unwrap();
        assert_eq!(analysis.total_estimated, cents(500));
        assert_eq!(analysis.planned, cents(500));
        assert_eq!(analysis.spent, cents(560));
        assert_eq!(analysis.insight, "Milk cost 20% more than planned");

        let list = service.remove_item(list.id, bread).unwrap();
        assert_eq!(list.items.len(), 1);
    }

    #[test]
    fn test_invalid_items_are_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = ShoppingService::new(&storage);
        let list = service.create(None, today()).unwrap();

        assert!(service
            .add_item(list.id, "Eggs", 0, cents(100))
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_item(list.id, " ", 1, cents(100))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_archive_with_expense() {
        let (_temp, storage) = create_test_storage();
        let account = Account::new("Wallet", AccountType::Cash);
        let account_id = account.id;
        storage.accounts.upsert(account).unwrap();

        let service = ShoppingService::new(&storage);
        let list = service.create(Some("Market"), today()).unwrap();
        let (_, item) = service.add_item(list.id, "Rice", 1, cents(1000)).unwrap();
        service.mark_purchased(list.id, item, None).unwrap();

        let outcome = service.archive(list.id, true, None, None, today()).unwrap();
        let expense = outcome.expense.unwrap();
        assert_eq!(expense.account_id, account_id);
        assert_eq!(expense.category, GROCERIES);
        assert_eq!(expense.description, "Market");
        assert_eq!(expense.amount, cents(1000));
        assert!(outcome.list.expense_created);
        assert_eq!(outcome.list.analysis().insight, WELL_MANAGED_INSIGHT);

        assert!(matches!(
            service.add_item(list.id, "Beans", 1, cents(100)),
            Err(FamfinError::Archived(_))
        ));
    }

    #[test]
    fn test_archive_expense_needs_an_account() {
        let (_temp, storage) = create_test_storage();
        let service = ShoppingService::new(&storage);
        let list = service.create(None, today()).unwrap();

        let err = service.archive(list.id, true, None, None, today()).unwrap_err();
        assert!(err.is_validation());
        assert!(!service.require(&list.name).unwrap().is_archived());
    }

    #[test]
    fn test_archive_without_expense() {
        let (_temp, storage) = create_test_storage();
        let service = ShoppingService::new(&storage);
        let list = service.create(None, today()).unwrap();

        let outcome = service
            .archive(list.id, false, None, Some("receipt.jpg".into()), today())
            .unwrap();
        assert!(outcome.expense.is_none());
        assert!(outcome.list.is_archived());
        assert_eq!(outcome.list.receipt_file_name.as_deref(), Some("receipt.jpg"));
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }
}
