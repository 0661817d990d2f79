//! Shopping list model
//!
//! Items carry an estimated unit price and, once bought, an actual one.
//! The analysis compares both; archiving a list freezes its analysis.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ShoppingItemId, ShoppingListId};
use super::money::Money;

/// Relative price variance above which an item is called out
const INSIGHT_THRESHOLD: f64 = 0.1;

pub const WELL_MANAGED_INSIGHT: &str = "Your shopping budget was well managed!";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub name: String,
    pub quantity: u32,
    /// Estimated unit price
    pub estimated_price: Money,
    /// Actual unit price paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_price: Option<Money>,
    #[serde(default)]
    pub purchased: bool,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, quantity: u32, estimated_price: Money) -> Self {
        Self {
            id: ShoppingItemId::new(),
            name: name.into(),
            quantity,
            estimated_price,
            actual_price: None,
            purchased: false,
        }
    }

    pub fn estimated_total(&self) -> Money {
        self.estimated_price * self.quantity
    }

    /// What was paid for this line; a missing actual price counts as zero
    pub fn actual_total(&self) -> Money {
        self.actual_price.unwrap_or_default() * self.quantity
    }

    /// `(actual - estimated) / estimated`, `None` without an estimate
    fn variance(&self) -> Option<f64> {
        if self.estimated_price.is_zero() {
            return None;
        }
        let actual = self.actual_price.unwrap_or(self.estimated_price);
        Some((actual - self.estimated_price).ratio_of(self.estimated_price))
    }

    pub fn validate(&self) -> Result<(), ShoppingValidationError> {
        if self.name.trim().is_empty() {
            return Err(ShoppingValidationError::EmptyItemName);
        }
        if self.quantity == 0 {
            return Err(ShoppingValidationError::ZeroQuantity);
        }
        if self.estimated_price.is_negative() || self.actual_price.is_some_and(|p| p.is_negative())
        {
            return Err(ShoppingValidationError::NegativePrice);
        }
        let prices = [Some(self.estimated_price), self.actual_price];
        if prices
            .iter()
            .flatten()
            .any(|price| price.checked_times(self.quantity).is_none())
        {
            return Err(ShoppingValidationError::TotalTooLarge);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    #[default]
    Active,
    Archived,
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Archived => write!(f, "archived"),
        }
    }
}

/// Estimated vs. actual comparison of a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingAnalysis {
    pub total_estimated: Money,
    /// Paid for purchased items
    pub spent: Money,
    pub budget_remaining: Money,
    /// Estimated cost of the purchased items
    pub planned: Money,
    pub difference: Money,
    pub percentage_diff: f64,
    pub insight: String,
}

/// A shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ShoppingListId,

    pub name: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub items: Vec<ShoppingItem>,

    #[serde(default)]
    pub status: ListStatus,

    /// Analysis frozen at archive time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ShoppingAnalysis>,

    #[serde(default)]
    pub expense_created: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_file_name: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ShoppingListId::new(),
            name: name.into(),
            date,
            items: Vec::new(),
            status: ListStatus::Active,
            analysis: None,
            expense_created: false,
            receipt_file_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name given to a list created without one
    pub fn default_name(date: NaiveDate) -> String {
        format!("New list - {}", date.format("%Y-%m-%d"))
    }

    pub fn is_archived(&self) -> bool {
        self.status == ListStatus::Archived
    }

    /// Find an item by id or (case-insensitive) name
    pub fn find_item(&self, identifier: &str) -> Option<&ShoppingItem> {
        let lower = identifier.trim().to_lowercase();
        self.items
            .iter()
            .find(|i| i.id.matches(identifier))
            .or_else(|| self.items.iter().find(|i| i.name.to_lowercase() == lower))
    }

    pub fn item_mut(&mut self, id: ShoppingItemId) -> Option<&mut ShoppingItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Frozen analysis for archived lists, a fresh one otherwise
    pub fn analysis(&self) -> ShoppingAnalysis {
        match (&self.analysis, self.status) {
            (Some(frozen), ListStatus::Archived) => frozen.clone(),
            _ => self.analyze(),
        }
    }

    /// Compare estimated and actual prices of the current items
    pub fn analyze(&self) -> ShoppingAnalysis {
        let total_estimated: Money = self.items.iter().map(|i| i.estimated_total()).sum();

        let purchased: Vec<&ShoppingItem> = self.items.iter().filter(|i| i.purchased).collect();
        let spent: Money = purchased.iter().map(|i| i.actual_total()).sum();
        let planned: Money = purchased.iter().map(|i| i.estimated_total()).sum();
        let difference = spent - planned;
        let percentage_diff = difference.ratio_of(planned) * 100.0;

        let insight = purchased
            .iter()
            .filter_map(|item| item.variance().map(|v| (*item, v)))
            .fold(None, |best: Option<(&ShoppingItem, f64)>, (item, variance)| match best {
                // Ties keep the earlier item
                Some((_, top)) if top.abs() >= variance.abs() => best,
                _ => Some((item, variance)),
            })
            .filter(|(_, variance)| variance.abs() > INSIGHT_THRESHOLD)
            .map(|(item, variance)| {
                format!(
                    "{} cost {}% {} than planned",
                    item.name,
                    (variance.abs() * 100.0).round() as i64,
                    if variance > 0.0 { "more" } else { "less" }
                )
            })
            .unwrap_or_else(|| WELL_MANAGED_INSIGHT.to_string());

        ShoppingAnalysis {
            total_estimated,
            spent,
            budget_remaining: total_estimated - spent,
            planned,
            difference,
            percentage_diff,
            insight,
        }
    }

    /// Freeze the analysis and mark the list archived
    pub fn archive(&mut self, expense_created: bool, receipt_file_name: Option<String>) {
        self.analysis = Some(self.analyze());
        self.status = ListStatus::Archived;
        self.expense_created = expense_created;
        self.receipt_file_name = receipt_file_name;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShoppingValidationError {
    EmptyItemName,
    ZeroQuantity,
    NegativePrice,
    TotalTooLarge,
}

impl fmt::Display for ShoppingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyItemName => write!(f, "Item name cannot be empty"),
            Self::ZeroQuantity => write!(f, "Quantity must be at least 1"),
            Self::NegativePrice => write!(f, "Prices cannot be negative"),
            Self::TotalTooLarge => write!(f, "Price times quantity is too large"),
        }
    }
}

impl std::error::Error for ShoppingValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ShoppingList {
        ShoppingList::new("Weekly", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
    }

    fn item(name: &str, qty: u32, est: i64, actual: Option<i64>) -> ShoppingItem {
        let mut item = ShoppingItem::new(name, qty, Money::from_units(est));
        if let Some(actual) = actual {
            item.actual_price = Some(Money::from_units(actual));
            item.purchased = true;
        }
        item
    }

    #[test]
    fn test_analysis_totals() {
        let mut l = list();
        l.items.push(item("Milk", 2, 10, Some(12)));
        l.items.push(item("Bread", 1, 5, None));

        let a = l.analyze();
        assert_eq!(a.total_estimated, Money::from_units(25));
        assert_eq!(a.spent, Money::from_units(24));
        assert_eq!(a.budget_remaining, Money::from_units(1));
        assert_eq!(a.planned, Money::from_units(20));
        assert_eq!(a.difference, Money::from_units(4));
        assert_eq!(a.percentage_diff, 20.0);
        assert_eq!(a.insight, "Milk cost 20% more than planned");
    }

    #[test]
    fn test_insight_picks_largest_relative_variance() {
        let mut l = list();
        l.items.push(item("Rice", 1, 100, Some(115)));
        l.items.push(item("Eggs", 1, 10, Some(5)));

        assert_eq!(l.analyze().insight, "Eggs cost 50% less than planned");
    }

    #[test]
    fn test_insight_tie_names_first_purchased_item() {
        let mut l = list();
        l.items.push(item("Milk", 1, 10, Some(12)));
        l.items.push(item("Bread", 1, 10, Some(8)));

        assert_eq!(l.analyze().insight, "Milk cost 20% more than planned");
    }

    #[test]
    fn test_small_variance_is_well_managed() {
        let mut l = list();
        l.items.push(item("Rice", 1, 100, Some(105)));
        assert_eq!(l.analyze().insight, WELL_MANAGED_INSIGHT);
    }

    #[test]
    fn test_empty_list_analysis() {
        let a = list().analyze();
        assert_eq!(a.planned, Money::zero());
        assert_eq!(a.percentage_diff, 0.0);
        assert_eq!(a.insight, WELL_MANAGED_INSIGHT);
    }

    #[test]
    fn test_archive_freezes_analysis() {
        let mut l = list();
        l.items.push(item("Milk", 1, 10, Some(10)));
        l.archive(true, Some("receipt.jpg".into()));

        l.items.push(item("Cheese", 1, 10, Some(30)));
        assert!(l.is_archived());
        assert!(l.expense_created);
        assert_eq!(l.analysis().spent, Money::from_units(10));
        assert_eq!(l.analyze().spent, Money::from_units(40));
    }

    #[test]
    fn test_item_validation() {
        assert!(item("Milk", 1, 1, None).validate().is_ok());
        assert_eq!(
            item("Milk", 0, 1, None).validate(),
            Err(ShoppingValidationError::ZeroQuantity)
        );
        assert_eq!(
            item(" ", 1, 1, None).validate(),
            Err(ShoppingValidationError::EmptyItemName)
        );

        let bulk = ShoppingItem::new("Bulk", u32::MAX, Money::from_cents(i64::MAX / 1000));
        assert_eq!(bulk.validate(), Err(ShoppingValidationError::TotalTooLarge));
    }

    #[test]
    fn test_default_name() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(ShoppingList::default_name(date), "New list - 2025-06-01");
    }
}
