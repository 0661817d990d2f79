//! Monthly Summary
//!
//! Income, expenses and the spending breakdown of one month in the current
//! view, together with the global balance.

use std::collections::HashMap;

use chrono::Datelike;

use crate::error::FamfinResult;
use crate::models::{Money, Month, Transaction, TransactionKind};
use crate::services::{AccountService, TransactionService};
use crate::storage::Storage;

/// Spending on one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Money,
}

/// Expenses recorded on one day of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyExpense {
    pub day: u32,
    pub amount: Money,
}

/// Monthly Summary
#[derive(Debug, Clone)]
pub struct MonthlySummary {
    pub month: Month,
    pub income: Money,
    /// Expense amounts plus transfer fees
    pub expenses: Money,
    /// Expenses per exact category, largest first
    pub by_category: Vec<CategoryAmount>,
    /// One entry per day of the month, expenses only
    pub daily: Vec<DailyExpense>,
    /// Sum of every visible account balance, whatever the month
    pub global_balance: Money,
}

impl MonthlySummary {
    /// Generate the summary of `month` for the current view
    pub fn generate(storage: &Storage, month: Month) -> FamfinResult<Self> {
        let transactions = TransactionService::new(storage).visible()?;
        let global_balance = AccountService::new(storage).global_balance()?;

        Ok(Self::from_transactions(month, &transactions, global_balance))
    }

    /// Build the summary from an already loaded transaction list
    pub fn from_transactions(
        month: Month,
        transactions: &[Transaction],
        global_balance: Money,
    ) -> Self {
        let in_month: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .collect();

        let income: Money = in_month
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let expenses: Money = in_month.iter().map(|t| t.spending()).sum();

        let mut per_category: HashMap<&str, Money> = HashMap::new();
        let mut daily: Vec<DailyExpense> = (1..=month.days())
            .map(|day| DailyExpense {
                day,
                amount: Money::zero(),
            })
            .collect();

        for txn in in_month.iter().filter(|t| t.is_expense()) {
            *per_category.entry(txn.category.as_str()).or_default() += txn.amount;

            let index = txn.date.day() as usize - 1;
            if let Some(entry) = daily.get_mut(index) {
                entry.amount += txn.amount;
            }
        }

        let mut by_category: Vec<CategoryAmount> = per_category
            .into_iter()
            .map(|(category, amount)| CategoryAmount {
                category: category.to_string(),
                amount,
            })
            .collect();
        by_category.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));

        Self {
            month,
            income,
            expenses,
            by_category,
            daily,
            global_balance,
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary for {}\n", self.month.label()));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Income:",
            self.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Expenses:",
            self.expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Net:",
            self.net().format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Global balance:",
            self.global_balance.format_with_symbol(currency)
        ));

        if !self.by_category.is_empty() {
            output.push_str("\nExpenses by category\n");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for row in &self.by_category {
                output.push_str(&format!(
                    "  {:<28} {:>20}\n",
                    row.category,
                    row.amount.format_with_symbol(currency)
                ));
            }
        }

        let active_days: Vec<&DailyExpense> =
            self.daily.iter().filter(|d| !d.amount.is_zero()).collect();
        if !active_days.is_empty() {
            output.push_str("\nDaily expenses\n");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for day in active_days {
                output.push_str(&format!(
                    "  {:>2} {:>45}\n",
                    day.day,
                    day.amount.format_with_symbol(currency)
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use chrono::NaiveDate;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn txn(kind: TransactionKind, day: u32, units: i64, category: &str) -> Transaction {
        Transaction::new(
            AccountId::new(),
            date(2, day),
            kind,
            Money::from_units(units),
            category,
            "test",
        )
    }

    #[test]
    fn test_totals_include_transfer_fees() {
        let transfer = Transaction::transfer(
            AccountId::new(),
            AccountId::new(),
            date(2, 3),
            Money::from_units(500),
            Money::from_units(5),
            "Move",
        );
        let transactions = vec![
            txn(TransactionKind::Income, 1, 1000, "Salary"),
            txn(TransactionKind::Expense, 2, 100, "Food"),
            transfer,
        ];

        let summary = MonthlySummary::from_transactions(
            Month::new(2025, 2).unwrap(),
            &transactions,
            Money::zero(),
        );

        assert_eq!(summary.income, Money::from_units(1000));
        assert_eq!(summary.expenses, Money::from_units(105));
        assert_eq!(summary.net(), Money::from_units(895));
        assert_eq!(summary.by_category.len(), 1);
    }

    #[test]
    fn test_categories_sorted_and_daily_series() {
        let mut transactions = vec![
            txn(TransactionKind::Expense, 2, 100, "Food"),
            txn(TransactionKind::Expense, 2, 50, "Transport"),
            txn(TransactionKind::Expense, 28, 80, "Food"),
        ];
        let mut outside = txn(TransactionKind::Expense, 1, 999, "Food");
        outside.date = date(3, 1);
        transactions.push(outside);

        let summary = MonthlySummary::from_transactions(
            Month::new(2025, 2).unwrap(),
            &transactions,
            Money::zero(),
        );

        assert_eq!(summary.by_category[0].category, "Food");
        assert_eq!(summary.by_category[0].amount, Money::from_units(180));
        assert_eq!(summary.daily.len(), 28);
        assert_eq!(summary.daily[1].amount, Money::from_units(150));
        assert_eq!(summary.daily[27].amount, Money::from_units(80));
        assert!(summary.daily[0].amount.is_zero());
    }
}
