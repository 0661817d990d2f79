//! Category Report
//!
//! Spending of one month grouped by the first word of each category, with
//! transfer fees in their own group. The largest three groups are kept and
//! the rest are folded into "Others".

use std::collections::HashMap;

use crate::error::FamfinResult;
use crate::models::category::TRANSFER_FEES;
use crate::models::{Money, Month, Transaction, TransactionKind};
use crate::services::TransactionService;
use crate::storage::Storage;

/// Number of groups shown before folding into "Others"
const TOP_GROUPS: usize = 3;

pub const OTHERS: &str = "Others";

/// One slice of the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub name: String,
    pub amount: Money,
    /// Share of the month's expenses, 0-100
    pub percent: f64,
}

/// Category Report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub month: Month,
    pub income: Money,
    pub expenses: Money,
    pub shares: Vec<CategoryShare>,
}

/// Grouping key: the first word of the category
fn group_of(category: &str) -> &str {
    category.split_whitespace().next().unwrap_or(category)
}

impl CategoryReport {
    /// Generate the report of `month` for the current view
    pub fn generate(storage: &Storage, month: Month) -> FamfinResult<Self> {
        let transactions = TransactionService::new(storage).visible()?;
        Ok(Self::from_transactions(month, &transactions))
    }

    pub fn from_transactions(month: Month, transactions: &[Transaction]) -> Self {
        let mut income = Money::zero();
        let mut groups: HashMap<String, Money> = HashMap::new();

        for txn in transactions.iter().filter(|t| month.contains(t.date)) {
            match txn.kind {
                TransactionKind::Income => income += txn.amount,
                TransactionKind::Expense => {
                    *groups.entry(group_of(&txn.category).to_string()).or_default() +=
                        txn.amount;
                }
                TransactionKind::Transfer => {
                    if txn.fee().is_positive() {
                        *groups.entry(TRANSFER_FEES.to_string()).or_default() += txn.fee();
                    }
                }
            }
        }

        let expenses: Money = groups.values().copied().sum();

        let mut sorted: Vec<(String, Money)> = groups.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let others: Money = sorted.iter().skip(TOP_GROUPS).map(|(_, amount)| *amount).sum();
        sorted.truncate(TOP_GROUPS);
        if others.is_positive() {
            sorted.push((OTHERS.to_string(), others));
        }

        let shares = sorted
            .into_iter()
            .filter(|(_, amount)| amount.is_positive())
            .map(|(name, amount)| CategoryShare {
                percent: amount.ratio_of(expenses) * 100.0,
                name,
                amount,
            })
            .collect();

        Self {
            month,
            income,
            expenses,
            shares,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Report for {}\n", self.month.label()));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Total income:",
            self.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Total expenses:",
            (-self.expenses).format_with_symbol(currency)
        ));

        if self.shares.is_empty() {
            output.push_str("\nNo expenses this month.\n");
            return output;
        }

        output.push_str("\nExpense breakdown\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        for share in &self.shares {
            output.push_str(&format!(
                "  {:<22} {:>16} {:>6.0}%\n",
                share.name,
                share.amount.format_with_symbol(currency),
                share.percent
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str) -> Transaction {
        Transaction::new(
            AccountId::new(),
            NaiveDate::from_ymd_opt(2025, 7, 10).unwrap(),
            TransactionKind::Expense,
            Money::from_units(units),
            category,
            "test",
        )
    }

    fn july() -> Month {
        Month::new(2025, 7).unwrap()
    }

    #[test]
    fn test_groups_by_first_word() {
        let transactions = vec![
            expense(100, "Rent / Mortgage"),
            expense(50, "Rent deposit"),
            expense(30, "Food"),
        ];

        let report = CategoryReport::from_transactions(july(), &transactions);
        assert_eq!(report.shares[0].name, "Rent");
        assert_eq!(report.shares[0].amount, Money::from_units(150));
        assert_eq!(report.expenses, Money::from_units(180));
    }

    #[test]
    fn test_top_three_plus_others() {
        let transport = Transaction::transfer(
            AccountId::new(),
            AccountId::new(),
            NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            Money::from_units(1000),
            Money::from_units(20),
            "Move",
        );
        let transactions = vec![
            expense(400, "Housing"),
            expense(300, "Food"),
            expense(200, "Transport"),
            expense(60, "Leisure"),
            expense(20, "Health"),
            transport,
        ];

        let report = CategoryReport::from_transactions(july(), &transactions);
        let names: Vec<&str> = report.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Housing", "Food", "Transport", OTHERS]);
        assert_eq!(report.shares[3].amount, Money::from_units(100));
        assert_eq!(report.expenses, Money::from_units(1000));
        assert!((report.shares[0].percent - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_transfer_fees_group() {
        let transfer = Transaction::transfer(
            AccountId::new(),
            AccountId::new(),
            NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            Money::from_units(1000),
            Money::from_units(10),
            "Move",
        );

        let report = CategoryReport::from_transactions(july(), &[transfer]);
        assert_eq!(report.shares.len(), 1);
        assert_eq!(report.shares[0].name, TRANSFER_FEES);
        assert!((report.shares[0].percent - 100.0).abs() < 1e-9);
    }
}
