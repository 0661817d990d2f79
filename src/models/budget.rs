//! Budget plan model
//!
//! A budget plan spreads one month of income across sections of category
//! lines. Plans are generated from a template, either pre-filled with a
//! percentage method (50/30/20, 50/25/25) or left at zero for manual entry.
//! The amount spent on each line is derived from transactions and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::{BudgetLineId, BudgetPlanId, SpaceId};
use super::money::Money;
use super::period::Month;
use super::transaction::Transaction;

/// How income is split across the template sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BudgetMethod {
    /// 50% essentials, 30% personal, 20% savings
    #[default]
    #[serde(rename = "50/30/20")]
    Balanced,
    /// 50% essentials, 25% personal, 25% savings
    #[serde(rename = "50/25/25")]
    SavingsFocus,
    /// Every line starts at zero
    #[serde(rename = "zero")]
    ZeroBased,
}

impl BudgetMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "50/30/20" | "balanced" => Some(Self::Balanced),
            "50/25/25" | "savings" | "savings-focus" => Some(Self::SavingsFocus),
            "zero" | "zero-based" | "manual" => Some(Self::ZeroBased),
            _ => None,
        }
    }

    /// Share of income given to each template section, in section order
    fn section_shares(&self) -> Option<[f64; 3]> {
        match self {
            Self::Balanced => Some([0.5, 0.3, 0.2]),
            Self::SavingsFocus => Some([0.5, 0.25, 0.25]),
            Self::ZeroBased => None,
        }
    }
}

impl fmt::Display for BudgetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balanced => write!(f, "50/30/20"),
            Self::SavingsFocus => write!(f, "50/25/25"),
            Self::ZeroBased => write!(f, "zero"),
        }
    }
}

struct TemplateLine {
    category: &'static str,
    notes: &'static str,
    /// Share of the section amount pre-filled by percentage methods
    weight: f64,
}

struct TemplateSection {
    title: &'static str,
    lines: &'static [TemplateLine],
}

const fn line(category: &'static str, notes: &'static str, weight: f64) -> TemplateLine {
    TemplateLine {
        category,
        notes,
        weight,
    }
}

const TEMPLATE: [TemplateSection; 3] = [
    TemplateSection {
        title: "Essential expenses",
        lines: &[
            line("Rent / Mortgage", "", 0.5),
            line("Electricity", "", 0.0),
            line("Water", "", 0.0),
            line("Internet / Phone", "", 0.0),
            line("Groceries", "", 0.3),
            line("Transport", "(Fuel, pass, etc.)", 0.2),
            line("Insurance", "(Car, health, home, etc.)", 0.0),
        ],
    },
    TemplateSection {
        title: "Personal expenses",
        lines: &[
            line("Dining out", "", 0.4),
            line("Shopping / Clothing", "", 0.3),
            line("Leisure / Hobbies", "(Cinema, sport, music, etc.)", 0.3),
            line("Subscriptions", "(Streaming, gym, etc.)", 0.0),
            line("Travel", "", 0.0),
        ],
    },
    TemplateSection {
        title: "Savings & Investments",
        lines: &[
            line("Emergency fund", "", 1.0),
            line("Investments", "(Stocks, crypto)", 0.0),
            line("Debt repayment", "(Excluding mortgage)", 0.0),
            line("Project savings", "(Travel, car purchase)", 0.0),
        ],
    },
];

/// One category allocation inside a section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: BudgetLineId,
    pub category: String,
    pub allocated: Money,
    #[serde(default)]
    pub notes: String,
}

impl BudgetLine {
    pub fn new(category: impl Into<String>, allocated: Money) -> Self {
        Self {
            id: BudgetLineId::new(),
            category: category.into(),
            allocated,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSection {
    pub title: String,
    pub lines: Vec<BudgetLine>,
}

/// Allocation vs. spending totals of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetTotals {
    pub income: Money,
    pub allocated: Money,
    pub spent: Money,
}

impl BudgetTotals {
    /// Income not yet assigned to a line (negative when over-allocated)
    pub fn unallocated(&self) -> Money {
        self.income - self.allocated
    }

    pub fn status(&self) -> AllocationStatus {
        let unallocated = self.unallocated();
        if unallocated.is_zero() {
            AllocationStatus::Balanced
        } else if unallocated.is_positive() {
            AllocationStatus::LeftToAssign(unallocated)
        } else {
            AllocationStatus::OverAllocated(unallocated.abs())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Balanced,
    LeftToAssign(Money),
    OverAllocated(Money),
}

/// A monthly budget plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub id: BudgetPlanId,

    pub month: Month,

    /// Display label, e.g. "Budget for March 2025"
    pub label: String,

    pub income: Money,

    pub method: BudgetMethod,

    pub sections: Vec<BudgetSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<SpaceId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetPlan {
    /// Build a plan from the template, pre-filling lines for percentage methods
    pub fn generate(income: Money, method: BudgetMethod, month: Month) -> Self {
        let shares = method.section_shares();

        let sections = TEMPLATE
            .iter()
            .enumerate()
            .map(|(index, section)| {
                let section_amount = shares
                    .map(|s| income.percent_of(s[index]))
                    .unwrap_or_default();

                BudgetSection {
                    title: section.title.to_string(),
                    lines: section
                        .lines
                        .iter()
                        .map(|tpl| {
                            let mut line = BudgetLine::new(
                                tpl.category,
                                section_amount.percent_of(tpl.weight),
                            );
                            line.notes = tpl.notes.to_string();
                            line
                        })
                        .collect(),
                }
            })
            .collect();

        let now = Utc::now();
        Self {
            id: BudgetPlanId::new(),
            label: format!("Budget for {}", month.label()),
            month,
            income,
            method,
            sections,
            space_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &BudgetLine> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }

    pub fn line_mut(&mut self, id: BudgetLineId) -> Option<&mut BudgetLine> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.lines.iter_mut())
            .find(|l| l.id == id)
    }

    /// Find a line by id or (case-insensitive) category name
    pub fn find_line(&self, identifier: &str) -> Option<&BudgetLine> {
        let lower = identifier.trim().to_lowercase();
        self.lines()
            .find(|l| l.id.matches(identifier))
            .or_else(|| self.lines().find(|l| l.category.to_lowercase() == lower))
    }

    /// Remove a line from whichever section holds it
    pub fn remove_line(&mut self, id: BudgetLineId) -> Option<BudgetLine> {
        for section in &mut self.sections {
            if let Some(pos) = section.lines.iter().position(|l| l.id == id) {
                self.updated_at = Utc::now();
                return Some(section.lines.remove(pos));
            }
        }
        None
    }

    /// Categories of every line, deduplicated, in plan order
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for line in self.lines() {
            if !seen.contains(&line.category) {
                seen.push(line.category.clone());
            }
        }
        seen
    }

    /// Match expense transactions of the plan's month onto lines
    ///
    /// Each expense goes to the first line (in section order) whose category
    /// equals the transaction category; unmatched expenses are ignored.
    pub fn spent_by_line<'a, I>(&self, transactions: I) -> HashMap<BudgetLineId, Money>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut spent: HashMap<BudgetLineId, Money> = HashMap::new();

        for txn in transactions {
            if !txn.is_expense() || !self.month.contains(txn.date) {
                continue;
            }
            if let Some(line) = self.lines().find(|l| l.category == txn.category) {
                *spent.entry(line.id).or_default() += txn.amount;
            }
        }

        spent
    }

    pub fn totals(&self, spent: &HashMap<BudgetLineId, Money>) -> BudgetTotals {
        BudgetTotals {
            income: self.income,
            allocated: self.lines().map(|l| l.allocated).sum(),
            spent: spent.values().sum(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, TransactionKind};
    use chrono::NaiveDate;

    fn march() -> Month {
        Month::new(2025, 3).unwrap()
    }

    fn allocated(plan: &BudgetPlan, category: &str) -> Money {
        plan.lines()
            .find(|l| l.category == category)
            .map(|l| l.allocated)
            .unwrap()
    }

    fn expense(category: &str, units: i64, day: NaiveDate) -> Transaction {
        Transaction::new(
            AccountId::new(),
            day,
            TransactionKind::Expense,
            Money::from_units(units),
            category,
            "test",
        )
    }

    #[test]
    fn test_balanced_method_allocations() {
        let plan = BudgetPlan::generate(Money::from_units(500_000), BudgetMethod::Balanced, march());

        // essentials 250k, personal 150k, savings 100k
        assert_eq!(allocated(&plan, "Rent / Mortgage"), Money::from_units(125_000));
        assert_eq!(allocated(&plan, "Groceries"), Money::from_units(75_000));
        assert_eq!(allocated(&plan, "Transport"), Money::from_units(50_000));
        assert_eq!(allocated(&plan, "Dining out"), Money::from_units(60_000));
        assert_eq!(allocated(&plan, "Shopping / Clothing"), Money::from_units(45_000));
        assert_eq!(allocated(&plan, "Leisure / Hobbies"), Money::from_units(45_000));
        assert_eq!(allocated(&plan, "Emergency fund"), Money::from_units(100_000));
        assert_eq!(allocated(&plan, "Electricity"), Money::zero());

        let totals = plan.totals(&HashMap::new());
        assert_eq!(totals.allocated, Money::from_units(500_000));
        assert_eq!(totals.status(), AllocationStatus::Balanced);
    }

    #[test]
    fn test_savings_focus_method() {
        let plan =
            BudgetPlan::generate(Money::from_units(1000), BudgetMethod::SavingsFocus, march());
        assert_eq!(allocated(&plan, "Dining out"), Money::from_units(100));
        assert_eq!(allocated(&plan, "Emergency fund"), Money::from_units(250));
        assert_eq!(plan.label, "Budget for March 2025");
    }

    #[test]
    fn test_zero_based_leaves_everything_unassigned() {
        let plan = BudgetPlan::generate(Money::from_units(1000), BudgetMethod::ZeroBased, march());
        assert!(plan.lines().all(|l| l.allocated.is_zero()));
        assert_eq!(plan.sections.len(), 3);
        assert_eq!(
            plan.totals(&HashMap::new()).status(),
            AllocationStatus::LeftToAssign(Money::from_units(1000))
        );
    }

    #[test]
    fn test_spent_matches_first_line_in_month() {
        let mut plan =
            BudgetPlan::generate(Money::from_units(1000), BudgetMethod::ZeroBased, march());
        plan.sections[1].lines.push(BudgetLine::new("Groceries", Money::zero()));

        let in_month = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let other_month = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let txns = vec![
            expense("Groceries", 30, in_month),
            expense("Groceries", 20, in_month),
            expense("Groceries", 99, other_month),
            expense("Unplanned", 5, in_month),
        ];

        let spent = plan.spent_by_line(&txns);
        let first_groceries = plan.find_line("groceries").unwrap().id;
        assert_eq!(spent.len(), 1);
        assert_eq!(spent[&first_groceries], Money::from_units(50));
        assert_eq!(plan.totals(&spent).spent, Money::from_units(50));
    }

    #[test]
    fn test_income_is_not_spending() {
        let plan = BudgetPlan::generate(Money::from_units(1000), BudgetMethod::ZeroBased, march());
        let mut income = expense("Groceries", 40, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        income.kind = TransactionKind::Income;
        assert!(plan.spent_by_line(&[income]).is_empty());
    }

    #[test]
    fn test_over_allocation_status() {
        let mut plan =
            BudgetPlan::generate(Money::from_units(100), BudgetMethod::ZeroBased, march());
        let id = plan.sections[0].lines[0].id;
        plan.line_mut(id).unwrap().allocated = Money::from_units(150);
        assert_eq!(
            plan.totals(&HashMap::new()).status(),
            AllocationStatus::OverAllocated(Money::from_units(50))
        );
    }

    #[test]
    fn test_remove_line_and_categories() {
        let mut plan =
            BudgetPlan::generate(Money::from_units(100), BudgetMethod::ZeroBased, march());
        let count = plan.lines().count();
        let id = plan.find_line("Water").unwrap().id;

        assert!(plan.remove_line(id).is_some());
        assert!(plan.remove_line(id).is_none());
        assert_eq!(plan.lines().count(), count - 1);
        assert!(!plan.categories().contains(&"Water".to_string()));
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&BudgetMethod::SavingsFocus).unwrap(),
            "\"50/25/25\""
        );
        assert_eq!(BudgetMethod::parse("zero"), Some(BudgetMethod::ZeroBased));
    }
}
