//! Budget plan display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{AllocationStatus, BudgetPlan};
use crate::services::BudgetOverview;

use super::report::format_percentage;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "% of income")]
    share: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Income")]
    income: String,
}

/// Describe how much of the income is still unassigned
pub fn describe_status(status: AllocationStatus, currency: &str) -> String {
    match status {
        AllocationStatus::Balanced => "Every unit of income is assigned".to_string(),
        AllocationStatus::LeftToAssign(amount) => {
            format!("{} left to assign", amount.format_with_symbol(currency))
        }
        AllocationStatus::OverAllocated(amount) => {
            format!("Over-allocated by {}", amount.format_with_symbol(currency))
        }
    }
}

/// Format stored plans as a table
pub fn format_budget_list(plans: &[BudgetPlan], currency: &str) -> String {
    if plans.is_empty() {
        return "No budget plans yet.".to_string();
    }

    let rows = plans.iter().map(|plan| PlanRow {
        id: plan.id.to_string(),
        month: plan.month.to_string(),
        method: plan.method.to_string(),
        income: plan.income.format_with_symbol(currency),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a plan section by section with live spending
pub fn format_budget_overview(overview: &BudgetOverview, currency: &str) -> String {
    let plan = &overview.plan;
    let mut output = String::new();

    output.push_str(&format!("{}\n", plan.label));
    output.push_str(&format!("  ID:     {}\n", plan.id));
    output.push_str(&format!("  Method: {}\n", plan.method));
    output.push_str(&format!(
        "  Income: {}\n",
        plan.income.format_with_symbol(currency)
    ));

    for (index, section) in plan.sections.iter().enumerate() {
        output.push_str(&format!("\n{}. {}\n", index + 1, section.title));
        if section.lines.is_empty() {
            output.push_str("  (no lines)\n");
            continue;
        }

        let rows = section.lines.iter().map(|line| LineRow {
            id: line.id.to_string(),
            category: line.category.clone(),
            allocated: line.allocated.format_with_symbol(currency),
            spent: overview.line_spent(line.id).format_with_symbol(currency),
            share: format_percentage(line.allocated.ratio_of(plan.income) * 100.0),
            notes: line.notes.clone(),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    let totals = &overview.totals;
    output.push('\n');
    output.push_str(&format!(
        "Allocated: {}\n",
        totals.allocated.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "Spent:     {}\n",
        totals.spent.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "{}\n",
        describe_status(totals.status(), currency)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetMethod, Money, Month};
    use std::collections::HashMap;

    #[test]
    fn test_overview_shows_sections_and_status() {
        let plan = BudgetPlan::generate(
            Money::from_units(1000),
            BudgetMethod::Balanced,
            Month::new(2025, 3).unwrap(),
        );
        let rent = plan.find_line("Rent / Mortgage").unwrap().id;
        let mut spent = HashMap::new();
        spent.insert(rent, Money::from_units(200));
        let totals = plan.totals(&spent);
        let overview = BudgetOverview {
            plan,
            spent,
            totals,
        };

        let output = format_budget_overview(&overview, "$");
        assert!(output.starts_with("Budget for March 2025"));
        assert!(output.contains("1. Essential expenses"));
        assert!(output.contains("3. Savings & Investments"));
        assert!(output.contains("$250.00"));
        assert!(output.contains("25%"));
        assert!(output.contains("Spent:     $200.00"));
        assert!(output.contains("Every unit of income is assigned"));
    }

    #[test]
    fn test_status_text() {
        assert_eq!(
            describe_status(AllocationStatus::LeftToAssign(Money::from_units(5)), "$"),
            "$5.00 left to assign"
        );
        assert_eq!(
            describe_status(AllocationStatus::OverAllocated(Money::from_cents(50)), "$"),
            "Over-allocated by $0.50"
        );
    }
}
