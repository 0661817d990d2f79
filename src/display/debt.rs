//! Debt and credit display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{DebtCreditItem, DebtKind};

use super::report::{format_bar, format_percentage};

#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

fn kind_label(kind: DebtKind) -> &'static str {
    match kind {
        DebtKind::Debt => "I owe",
        DebtKind::Credit => "Owed to me",
    }
}

/// Format debts and credits as a table
pub fn format_debt_list(items: &[DebtCreditItem], currency: &str) -> String {
    if items.is_empty() {
        return "No debts or credits.".to_string();
    }

    let rows = items.iter().map(|item| DebtRow {
        id: item.id.to_string(),
        name: item.name.clone(),
        kind: kind_label(item.kind).to_string(),
        paid: item.amount_paid().format_with_symbol(currency),
        total: item.total_amount.format_with_symbol(currency),
        remaining: item.remaining().format_with_symbol(currency),
        progress: format!(
            "{} {}",
            format_bar(item.progress_percent(), 10),
            format_percentage(item.progress_percent())
        ),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format one item with its repayment history
pub fn format_debt_details(item: &DebtCreditItem, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", kind_label(item.kind), item.name));
    output.push_str(&format!("  ID:        {}\n", item.id));
    output.push_str(&format!(
        "  Paid:      {} of {} ({:.1}%)\n",
        item.amount_paid().format_with_symbol(currency),
        item.total_amount.format_with_symbol(currency),
        item.progress_percent()
    ));
    if item.is_settled() {
        output.push_str("  Status:    settled\n");
    } else {
        output.push_str(&format!(
            "  Remaining: {}\n",
            item.remaining().format_with_symbol(currency)
        ));
    }

    if !item.contributions.is_empty() {
        output.push_str("\nRepayments:\n");
        for c in &item.contributions {
            output.push_str(&format!(
                "  {}  {:>14}\n",
                c.date.format("%Y-%m-%d"),
                c.amount.format_with_symbol(currency)
            ));
        }
    }

    output
}
