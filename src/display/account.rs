//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::Money;
use crate::services::account::AccountSummary;

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], currency: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    // Calculate column widths
    let name_width = summaries
        .iter()
        .map(|s| s.account.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>14}  {:>6}\n",
        "Name",
        "Type",
        "Balance",
        "Txns",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:->14}  {:->6}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<name_width$}  {:<8}  {:>14}  {:>6}\n",
            summary.account.name,
            summary.account.account_type.to_string(),
            summary.balance.format_with_symbol(currency),
            summary.transaction_count,
            name_width = name_width,
        ));
    }

    let total: Money = summaries.iter().map(|s| s.balance).sum();
    output.push_str(&format!(
        "{:-<name_width$}  {:-<8}  {:->14}  {:->6}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:<8}  {:>14}\n",
        "TOTAL",
        "",
        total.format_with_symbol(currency),
        name_width = name_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, currency: &str) -> String {
    let account = &summary.account;

    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:             {}\n", account.account_type));
    output.push_str(&format!("  ID:               {}\n", account.id));
    if let Some(space_id) = account.space_id {
        output.push_str(&format!("  Family space:     {}\n", space_id));
    }
    output.push('\n');
    output.push_str(&format!(
        "  Initial Balance:  {}\n",
        account.initial_balance.format_with_symbol(currency)
    ));
    output.push_str(&format!(
        "  Current Balance:  {}\n",
        summary.balance.format_with_symbol(currency)
    ));
    output.push_str(&format!("  Transactions:     {}\n", summary.transaction_count));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        account.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        account.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
