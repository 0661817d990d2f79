//! Transaction display formatting
//!
//! Register views and detail views of transactions. Account names are
//! resolved by the caller and passed in as a lookup.

use std::collections::HashMap;

use crate::models::{AccountId, Transaction, TransactionKind};

/// Name of an account, or a marker when it no longer exists
fn account_name(names: &HashMap<AccountId, String>, id: AccountId) -> &str {
    names.get(&id).map(String::as_str).unwrap_or("N/A")
}

fn signed_amount(txn: &Transaction, currency: &str) -> String {
    match txn.kind {
        TransactionKind::Income => format!("+{}", txn.amount.format_with_symbol(currency)),
        TransactionKind::Expense => format!("-{}", txn.amount.format_with_symbol(currency)),
        TransactionKind::Transfer => txn.amount.format_with_symbol(currency),
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(
    txn: &Transaction,
    names: &HashMap<AccountId, String>,
    currency: &str,
) -> String {
    let account = if txn.is_transfer() {
        format!(
            "{} ⇄ {}",
            account_name(names, txn.account_id),
            txn.destination_account_id
                .map(|id| account_name(names, id))
                .unwrap_or("N/A")
        )
    } else {
        account_name(names, txn.account_id).to_string()
    };

    format!(
        "{} {} {} {} {} {:>14}",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.description, 24),
        truncate(&txn.category, 16),
        truncate(&account, 20),
        signed_amount(txn, currency)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    names: &HashMap<AccountId, String>,
    currency: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:24} {:16} {:20} {:>14}\n",
        "ID", "Date", "Description", "Category", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(102));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, names, currency));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    names: &HashMap<AccountId, String>,
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Account:     {}\n",
        account_name(names, txn.account_id)
    ));

    if txn.is_transfer() {
        if let Some(dest) = txn.destination_account_id {
            output.push_str(&format!("Destination: {}\n", account_name(names, dest)));
        }
        output.push_str(&format!(
            "Fee:         {}\n",
            txn.fee().format_with_symbol(currency)
        ));
    }

    output.push_str(&format!("Frequency:   {}\n", txn.frequency));

    if let Some(attachment) = &txn.attachment_name {
        output.push_str(&format!("Attachment:  {}\n", attachment));
    }
    if let Some(goal) = txn.goal_id {
        output.push_str(&format!("Goal:        {}\n", goal));
    }
    if let Some(debt) = txn.debt_id {
        output.push_str(&format!("Debt:        {}\n", debt));
    }

    output
}

/// Truncate a string to a fixed display width
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn names(pairs: &[(AccountId, &str)]) -> HashMap<AccountId, String> {
        pairs.iter().map(|(id, n)| (*id, n.to_string())).collect()
    }

    #[test]
    fn test_register_row_signs() {
        let account = AccountId::new();
        let lookup = names(&[(account, "Bank")]);
        let txn = Transaction::new(
            account,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            TransactionKind::Expense,
            Money::from_cents(1999),
            "Food",
            "Market",
        );

        let row = format_transaction_row(&txn, &lookup, "$");
        assert!(row.contains("2025-01-02"));
        assert!(row.contains("Bank"));
        assert!(row.ends_with("-$19.99"));
    }

    #[test]
    fn test_transfer_details() {
        let from = AccountId::new();
        let to = AccountId::new();
        let lookup = names(&[(from, "Bank")]);
        let txn = Transaction::transfer(
            from,
            to,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            Money::from_units(100),
            Money::from_units(1),
            "Move",
        );

        let details = format_transaction_details(&txn, &lookup, "$");
        assert!(details.contains("Destination: N/A"));
        assert!(details.contains("Fee:         $1.00"));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Épicerie du coin", 8), "Épice...");
        assert_eq!(truncate("abc", 5), "abc  ");
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], &HashMap::new(), "$"),
            "No transactions found.\n"
        );
    }
}
