//! CSV Export functionality
//!
//! Exports transactions and account balances of the current view to CSV
//! format.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{FamfinError, FamfinResult};
use crate::models::AccountId;
use crate::services::{AccountService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Placeholder for an account that no longer exists
const MISSING: &str = "N/A";

pub const TRANSACTION_HEADER: [&str; 10] = [
    "Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Frequency",
    "Account",
    "Destination Account",
    "Transfer Fee",
    "Attachment",
];

fn export_error(e: impl std::fmt::Display) -> FamfinError {
    FamfinError::Export(e.to_string())
}

/// Export the transactions matching `filter` to CSV, newest first
///
/// Returns the number of rows written.
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    filter: &TransactionFilter,
    writer: W,
) -> FamfinResult<usize> {
    let account_names: HashMap<AccountId, String> = storage
        .accounts
        .get_all()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let name_of = |id: AccountId| {
        account_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| MISSING.to_string())
    };

    let transactions = TransactionService::new(storage).list(filter)?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TRANSACTION_HEADER).map_err(export_error)?;

    for txn in &transactions {
        let (destination, fee) = if txn.is_transfer() {
            (
                txn.destination_account_id.map(name_of).unwrap_or_default(),
                txn.fee().to_string(),
            )
        } else {
            (String::new(), String::new())
        };

        csv.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.category.clone(),
            txn.kind.to_string(),
            txn.amount.to_string(),
            txn.frequency.to_string(),
            name_of(txn.account_id),
            destination,
            fee,
            txn.attachment_name.clone().unwrap_or_default(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(transactions.len())
}

/// Export the visible accounts with their derived balances
pub fn export_accounts_csv<W: Write>(storage: &Storage, writer: W) -> FamfinResult<usize> {
    let summaries = AccountService::new(storage).list_with_balances()?;

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Name",
        "Type",
        "Initial Balance",
        "Current Balance",
        "Transactions",
    ])
    .map_err(export_error)?;

    for summary in &summaries {
        csv.write_record([
            summary.account.name.clone(),
            summary.account.account_type.to_string(),
            summary.account.initial_balance.to_string(),
            summary.balance.to_string(),
            summary.transaction_count.to_string(),
        ])
        .map_err(export_error)?;
    }

    csv.flush().map_err(export_error)?;
    Ok(summaries.len())
}
