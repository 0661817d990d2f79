//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{AccountId, Frequency, TransactionKind};
use crate::services::{
    suggester_from_settings, AccountService, CreateTransactionInput, Suggestion,
    TransactionFilter, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_date_or_today};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Transaction type (income, expense, transfer)
        kind: String,
        /// Amount (e.g., "50.00")
        amount: String,
        /// Account name or ID (source account for transfers)
        #[arg(short, long)]
        account: String,
        /// Destination account for transfers
        #[arg(long)]
        to: Option<String>,
        /// Transfer fee paid by the source account
        #[arg(long)]
        fee: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Description, defaults to the category name
        #[arg(short = 'D', long, default_value = "")]
        description: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Frequency (one-time, weekly, monthly, yearly)
        #[arg(short, long, default_value = "one-time")]
        frequency: String,
        /// Name of an attached receipt or document
        #[arg(long)]
        attachment: Option<String>,
        /// Suggest a category from the description when none is given
        #[arg(long)]
        suggest: bool,
    },
    /// List transactions, newest first
    List {
        /// Filter by account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Filter by exact category
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Search description and category
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by type (income, expense, transfer)
        #[arg(short = 't', long)]
        kind: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Minimum amount
        #[arg(long)]
        min: Option<String>,
        /// Maximum amount
        #[arg(long)]
        max: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type
        #[arg(short = 't', long)]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New account
        #[arg(long)]
        account: Option<String>,
        /// New destination account (transfers)
        #[arg(long)]
        to: Option<String>,
        /// New transfer fee
        #[arg(long)]
        fee: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New frequency
        #[arg(short, long)]
        frequency: Option<String>,
        /// New attachment name (empty to remove)
        #[arg(long)]
        attachment: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Suggest a category for a description
    Suggest {
        /// Transaction description
        description: String,
    },
    /// List the categories on offer
    Categories {
        /// Show income categories instead of expense ones
        #[arg(long)]
        income: bool,
    },
}

/// Names of every stored account, for register views
fn account_names(storage: &Storage) -> FamfinResult<HashMap<AccountId, String>> {
    Ok(storage
        .accounts
        .get_all()?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect())
}

fn parse_kind(value: &str) -> FamfinResult<TransactionKind> {
    TransactionKind::parse(value).ok_or_else(|| {
        FamfinError::Validation(format!(
            "Invalid transaction type: '{}'. Use income, expense or transfer",
            value
        ))
    })
}

fn parse_frequency(value: &str) -> FamfinResult<Frequency> {
    Frequency::parse(value).ok_or_else(|| {
        FamfinError::Validation(format!(
            "Invalid frequency: '{}'. Use one-time, weekly, monthly or yearly",
            value
        ))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FamfinResult<()> {
    let service = TransactionService::new(storage);
    let account_service = AccountService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            account,
            to,
            fee,
            category,
            description,
            date,
            frequency,
            attachment,
            suggest,
        } => {
            let kind = parse_kind(&kind)?;
            let account = account_service.require(&account)?;
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;
            let frequency = parse_frequency(&frequency)?;

            let destination = match (kind, to) {
                (TransactionKind::Transfer, Some(to)) => Some(account_service.require(&to)?.id),
                (TransactionKind::Transfer, None) => {
                    return Err(FamfinError::Validation(
                        "Transfers need a destination account (--to)".into(),
                    ))
                }
                (_, _) => None,
            };
            let transfer_fee = fee.as_deref().map(parse_amount).transpose()?;

            let category = match category {
                Some(category) => Some(category),
                None if suggest && kind == TransactionKind::Expense => {
                    let suggester = suggester_from_settings(&settings.categorizer);
                    match service.suggest_category(suggester.as_ref(), &description)? {
                        Suggestion::Available(found) => {
                            println!("Suggested category: {}", found);
                            Some(found)
                        }
                        _ => None,
                    }
                }
                None => None,
            };
            if kind != TransactionKind::Transfer && category.is_none() {
                return Err(FamfinError::Validation(
                    "A category is required (use --category or --suggest)".into(),
                ));
            }

            let description = if description.trim().is_empty() {
                category.clone().unwrap_or_else(|| kind.to_string())
            } else {
                description
            };

            let txn = service.create(CreateTransactionInput {
                account_id: account.id,
                kind,
                date,
                amount,
                category,
                description,
                frequency,
                attachment_name: attachment,
                destination_account_id: destination,
                transfer_fee,
            })?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date);
            println!("  Type:     {}", txn.kind);
            println!("  Amount:   {}", txn.amount.format_with_symbol(currency));
            println!("  Category: {}", txn.category);
        }

        TransactionCommands::List {
            account,
            category,
            search,
            kind,
            from,
            to,
            min,
            max,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if let Some(acc_name) = &account {
                filter = filter.account(account_service.require(acc_name)?.id);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(from) = from {
                filter.start_date = Some(parse_date(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date(&to)?);
            }
            let min = min.as_deref().map(parse_amount).transpose()?;
            let max = max.as_deref().map(parse_amount).transpose()?;
            filter = filter.amount_range(min, max);

            let transactions = service.list(&filter)?;
            let names = account_names(storage)?;

            print!(
                "{}",
                format_transaction_register(&transactions, &names, currency)
            );
            println!("\nShowing {} transactions", transactions.len());
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            let names = account_names(storage)?;
            print!("{}", format_transaction_details(&txn, &names, currency));
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            account,
            to,
            fee,
            category,
            description,
            date,
            frequency,
            attachment,
        } => {
            let txn = service.require(&id)?;

            let patch = UpdateTransactionInput {
                account_id: account
                    .as_deref()
                    .map(|a| account_service.require(a).map(|a| a.id))
                    .transpose()?,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                description,
                frequency: frequency.as_deref().map(parse_frequency).transpose()?,
                attachment_name: attachment,
                destination_account_id: to
                    .as_deref()
                    .map(|a| account_service.require(a).map(|a| a.id))
                    .transpose()?,
                transfer_fee: fee.as_deref().map(parse_amount).transpose()?,
            };

            let updated = service.update(txn.id, patch)?;

            println!("Updated transaction: {}", updated.id);
            println!("  Date:     {}", updated.date);
            println!("  Amount:   {}", updated.amount.format_with_symbol(currency));
            println!("  Category: {}", updated.category);
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.require(&id)?;

            if !force {
                println!("About to delete transaction:");
                println!("  Date:        {}", txn.date);
                println!("  Amount:      {}", txn.amount.format_with_symbol(currency));
                println!("  Description: {}", txn.description);
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!(
                "Deleted transaction: {} ({} {})",
                deleted.id, deleted.date, deleted.description
            );
        }

        TransactionCommands::Suggest { description } => {
            let suggester = suggester_from_settings(&settings.categorizer);
            match service.suggest_category(suggester.as_ref(), &description)? {
                Suggestion::Available(category) => println!("Suggested category: {}", category),
                Suggestion::Unavailable(category) => println!(
                    "Suggested category '{}' is not one of your categories",
                    category
                ),
                Suggestion::None => println!("No suggestion available"),
            }
        }

        TransactionCommands::Categories { income } => {
            let categories = if income {
                service.income_categories()
            } else {
                service.expense_categories()?
            };
            for category in categories {
                println!("{}", category);
            }
        }
    }

    Ok(())
}
