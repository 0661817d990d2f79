//! Debt and credit CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::debt::{format_debt_details, format_debt_list};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{DebtKind, Money};
use crate::services::{AccountService, DebtService};
use crate::storage::Storage;

use super::{parse_amount, parse_date_or_today, today};

/// Debt subcommands
#[derive(Subcommand)]
pub enum DebtCommands {
    /// Track money you owe or are owed
    Create {
        /// Name (e.g. "Car loan", "Lent to Sam")
        name: String,
        /// Total amount
        total: String,
        /// Kind (debt: I owe, credit: owed to me)
        #[arg(short, long, default_value = "debt")]
        kind: String,
        /// Amount already paid before tracking started
        #[arg(short, long)]
        paid: Option<String>,
    },
    /// List debts and credits
    List {
        /// Only show one kind (debt, credit)
        #[arg(short, long)]
        kind: Option<String>,
    },
    /// Show an item with its repayments
    Show {
        /// Name or ID
        item: String,
    },
    /// Record a repayment (or a collection for a credit)
    Repay {
        /// Name or ID
        item: String,
        /// Amount
        amount: String,
        /// Account the money leaves or enters
        #[arg(short, long)]
        account: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an item (its transactions are kept)
    Delete {
        /// Name or ID
        item: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_kind(value: &str) -> FamfinResult<DebtKind> {
    DebtKind::parse(value).ok_or_else(|| {
        FamfinError::Validation(format!("Invalid kind: '{}'. Use debt or credit", value))
    })
}

/// Handle a debt command
pub fn handle_debt_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DebtCommands,
) -> FamfinResult<()> {
    let service = DebtService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        DebtCommands::Create {
            name,
            total,
            kind,
            paid,
        } => {
            let paid = paid.as_deref().map(parse_amount).transpose()?;
            let item = service.create(
                &name,
                parse_kind(&kind)?,
                parse_amount(&total)?,
                paid,
                today(),
            )?;
            println!("Created {}: {}", item.kind, item.name);
            println!("  Total: {}", item.total_amount.format_with_symbol(currency));
            if item.amount_paid().is_positive() {
                println!(
                    "  Paid:  {}",
                    item.amount_paid().format_with_symbol(currency)
                );
            }
            println!("  ID:    {}", item.id);
        }

        DebtCommands::List { kind } => {
            let kind = kind.as_deref().map(parse_kind).transpose()?;
            let items = service.list(kind)?;
            println!("{}", format_debt_list(&items, currency));

            if !items.is_empty() {
                let remaining = |k: DebtKind| -> Money {
                    items
                        .iter()
                        .filter(|i| i.kind == k)
                        .map(|i| i.remaining())
                        .sum()
                };
                println!(
                    "Still owed by me: {}   Still owed to me: {}",
                    remaining(DebtKind::Debt).format_with_symbol(currency),
                    remaining(DebtKind::Credit).format_with_symbol(currency)
                );
            }
        }

        DebtCommands::Show { item } => {
            let item = service.require(&item)?;
            print!("{}", format_debt_details(&item, currency));
        }

        DebtCommands::Repay {
            item,
            amount,
            account,
            date,
        } => {
            let item = service.require(&item)?;
            let account = AccountService::new(storage).require(&account)?;
            let amount = parse_amount(&amount)?;
            let date = parse_date_or_today(date.as_deref())?;

            let updated = service.repay(item.id, amount, account.id, date)?;

            let verb = match updated.kind {
                DebtKind::Debt => "Repaid",
                DebtKind::Credit => "Collected",
            };
            println!(
                "{} {} on {} via {}",
                verb,
                amount.format_with_symbol(currency),
                updated.name,
                account.name
            );
            if updated.is_settled() {
                println!("{} is now settled", updated.name);
            } else {
                println!(
                    "  Remaining: {}",
                    updated.remaining().format_with_symbol(currency)
                );
            }
        }

        DebtCommands::Delete { item, force } => {
            let item = service.require(&item)?;

            if !force {
                println!("About to delete {}: {}", item.kind, item.name);
                println!("  Its repayment transactions will be kept");
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(item.id)?;
            println!("Deleted {}: {}", deleted.kind, deleted.name);
        }
    }

    Ok(())
}
