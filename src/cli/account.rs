//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{FamfinError, FamfinResult};
use crate::models::AccountType;
use crate::services::AccountService;
use crate::storage::Storage;

use super::parse_amount;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (bank, cash, savings)
        #[arg(short = 't', long, default_value = "bank")]
        account_type: String,
        /// Initial balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
    },
    /// List accounts with their balances
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        name: String,
    },
    /// Delete an account and its transactions
    Delete {
        /// Account name or ID
        account: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> FamfinResult<()> {
    let service = AccountService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                FamfinError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: bank, cash, savings",
                    account_type
                ))
            })?;
            let initial_balance = parse_amount(&balance)?;

            let account = service.create(&name, account_type, initial_balance)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!(
                "  Initial Balance: {}",
                account.initial_balance.format_with_symbol(currency)
            );
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let summaries = service.list_with_balances()?;
            print!("{}", format_account_list(&summaries, currency));
        }

        AccountCommands::Show { account } => {
            let found = service.require(&account)?;
            let summary = service.get_summary(found)?;
            print!("{}", format_account_details(&summary, currency));
        }

        AccountCommands::Rename { account, name } => {
            let found = service.require(&account)?;
            let renamed = service.rename(found.id, &name)?;
            println!("Renamed account: {} -> {}", found.name, renamed.name);
        }

        AccountCommands::Delete { account, force } => {
            let found = service.require(&account)?;
            let summary = service.get_summary(found)?;

            if !force {
                println!("About to delete account: {}", summary.account.name);
                println!(
                    "  {} transaction(s) touching it will be deleted too",
                    summary.transaction_count
                );
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let removed = service.delete(summary.account.id)?;
            println!(
                "Deleted account: {} ({} transaction(s) removed)",
                summary.account.name, removed
            );
        }
    }

    Ok(())
}
