//! CLI commands for data export
//!
//! Every export writes to a file when one is given and to stdout otherwise.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{FamfinError, FamfinResult};
use crate::export::{export_accounts_csv, export_full_json, export_transactions_csv};
use crate::models::TransactionKind;
use crate::services::{AccountService, TransactionFilter};
use crate::storage::Storage;

use super::parse_date;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV
    Transactions {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
        /// Only one account
        #[arg(short, long)]
        account: Option<String>,
        /// Only one category
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Only one type (income, expense, transfer)
        #[arg(short = 't', long)]
        kind: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Export accounts with their balances to CSV
    Accounts {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
    },

    /// Export the full database to JSON
    Json {
        /// Output file path (stdout when omitted)
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn open_output(output: Option<&Path>) -> FamfinResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FamfinError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Report where an export went; stdout stays clean for piping
fn report(output: Option<&Path>, what: &str) {
    match output {
        Some(path) => println!("{} exported to: {}", what, path.display()),
        None => eprintln!("{} exported", what),
    }
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FamfinResult<()> {
    match cmd {
        ExportCommands::Transactions {
            output,
            account,
            category,
            kind,
            from,
            to,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(account) = account {
                filter = filter.account(AccountService::new(storage).require(&account)?.id);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(kind) = kind {
                let parsed = TransactionKind::parse(&kind).ok_or_else(|| {
                    FamfinError::Validation(format!(
                        "Invalid transaction type: '{}'. Use income, expense or transfer",
                        kind
                    ))
                })?;
                filter = filter.kind(parsed);
            }
            filter.start_date = from.as_deref().map(parse_date).transpose()?;
            filter.end_date = to.as_deref().map(parse_date).transpose()?;

            let mut writer = open_output(output.as_deref())?;
            let count = export_transactions_csv(storage, &filter, &mut writer)?;
            writer.flush()?;
            report(output.as_deref(), &format!("{} transaction(s)", count));
        }

        ExportCommands::Accounts { output } => {
            let mut writer = open_output(output.as_deref())?;
            let count = export_accounts_csv(storage, &mut writer)?;
            writer.flush()?;
            report(output.as_deref(), &format!("{} account(s)", count));
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = open_output(output.as_deref())?;
            let export = export_full_json(storage, &mut writer, pretty)?;
            writeln!(writer)?;
            writer.flush()?;
            report(
                output.as_deref(),
                &format!(
                    "Full database ({} accounts, {} transactions)",
                    export.metadata.account_count, export.metadata.transaction_count
                ),
            );
        }
    }

    Ok(())
}
