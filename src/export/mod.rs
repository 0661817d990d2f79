//! Export module for famfin
//!
//! Provides data export in two formats:
//! - CSV: transactions and account balances (spreadsheet-compatible)
//! - JSON: machine-readable export of every table

pub mod csv;
pub mod json;

pub use self::csv::{export_accounts_csv, export_transactions_csv};
pub use self::json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
