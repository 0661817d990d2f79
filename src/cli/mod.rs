//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod debt;
pub mod export;
pub mod goal;
pub mod history;
pub mod profile;
pub mod report;
pub mod shop;
pub mod space;
pub mod transaction;

use chrono::NaiveDate;

use crate::error::{FamfinError, FamfinResult};
use crate::models::{Money, Month};

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use debt::{handle_debt_command, DebtCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use history::handle_history_command;
pub use profile::{handle_profile_command, ProfileCommands};
pub use report::{handle_report_command, ReportCommands};
pub use shop::{handle_shop_command, ShopCommands};
pub use space::{handle_space_command, SpaceCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Today's date in the local time zone
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse an amount argument such as "12.50" or "1000"
pub(crate) fn parse_amount(value: &str) -> FamfinResult<Money> {
    Money::parse(value).map_err(|e| {
        FamfinError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '12.50' or '1000'. Error: {}",
            value, e
        ))
    })
}

pub(crate) fn parse_date(value: &str) -> FamfinResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        FamfinError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn parse_date_or_today(value: Option<&str>) -> FamfinResult<NaiveDate> {
    value.map(parse_date).unwrap_or_else(|| Ok(today()))
}

/// Parse an optional "YYYY-MM" argument, defaulting to the current month
pub(crate) fn parse_month(value: Option<&str>) -> FamfinResult<Month> {
    match value {
        Some(value) => Month::parse(value).map_err(|e| FamfinError::Validation(e.to_string())),
        None => Ok(Month::of(today())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.50").unwrap(), Money::from_cents(1250));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-04").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
        );
        assert!(parse_date("04/03/2025").is_err());
        assert_eq!(parse_date_or_today(None).unwrap(), today());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month(Some("2025-02")).unwrap(), Month::new(2025, 2).unwrap());
        assert!(parse_month(Some("2025-13")).is_err());
    }
}
