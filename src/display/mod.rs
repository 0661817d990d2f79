//! Display formatting for terminal output
//!
//! Turns models, service results and reports into text for the terminal.
//! List views use `tabled`; detail views are plain aligned text.

pub mod account;
pub mod budget;
pub mod debt;
pub mod goal;
pub mod report;
pub mod shopping;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use budget::{describe_status, format_budget_list, format_budget_overview};
pub use debt::{format_debt_details, format_debt_list};
pub use goal::{describe_projection, format_goal_details, format_goal_list};
pub use report::{format_bar, format_percentage};
pub use shopping::{format_analysis, format_shopping_list, format_shopping_lists};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};
