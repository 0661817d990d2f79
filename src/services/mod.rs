//! Service layer for famfin
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, view scoping, linked transactions and audit logging.

pub mod account;
pub mod budget;
pub mod categorize;
pub mod debt;
pub mod goal;
pub mod shopping;
pub mod space;
pub mod transaction;

pub use account::{AccountService, AccountSummary};
pub use budget::{BudgetOverview, BudgetService, LineUpdate};
pub use categorize::{suggester_from_settings, CategorySuggester, KeywordSuggester, Suggestion};
pub use debt::DebtService;
pub use goal::{CreateGoalInput, GoalService};
pub use shopping::{ArchiveOutcome, ItemUpdate, ShoppingService};
pub use space::{LeaveOutcome, SpaceService};
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
