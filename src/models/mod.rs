//! Core data models for famfin
//!
//! This module contains the data structures of the household finance domain:
//! accounts, transactions, goals, budget plans, debts, shopping lists and
//! family spaces.

pub mod account;
pub mod budget;
pub mod category;
pub mod debt;
pub mod goal;
pub mod ids;
pub mod money;
pub mod period;
pub mod shopping;
pub mod space;
pub mod transaction;

pub use account::{Account, AccountType};
pub use budget::{AllocationStatus, BudgetLine, BudgetMethod, BudgetPlan, BudgetSection, BudgetTotals};
pub use debt::{DebtCreditItem, DebtKind};
pub use goal::{Contribution, Countdown, Goal, GoalCategory, GoalProjection, SaverLevel};
pub use ids::{
    AccountId, BudgetLineId, BudgetPlanId, DebtId, GoalId, ShoppingItemId, ShoppingListId,
    SpaceId, TransactionId,
};
pub use money::Money;
pub use period::Month;
pub use shopping::{
    ListStatus, ShoppingAnalysis, ShoppingItem, ShoppingList, WELL_MANAGED_INSIGHT,
};
pub use space::FamilySpace;
pub use transaction::{Frequency, Transaction, TransactionKind};
