//! Reports for famfin
//!
//! Monthly summary, category breakdown and the getting-started checklist.

pub mod category;
pub mod status;
pub mod summary;

pub use category::{CategoryReport, CategoryShare};
pub use status::{SetupStatus, SetupStep};
pub use summary::{CategoryAmount, DailyExpense, MonthlySummary};
