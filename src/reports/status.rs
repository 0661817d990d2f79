//! Getting-started checklist
//!
//! Derived from what is stored, so it never disagrees with the data.

use crate::error::FamfinResult;
use crate::services::{AccountService, BudgetService, GoalService, TransactionService};
use crate::storage::Storage;

/// One checklist step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub label: &'static str,
    pub hint: &'static str,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupStatus {
    pub added_account: bool,
    pub added_transaction: bool,
    pub created_budget: bool,
    pub set_goal: bool,
}

impl SetupStatus {
    pub fn generate(storage: &Storage) -> FamfinResult<Self> {
        Ok(Self {
            added_account: !AccountService::new(storage).list()?.is_empty(),
            added_transaction: !TransactionService::new(storage).visible()?.is_empty(),
            created_budget: BudgetService::new(storage).latest()?.is_some(),
            set_goal: !GoalService::new(storage).list()?.is_empty(),
        })
    }

    pub fn steps(&self) -> Vec<SetupStep> {
        vec![
            SetupStep {
                label: "Add your first account",
                hint: "famfin account create",
                done: self.added_account,
            },
            SetupStep {
                label: "Record a transaction",
                hint: "famfin transaction add",
                done: self.added_transaction,
            },
            SetupStep {
                label: "Create your first budget",
                hint: "famfin budget create",
                done: self.created_budget,
            },
            SetupStep {
                label: "Set a savings goal",
                hint: "famfin goal create",
                done: self.set_goal,
            },
        ]
    }

    pub fn completed(&self) -> usize {
        self.steps().iter().filter(|s| s.done).count()
    }

    pub fn is_complete(&self) -> bool {
        self.steps().iter().all(|s| s.done)
    }

    pub fn format_terminal(&self) -> String {
        let steps = self.steps();
        let mut output = format!("Getting started ({}/{})\n", self.completed(), steps.len());
        for step in steps {
            if step.done {
                output.push_str(&format!("  [x] {}\n", step.label));
            } else {
                output.push_str(&format!("  [ ] {:<28} ({})\n", step.label, step.hint));
            }
        }
        output
    }
}
