//! Goal service
//!
//! Savings goals and their contributions. A contribution funded from an
//! account is mirrored by a `Savings` expense linked to the goal.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::category::SAVINGS;
use crate::models::{
    AccountId, Goal, GoalCategory, GoalId, Money, SaverLevel, Transaction, TransactionKind,
};
use crate::storage::Storage;

use super::transaction::TransactionService;

pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub name: String,
    pub target_amount: Money,
    pub deadline: Option<NaiveDate>,
    pub category: GoalCategory,
    pub icon: String,
    /// Amount already saved; becomes the first contribution
    pub initial_amount: Money,
    /// Account the initial amount is taken from, if any
    pub funding_account: Option<AccountId>,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn linked_expense(
        goal: &Goal,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        description: String,
    ) -> Transaction {
        let mut txn = Transaction::new(
            account_id,
            date,
            TransactionKind::Expense,
            amount,
            SAVINGS,
            description,
        );
        txn.goal_id = Some(goal.id);
        txn
    }

    pub fn create(&self, input: CreateGoalInput, today: NaiveDate) -> FamfinResult<Goal> {
        let name = input.name.trim();
        if self
            .storage
            .goals
            .name_exists(name, self.storage.view(), None)?
        {
            return Err(FamfinError::Duplicate {
                entity_type: "Goal",
                identifier: name.to_string(),
            });
        }
        if input.initial_amount.is_negative() {
            return Err(FamfinError::Validation(
                "Initial amount cannot be negative".into(),
            ));
        }

        let mut goal = Goal::new(name, input.target_amount, input.category);
        goal.deadline = input.deadline;
        goal.icon = input.icon;
        goal.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        if input.initial_amount.is_positive() {
            goal.add_contribution(today, input.initial_amount);

            if let Some(account_id) = input.funding_account {
                let txn = Self::linked_expense(
                    &goal,
                    account_id,
                    today,
                    input.initial_amount,
                    format!("Initial deposit: {}", goal.name),
                );
                TransactionService::new(self.storage).record(txn)?;
            }
        }

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage
            .log_create(EntityType::Goal, goal.id, Some(goal.name.clone()), &goal)?;

        Ok(goal)
    }

    pub fn find(&self, identifier: &str) -> FamfinResult<Option<Goal>> {
        self.storage.goals.find(identifier, self.storage.view())
    }

    pub fn require(&self, identifier: &str) -> FamfinResult<Goal> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::goal_not_found(identifier))
    }

    pub fn list(&self) -> FamfinResult<Vec<Goal>> {
        self.storage.goals.get_visible(self.storage.view())
    }

    /// Add a contribution and record the matching expense on `account_id`
    pub fn contribute(
        &self,
        id: GoalId,
        amount: Money,
        account_id: AccountId,
        date: NaiveDate,
    ) -> FamfinResult<Goal> {
        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FamfinError::goal_not_found(id.to_string()))?;
        let before = goal.clone();

        if !amount.is_positive() {
            return Err(FamfinError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let txn = Self::linked_expense(
            &goal,
            account_id,
            date,
            amount,
            format!("Contribution: {}", goal.name),
        );
        TransactionService::new(self.storage).record(txn)?;

        goal.add_contribution(date, amount);
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        self.storage.log_update(
            EntityType::Goal,
            goal.id,
            Some(goal.name.clone()),
            &before,
            &goal,
        )?;

        if goal.is_reached() && !before.is_reached() {
            tracing::info!(goal = %goal.id, "goal reached");
        }
        Ok(goal)
    }

    /// Sum of every goal's current amount
    pub fn total_saved(&self) -> FamfinResult<Money> {
        Ok(self.list()?.iter().map(|g| g.current_amount()).sum())
    }

    /// Level earned from the total saved in every goal
    pub fn saver_level(&self) -> FamfinResult<SaverLevel> {
        Ok(SaverLevel::from_total_saved(self.total_saved()?))
    }

    /// Delete a goal; its linked transactions stay as plain expenses
    pub fn delete(&self, id: GoalId) -> FamfinResult<Goal> {
        let goal = self
            .storage
            .goals
            .delete(id)?
            .ok_or_else(|| FamfinError::goal_not_found(id.to_string()))?;
        self.storage.goals.save()?;

        self.storage
            .log_delete(EntityType::Goal, goal.id, Some(goal.name.clone()), &goal)?;

        Ok(goal)
    }
}
