//! Budget service
//!
//! Generating monthly plans from the template, editing their lines and
//! matching the month's expenses onto them.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{
    BudgetLine, BudgetLineId, BudgetMethod, BudgetPlan, BudgetPlanId, BudgetTotals, Money, Month,
};
use crate::storage::Storage;

use super::transaction::TransactionService;

/// Category given to a line added without one
pub const NEW_LINE_CATEGORY: &str = "New category";

pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A plan together with what was spent on each line
#[derive(Debug, Clone)]
pub struct BudgetOverview {
    pub plan: BudgetPlan,
    pub spent: HashMap<BudgetLineId, Money>,
    pub totals: BudgetTotals,
}

impl BudgetOverview {
    pub fn line_spent(&self, id: BudgetLineId) -> Money {
        self.spent.get(&id).copied().unwrap_or_default()
    }
}

/// Changes to one budget line; `None` keeps the value
#[derive(Debug, Clone, Default)]
pub struct LineUpdate {
    pub category: Option<String>,
    pub allocated: Option<Money>,
    pub notes: Option<String>,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    fn get_plan(&self, id: BudgetPlanId) -> FamfinResult<BudgetPlan> {
        self.storage
            .budgets
            .get(id)?
            .filter(|p| self.storage.view().includes(p.space_id))
            .ok_or_else(|| FamfinError::budget_not_found(id.to_string()))
    }

    fn save_update(&self, before: &BudgetPlan, plan: &mut BudgetPlan) -> FamfinResult<()> {
        plan.touch();
        self.storage.budgets.upsert(plan.clone())?;
        self.storage.budgets.save()?;
        self.storage.log_update(
            EntityType::BudgetPlan,
            plan.id,
            Some(plan.label.clone()),
            before,
            plan,
        )
    }

    /// Create a plan for `month` from the template
    pub fn generate(
        &self,
        income: Money,
        method: BudgetMethod,
        month: Month,
    ) -> FamfinResult<BudgetPlan> {
        if !income.is_positive() {
            return Err(FamfinError::Validation(
                "Income must be greater than zero".into(),
            ));
        }

        let mut plan = BudgetPlan::generate(income, method, month);
        plan.space_id = self.storage.view().space_id();

        self.storage.budgets.upsert(plan.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::BudgetPlan,
            plan.id,
            Some(plan.label.clone()),
            &plan,
        )?;

        tracing::info!(plan = %plan.id, %month, %method, "budget plan generated");
        Ok(plan)
    }

    /// Plans of the current view, most recent month first
    pub fn list(&self) -> FamfinResult<Vec<BudgetPlan>> {
        self.storage.budgets.get_visible(self.storage.view())
    }

    pub fn latest(&self) -> FamfinResult<Option<BudgetPlan>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Find a plan by id prefix, month (`YYYY-MM`) or label
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<BudgetPlan>> {
        self.storage.budgets.find(identifier, self.storage.view())
    }

    /// The plan named by `identifier`, or the latest one when absent
    pub fn resolve(&self, identifier: Option<&str>) -> FamfinResult<BudgetPlan> {
        match identifier {
            Some(identifier) => self
                .find(identifier)?
                .ok_or_else(|| FamfinError::budget_not_found(identifier)),
            None => self.latest()?.ok_or_else(|| {
                FamfinError::budget_not_found("no budget plan yet (run 'famfin budget create')")
            }),
        }
    }

    pub fn set_income(&self, id: BudgetPlanId, income: Money) -> FamfinResult<BudgetPlan> {
        if !income.is_positive() {
            return Err(FamfinError::Validation(
                "Income must be greater than zero".into(),
            ));
        }
        let mut plan = self.get_plan(id)?;
        let before = plan.clone();
        plan.income = income;
        self.save_update(&before, &mut plan)?;
        Ok(plan)
    }

    /// Add a line to a section (1-based index or title prefix)
    pub fn add_line(
        &self,
        id: BudgetPlanId,
        section: &str,
        category: Option<&str>,
        allocated: Money,
    ) -> FamfinResult<(BudgetPlan, BudgetLineId)> {
        if allocated.is_negative() {
            return Err(FamfinError::Validation(
                "Allocated amount cannot be negative".into(),
            ));
        }

        let mut plan = self.get_plan(id)?;
        let before = plan.clone();

        let index = find_section(&plan, section).ok_or_else(|| FamfinError::NotFound {
            entity_type: "Budget section",
            identifier: section.to_string(),
        })?;

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(NEW_LINE_CATEGORY);
        let line = BudgetLine::new(category, allocated);
        let line_id = line.id;
        plan.sections[index].lines.push(line);

        self.save_update(&before, &mut plan)?;
        Ok((plan, line_id))
    }

    pub fn update_line(
        &self,
        id: BudgetPlanId,
        line_id: BudgetLineId,
        update: LineUpdate,
    ) -> FamfinResult<BudgetPlan> {
        let mut plan = self.get_plan(id)?;
        let before = plan.clone();

        let line = plan.line_mut(line_id).ok_or_else(|| FamfinError::NotFound {
            entity_type: "Budget line",
            identifier: line_id.to_string(),
        })?;

        if let Some(category) = update.category {
            let category = category.trim();
            if category.is_empty() {
                return Err(FamfinError::Validation("Category cannot be empty".into()));
            }
            line.category = category.to_string();
        }
        if let Some(allocated) = update.allocated {
            if allocated.is_negative() {
                return Err(FamfinError::Validation(
                    "Allocated amount cannot be negative".into(),
                ));
            }
            line.allocated = allocated;
        }
        if let Some(notes) = update.notes {
            line.notes = notes;
        }

        self.save_update(&before, &mut plan)?;
        Ok(plan)
    }

    pub fn delete_line(&self, id: BudgetPlanId, line_id: BudgetLineId) -> FamfinResult<BudgetPlan> {
        let mut plan = self.get_plan(id)?;
        let before = plan.clone();

        plan.remove_line(line_id).ok_or_else(|| FamfinError::NotFound {
            entity_type: "Budget line",
            identifier: line_id.to_string(),
        })?;

        self.save_update(&before, &mut plan)?;
        Ok(plan)
    }

    pub fn delete(&self, id: BudgetPlanId) -> FamfinResult<BudgetPlan> {
        let plan = self.get_plan(id)?;
        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        self.storage.log_delete(
            EntityType::BudgetPlan,
            plan.id,
            Some(plan.label.clone()),
            &plan,
        )?;
        Ok(plan)
    }

    /// Match the visible expenses of the plan's month onto its lines
    pub fn with_live_spent(&self, plan: BudgetPlan) -> FamfinResult<BudgetOverview> {
        let transactions = TransactionService::new(self.storage).visible()?;
        let spent = plan.spent_by_line(&transactions);
        let totals = plan.totals(&spent);

        Ok(BudgetOverview {
            plan,
            spent,
            totals,
        })
    }
}

/// Resolve a section by 1-based position or case-insensitive title prefix
fn find_section(plan: &BudgetPlan, section: &str) -> Option<usize> {
    let section = section.trim();
    if let Ok(position) = section.parse::<usize>() {
        return (1..=plan.sections.len())
            .contains(&position)
            .then(|| position - 1);
    }

    let lower = section.to_lowercase();
    if lower.is_empty() {
        return None;
    }
    plan.sections
        .iter()
        .position(|s| s.title.to_lowercase().starts_with(&lower))
}
