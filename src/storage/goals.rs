//! Goal table (`goals.json`)

use crate::models::{Goal, GoalId};

use super::repository::{JsonRepository, Record};

pub type GoalRepository = JsonRepository<Goal>;

impl Record for Goal {
    type Id = GoalId;

    const COLLECTION: &'static str = "goals";

    const ENTITY: &'static str = "Goal";

    fn id(&self) -> GoalId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }
}
