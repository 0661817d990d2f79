//! Family space table (`spaces.json`)

use crate::models::{FamilySpace, SpaceId};

use super::repository::{JsonRepository, Record};

pub type SpaceRepository = JsonRepository<FamilySpace>;

impl Record for FamilySpace {
    type Id = SpaceId;

    const COLLECTION: &'static str = "spaces";

    const ENTITY: &'static str = "Family space";

    fn id(&self) -> SpaceId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn matches_id(&self, identifier: &str) -> bool {
        self.id.matches(identifier)
    }
}
