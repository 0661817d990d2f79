//! Family space service
//!
//! Family spaces are keyed by the profile's e-mail: a profile sees the
//! spaces it is a member of and can switch its current view to one of them.
//! View changes are persisted in the settings file.

use crate::audit::EntityType;
use crate::config::{CurrentView, Settings};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{FamilySpace, SpaceId};
use crate::storage::Storage;

pub struct SpaceService<'a> {
    storage: &'a Storage,
}

/// Result of leaving a space
#[derive(Debug, Clone)]
pub struct LeaveOutcome {
    pub space: FamilySpace,
    /// The last member left and the space was deleted
    pub deleted: bool,
    /// The current view was this space and fell back to personal
    pub view_reset: bool,
}

impl<'a> SpaceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, name: &str, settings: &Settings) -> FamfinResult<FamilySpace> {
        let profile = settings.require_profile()?;

        let space = FamilySpace::new(name.trim(), profile.email.as_str());
        space
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.spaces.upsert(space.clone())?;
        self.storage.spaces.save()?;

        self.storage.log_create(
            EntityType::FamilySpace,
            space.id,
            Some(space.name.clone()),
            &space,
        )?;

        tracing::info!(space = %space.id, "family space created");
        Ok(space)
    }

    /// Spaces the profile belongs to; none without a profile
    pub fn list(&self, settings: &Settings) -> FamfinResult<Vec<FamilySpace>> {
        let Some(profile) = &settings.profile else {
            return Ok(Vec::new());
        };

        let mut spaces = self.storage.spaces.get_all()?;
        spaces.retain(|s| s.is_member(&profile.email));
        Ok(spaces)
    }

    /// Find one of the profile's spaces by id prefix or name
    pub fn require(&self, identifier: &str, settings: &Settings) -> FamfinResult<FamilySpace> {
        let profile = settings.require_profile()?;

        self.storage
            .spaces
            .find(identifier, &CurrentView::Personal)?
            .filter(|s| s.is_member(&profile.email))
            .ok_or_else(|| FamfinError::space_not_found(identifier))
    }

    fn get_member_space(&self, id: SpaceId, settings: &Settings) -> FamfinResult<FamilySpace> {
        let profile = settings.require_profile()?;

        self.storage
            .spaces
            .get(id)?
            .filter(|s| s.is_member(&profile.email))
            .ok_or_else(|| FamfinError::space_not_found(id.to_string()))
    }

    pub fn invite(&self, id: SpaceId, email: &str, settings: &Settings) -> FamfinResult<FamilySpace> {
        let mut space = self.get_member_space(id, settings)?;
        let before = space.clone();

        space
            .invite(email)
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.spaces.upsert(space.clone())?;
        self.storage.spaces.save()?;

        self.storage.log_update(
            EntityType::FamilySpace,
            space.id,
            Some(space.name.clone()),
            &before,
            &space,
        )?;

        Ok(space)
    }

    /// Remove the profile from a space, deleting it once empty
    ///
    /// When the current view is this space it falls back to personal.
    pub fn leave(&self, id: SpaceId, settings: &mut Settings) -> FamfinResult<LeaveOutcome> {
        let mut space = self.get_member_space(id, settings)?;
        let before = space.clone();
        let email = settings.require_profile()?.email.clone();

        let deleted = space.remove_member(&email);
        if deleted {
            self.storage.spaces.delete(id)?;
            self.storage.spaces.save()?;
            self.storage.log_delete(
                EntityType::FamilySpace,
                space.id,
                Some(space.name.clone()),
                &before,
            )?;
        } else {
            self.storage.spaces.upsert(space.clone())?;
            self.storage.spaces.save()?;
            self.storage.log_update(
                EntityType::FamilySpace,
                space.id,
                Some(space.name.clone()),
                &before,
                &space,
            )?;
        }

        let view_reset = settings.current_view.space_id() == Some(id);
        if view_reset {
            settings.current_view = CurrentView::Personal;
            settings.save(self.storage.paths())?;
        }

        tracing::info!(space = %id, deleted, "left family space");
        Ok(LeaveOutcome {
            space,
            deleted,
            view_reset,
        })
    }

    /// Change the current view; family views need membership
    pub fn switch(&self, view: CurrentView, settings: &mut Settings) -> FamfinResult<CurrentView> {
        if let CurrentView::Family { space_id } = view {
            self.get_member_space(space_id, settings)?;
        }

        settings.current_view = view;
        settings.save(self.storage.paths())?;

        tracing::debug!(?view, "view switched");
        Ok(view)
    }

    /// Name of the current view for display
    pub fn view_name(&self, view: &CurrentView) -> FamfinResult<String> {
        match view {
            CurrentView::Personal => Ok("Personal".to_string()),
            CurrentView::Family { space_id } => Ok(self
                .storage
                .spaces
                .get(*space_id)?
                .map(|s| format!("Family: {}", s.name))
                .unwrap_or_else(|| format!("Family: {} (missing)", space_id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FamfinPaths, Profile};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn settings_for(email: &str) -> Settings {
        Settings {
            profile: Some(Profile {
                name: "Ann".into(),
                email: email.into(),
                avatar: String::new(),
            }),
            ..Settings::default()
        }
    }

    #[test]
    fn test_create_requires_profile() {
        let (_temp, storage) = create_test_storage();
        let service = SpaceService::new(&storage);

        assert!(matches!(
            service.create("Home", &Settings::default()),
            Err(FamfinError::Config(_))
        ));
        let space = service.create("Home", &settings_for("ann@example.com")).unwrap();
        assert_eq!(space.members, vec!["ann@example.com".to_string()]);
    }

    #[test]
    fn test_list_only_member_spaces() {
        let (_temp, storage) = create_test_storage();
        let service = SpaceService::new(&storage);
        let ann = settings_for("ann@example.com");
        let bob = settings_for("bob@example.com");

        let space = service.create("Home", &ann).unwrap();
        assert!(service.list(&bob).unwrap().is_empty());

        service.invite(space.id, "Bob@Example.com", &ann).unwrap();
        assert_eq!(service.list(&bob).unwrap().len(), 1);
        assert!(service.require("Home", &bob).is_ok());

        assert!(service
            .invite(space.id, "bob@example.com", &ann)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_switch_needs_membership() {
        let (_temp, storage) = create_test_storage();
        let service = SpaceService::new(&storage);
        let ann = settings_for("ann@example.com");
        let mut bob = settings_for("bob@example.com");

        let space = service.create("Home", &ann).unwrap();
        let view = CurrentView::Family { space_id: space.id };

        assert!(service.switch(view, &mut bob).unwrap_err().is_not_found());
        assert_eq!(bob.current_view, CurrentView::Personal);

        let mut ann = ann;
        service.switch(view, &mut ann).unwrap();
        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.current_view, view);
    }

    #[test]
    fn test_leave_resets_view_and_deletes_empty_space() {
        let (_temp, storage) = create_test_storage();
        let service = SpaceService::new(&storage);
        let mut ann = settings_for("ann@example.com");

        let space = service.create("Home", &ann).unwrap();
        service.invite(space.id, "bob@example.com", &ann).unwrap();
        service
            .switch(CurrentView::Family { space_id: space.id }, &mut ann)
            .unwrap();

        let outcome = service.leave(space.id, &mut ann).unwrap();
        assert!(!outcome.deleted);
        assert!(outcome.view_reset);
        assert_eq!(ann.current_view, CurrentView::Personal);

        let mut bob = settings_for("bob@example.com");
        let outcome = service.leave(space.id, &mut bob).unwrap();
        assert!(outcome.deleted);
        assert!(!outcome.view_reset);
        assert_eq!(storage.spaces.count().unwrap(), 0);
    }
}
