//! Generic JSON table repository
//!
//! Each table lives in its own file as `{ "<collection>": [ ... ] }` and is
//! held in memory behind an `RwLock` while the process runs.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::CurrentView;
use crate::error::FamfinError;

use super::file_io::{read_json, write_json_atomic};

/// A record stored in a JSON table
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Id: Copy + Eq + Hash + fmt::Display;

    /// Key of the array in the table file
    const COLLECTION: &'static str;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> Self::Id;

    fn name(&self) -> &str;

    /// Check whether a user-typed identifier is a prefix of this record's id
    fn matches_id(&self, identifier: &str) -> bool;

    /// Whether the record belongs to `view`; unscoped tables see everything
    fn visible_in(&self, _view: &CurrentView) -> bool {
        true
    }

    /// Listing order
    fn ordering(&self, other: &Self) -> Ordering {
        self.name()
            .to_lowercase()
            .cmp(&other.name().to_lowercase())
    }
}

/// Repository for one JSON table
pub struct JsonRepository<T: Record> {
    path: PathBuf,
    data: RwLock<HashMap<T::Id, T>>,
}

impl<T: Record> JsonRepository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<T::Id, T>>, FamfinError> {
        self.data
            .read()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<T::Id, T>>, FamfinError> {
        self.data
            .write()
            .map_err(|e| FamfinError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load the table from disk, replacing what is in memory
    pub fn load(&self) -> Result<(), FamfinError> {
        let mut file_data: BTreeMap<String, Vec<T>> = read_json(&self.path)?;
        let records = file_data.remove(T::COLLECTION).unwrap_or_default();

        let mut data = self.write()?;
        data.clear();
        for record in records {
            data.insert(record.id(), record);
        }

        tracing::debug!(collection = T::COLLECTION, count = data.len(), "loaded table");
        Ok(())
    }

    /// Save the table to disk
    pub fn save(&self) -> Result<(), FamfinError> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(T::ordering);

        let mut file_data = BTreeMap::new();
        file_data.insert(T::COLLECTION, records);
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: T::Id) -> Result<Option<T>, FamfinError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Every record, in listing order
    pub fn get_all(&self) -> Result<Vec<T>, FamfinError> {
        let mut records: Vec<T> = self.read()?.values().cloned().collect();
        records.sort_by(T::ordering);
        Ok(records)
    }

    /// Records visible in `view`, in listing order
    pub fn get_visible(&self, view: &CurrentView) -> Result<Vec<T>, FamfinError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.visible_in(view))
            .collect())
    }

    /// Find a visible record by id prefix or case-insensitive name
    ///
    /// A prefix shared by several records is an error rather than a guess.
    pub fn find(&self, identifier: &str, view: &CurrentView) -> Result<Option<T>, FamfinError> {
        let visible = self.get_visible(view)?;
        let lower = identifier.trim().to_lowercase();

        let by_id: Vec<&T> = visible.iter().filter(|r| r.matches_id(identifier)).collect();
        match by_id.as_slice() {
            [] => {}
            [found] => return Ok(Some((*found).clone())),
            _ => {
                return Err(FamfinError::Ambiguous {
                    entity_type: T::ENTITY,
                    identifier: identifier.trim().to_string(),
                    matches: by_id.len(),
                })
            }
        }
        Ok(visible.into_iter().find(|r| r.name().to_lowercase() == lower))
    }

    /// Check whether a visible record other than `exclude` has this name
    pub fn name_exists(
        &self,
        name: &str,
        view: &CurrentView,
        exclude: Option<T::Id>,
    ) -> Result<bool, FamfinError> {
        let lower = name.trim().to_lowercase();
        Ok(self
            .read()?
            .values()
            .any(|r| r.visible_in(view) && r.name().to_lowercase() == lower && Some(r.id()) != exclude))
    }

    pub fn upsert(&self, record: T) -> Result<(), FamfinError> {
        self.write()?.insert(record.id(), record);
        Ok(())
    }

    pub fn delete(&self, id: T::Id) -> Result<Option<T>, FamfinError> {
        Ok(self.write()?.remove(&id))
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        Ok(self.read()?.len())
    }
}
