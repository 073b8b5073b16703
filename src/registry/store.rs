//! In-memory catalog of software entries.
//!
//! The store owns its collection outright; every query hands back an owned
//! snapshot, so later mutations are never visible through an earlier result.

use std::collections::HashSet;

use super::model::{CategoryFilter, EntryId, SoftwareDraft, SoftwareEntry};
use super::seed::seed_entries;
use crate::error::CatalogError;
use crate::utils::search::contains_folded;

#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<SoftwareEntry>,
    retired: HashSet<EntryId>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the built-in example entries.
    pub fn seeded() -> Self {
        Self::from_drafts(seed_entries())
    }

    pub fn from_drafts(drafts: impl IntoIterator<Item = SoftwareDraft>) -> Self {
        let mut store = Self::new();
        for draft in drafts {
            store.add(draft);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn list(&self) -> Vec<SoftwareEntry> {
        self.entries.clone()
    }

    pub fn get(&self, id: &EntryId) -> Option<&SoftwareEntry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    pub fn list_by_category(&self, filter: CategoryFilter) -> Vec<SoftwareEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry.category))
            .cloned()
            .collect()
    }

    /// Case-insensitive match on name or description. Empty query lists everything.
    pub fn search(&self, query: &str) -> Vec<SoftwareEntry> {
        if query.is_empty() {
            return self.list();
        }
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                contains_folded(&entry.name, &needle) || contains_folded(&entry.description, &needle)
            })
            .cloned()
            .collect()
    }

    pub fn add(&mut self, draft: SoftwareDraft) -> SoftwareEntry {
        let id = self.fresh_id();
        let entry = draft.with_id(id);
        tracing::info!(id = %entry.id, name = %entry.name, "catalog entry added");
        self.entries.push(entry.clone());
        entry
    }

    /// Replaces the stored record with the same id.
    pub fn update(&mut self, entry: SoftwareEntry) -> Result<SoftwareEntry, CatalogError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|existing| existing.id == entry.id)
            .ok_or(CatalogError::NotFound(entry.id))?;
        *slot = entry.clone();
        tracing::info!(id = %entry.id, name = %entry.name, "catalog entry updated");
        Ok(entry)
    }

    pub fn delete(&mut self, id: &EntryId) -> Result<EntryId, CatalogError> {
        let idx = self
            .entries
            .iter()
            .position(|entry| entry.id == *id)
            .ok_or(CatalogError::NotFound(*id))?;
        let removed = self.entries.remove(idx);
        self.retired.insert(removed.id);
        tracing::info!(id = %removed.id, name = %removed.name, "catalog entry deleted");
        Ok(removed.id)
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let id = EntryId::new();
            if !self.retired.contains(&id) && self.get(&id).is_none() {
                return id;
            }
        }
    }
}
