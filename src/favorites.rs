use crate::error::StorageError;
use crate::storage::FavoritesStorage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A liked recipe, keyed by the recipe id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Liked recipes in insertion order, mirrored to durable storage on every change.
pub struct FavoritesStore {
    entries: Vec<FavoriteEntry>,
    storage: Arc<dyn FavoritesStorage>,
}

impl FavoritesStore {
    /// Empty store backed by `storage`. Call [`restore`](Self::restore) to load saved likes.
    pub fn new(storage: Arc<dyn FavoritesStorage>) -> Self {
        Self {
            entries: Vec::new(),
            storage,
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Like a recipe and persist the updated set.
    ///
    /// Liking an id that is already liked returns the existing entry unchanged
    /// and does not touch storage. If the write fails the like is rolled back.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Result<FavoriteEntry, StorageError> {
        let id = id.into();
        if let Some(existing) = self.get(&id) {
            debug!("Recipe {} already liked", id);
            return Ok(existing.clone());
        }

        let entry = FavoriteEntry {
            id,
            title: title.into(),
            author: author.into(),
            image_url: image_url.into(),
        };
        self.entries.push(entry.clone());

        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }

        debug!("Liked recipe {}", entry.id);
        Ok(entry)
    }

    /// Remove a like and persist. Unknown ids are ignored.
    pub fn delete_like(&mut self, id: &str) -> Result<(), StorageError> {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            return Ok(());
        };

        let removed = self.entries.remove(index);
        if let Err(e) = self.persist() {
            self.entries.insert(index, removed);
            return Err(e);
        }

        debug!("Unliked recipe {}", id);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Replace the in-memory likes with what storage holds.
    ///
    /// Stored order is kept. Repeated ids keep their first occurrence.
    pub fn restore(&mut self) -> Result<(), StorageError> {
        let stored = self.storage.read_all()?;
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(stored.len());

        for entry in stored {
            if seen.insert(entry.id.clone()) {
                entries.push(entry);
            } else {
                warn!("Skipping duplicate stored favorite {}", entry.id);
            }
        }

        debug!("Restored {} favorites", entries.len());
        self.entries = entries;
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.write_all(&self.entries)
    }
}
