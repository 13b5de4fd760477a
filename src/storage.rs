//! Durable storage backends for liked recipes.

use crate::error::StorageError;
use crate::favorites::FavoriteEntry;
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read/write capability over the full set of favorites.
///
/// Implementations store every entry under one well-known key and always
/// replace the whole set on write.
pub trait FavoritesStorage: Send + Sync {
    /// All stored entries in insertion order. Empty when nothing was stored yet.
    fn read_all(&self) -> Result<Vec<FavoriteEntry>, StorageError>;

    /// Replace the stored entries with `entries`
    fn write_all(&self, entries: &[FavoriteEntry]) -> Result<(), StorageError>;
}

/// JSON file storage at `<directory>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: directory.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStorage for FileStorage {
    fn read_all(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No favorites stored at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_all(&self, entries: &[FavoriteEntry]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write then rename so a failed write never truncates the previous file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "Stored {} favorites at {}",
            entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// In-process storage, useful for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Vec<FavoriteEntry>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `entries`
    pub fn with_entries(entries: Vec<FavoriteEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl FavoritesStorage for MemoryStorage {
    fn read_all(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.clone())
    }

    fn write_all(&self, entries: &[FavoriteEntry]) -> Result<(), StorageError> {
        let mut stored = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *stored = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> FavoriteEntry {
        FavoriteEntry {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            author: "Test Kitchen".to_string(),
            image_url: format!("http://example.com/{}.jpg", id),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "recipe-planner-storage-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let storage = FileStorage::new(temp_dir("missing"), "likes");
        assert!(storage.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_file_round_trip_preserves_order() {
        let dir = temp_dir("round-trip");
        let storage = FileStorage::new(&dir, "likes");
        let entries = vec![entry("b"), entry("a"), entry("c")];

        storage.write_all(&entries).unwrap();
        assert_eq!(storage.read_all().unwrap(), entries);
        assert!(storage.path().ends_with("likes.json"));
        assert!(!dir.join("likes.json.tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("likes.json"), "{not json").unwrap();

        let storage = FileStorage::new(&dir, "likes");
        assert!(matches!(
            storage.read_all(),
            Err(StorageError::Serialization(_))
        ));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_memory_storage_replaces_contents() {
        let storage = MemoryStorage::with_entries(vec![entry("old")]);
        storage.write_all(&[entry("new")]).unwrap();

        let stored = storage.read_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, "new");
    }
}
