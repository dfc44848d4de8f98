//! Local directory storage
//!
//! `MemoryStore` holds the three directory tables in process. A
//! `DirectorySnapshot` is the same data as a JSON document, used to seed a
//! store from a file.

pub mod memory;

pub use memory::{MemoryStore, FEATURED_LIMIT};

use crate::model::{Category, CategoryId, Enterprise, Subcategory};
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised by the local store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Backend not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Rejected submission
    #[error("Invalid enterprise: {0}")]
    Validation(#[from] ValidationErrors),

    /// Subcategory pointing at a category that does not exist
    #[error("Category {0} not found")]
    UnknownCategory(CategoryId),

    /// Snapshot could not be read or parsed
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// All three tables as one JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub enterprises: Vec<Enterprise>,
}

impl DirectorySnapshot {
    pub fn from_json(json: &str) -> StoreResult<Self> {
        serde_json::from_str(json).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Snapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_snapshot_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "categories": [{{"id": 1, "name": "Land Projects"}}],
                "subcategories": [{{"id": 4, "category_id": 1, "name": "Forestry"}}]
            }}"#
        )
        .unwrap();

        let snapshot = DirectorySnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.categories[0].name, "Land Projects");
        assert_eq!(snapshot.subcategories[0].category_id, CategoryId::new(1));
        assert!(snapshot.enterprises.is_empty());
    }

    #[test]
    fn test_missing_snapshot_file() {
        let err = DirectorySnapshot::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StoreError::Snapshot(_)));
    }
}
