//! In-memory directory store
//!
//! Mirrors the hosted tables (categories, subcategories, enterprises) closely
//! enough to stand in for them in tests, demos and offline use.

use super::{DirectorySnapshot, StoreError, StoreResult};
use crate::directory::{matches_any_subcategory, SubcategorySelection};
use crate::model::{Category, CategoryId, Enterprise, EnterpriseId, NewEnterprise, Subcategory, SubcategoryId};
use chrono::Utc;
use tracing::{debug, info};

/// How many featured listings the home page asks for
pub const FEATURED_LIMIT: usize = 6;

/// Tables held in insertion order
#[derive(Debug, Clone)]
pub struct MemoryStore {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    enterprises: Vec<Enterprise>,
    next_category_id: i64,
    next_subcategory_id: i64,
    available: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            categories: Vec::new(),
            subcategories: Vec::new(),
            enterprises: Vec::new(),
            next_category_id: 1,
            next_subcategory_id: 1,
            available: true,
        }
    }

    /// Load tables from a snapshot, keeping their ids
    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        let next_category_id = snapshot.categories.iter().map(|c| c.id.as_i64()).max().unwrap_or(0) + 1;
        let next_subcategory_id =
            snapshot.subcategories.iter().map(|s| s.id.as_i64()).max().unwrap_or(0) + 1;
        info!(
            "Loaded snapshot: {} categories, {} subcategories, {} enterprises",
            snapshot.categories.len(),
            snapshot.subcategories.len(),
            snapshot.enterprises.len()
        );
        MemoryStore {
            categories: snapshot.categories,
            subcategories: snapshot.subcategories,
            enterprises: snapshot.enterprises,
            next_category_id,
            next_subcategory_id,
            available: true,
        }
    }

    /// Copy of every table
    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            categories: self.categories.clone(),
            subcategories: self.subcategories.clone(),
            enterprises: self.enterprises.clone(),
        }
    }

    /// Simulate the backend going away (or coming back). While unavailable
    /// every operation fails with `StoreError::Unavailable`.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    fn ensure_available(&self) -> StoreResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("store is offline".to_string()))
        }
    }

    // ---- reference data -------------------------------------------------

    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let id = CategoryId::new(self.next_category_id);
        self.next_category_id += 1;
        self.categories.push(Category::new(id, name));
        id
    }

    pub fn add_subcategory(
        &mut self,
        category_id: CategoryId,
        name: impl Into<String>,
    ) -> StoreResult<SubcategoryId> {
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(StoreError::UnknownCategory(category_id));
        }
        let id = SubcategoryId::new(self.next_subcategory_id);
        self.next_subcategory_id += 1;
        self.subcategories.push(Subcategory::new(id, category_id, name));
        Ok(id)
    }

    pub fn categories(&self) -> StoreResult<Vec<Category>> {
        self.ensure_available()?;
        Ok(self.categories.clone())
    }

    pub fn subcategories_for(&self, category_id: CategoryId) -> StoreResult<Vec<Subcategory>> {
        self.ensure_available()?;
        Ok(self
            .subcategories
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned()
            .collect())
    }

    // ---- enterprises ----------------------------------------------------

    /// Listings in `category` (all categories when `None`) carrying any of
    /// `subcategories` (no constraint when empty)
    pub fn enterprises(
        &self,
        category: Option<&str>,
        subcategories: &[String],
    ) -> StoreResult<Vec<Enterprise>> {
        self.ensure_available()?;
        let selected: SubcategorySelection = subcategories.iter().cloned().collect();
        Ok(self
            .enterprises
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| matches_any_subcategory(e, &selected))
            .cloned()
            .collect())
    }

    pub fn featured(&self, limit: usize) -> StoreResult<Vec<Enterprise>> {
        self.ensure_available()?;
        Ok(self
            .enterprises
            .iter()
            .filter(|e| e.is_featured)
            .take(limit)
            .cloned()
            .collect())
    }

    pub fn enterprise(&self, id: &EnterpriseId) -> StoreResult<Option<Enterprise>> {
        self.ensure_available()?;
        Ok(self.enterprises.iter().find(|e| &e.id == id).cloned())
    }

    /// Insert a submission, assigning an id and timestamps
    pub fn create_enterprise(&mut self, draft: NewEnterprise) -> StoreResult<Enterprise> {
        self.ensure_available()?;
        draft.validate()?;
        let enterprise = draft.into_enterprise(EnterpriseId::generate(), Utc::now());
        debug!("Stored enterprise {} ({})", enterprise.id, enterprise.name);
        self.enterprises.push(enterprise.clone());
        Ok(enterprise)
    }

    /// Insert a fully formed record as-is (seeding)
    pub fn insert_enterprise(&mut self, enterprise: Enterprise) {
        self.enterprises.push(enterprise);
    }

    pub fn enterprise_count(&self) -> usize {
        self.enterprises.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
