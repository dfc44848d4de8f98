//! EmbeddedClient - in-process directory client
//!
//! Wraps a `MemoryStore` directly, no network needed.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use regen_directory::store::FEATURED_LIMIT;
use regen_directory::{
    Category, CategoryId, DirectorySnapshot, Enterprise, EnterpriseId, MemoryStore, NewEnterprise,
    Subcategory,
};

use crate::client::DirectoryClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::EnterpriseFilter;

/// In-process client that wraps a `MemoryStore`.
///
/// Ideal for tests, demos, and browsing a JSON snapshot offline.
pub struct EmbeddedClient {
    pub(crate) store: Arc<RwLock<MemoryStore>>,
    featured_limit: usize,
}

impl EmbeddedClient {
    /// Create a new EmbeddedClient with an empty store
    pub fn new() -> Self {
        Self::with_store(Arc::new(RwLock::new(MemoryStore::new())))
    }

    /// Create an EmbeddedClient wrapping an existing store
    pub fn with_store(store: Arc<RwLock<MemoryStore>>) -> Self {
        Self {
            store,
            featured_limit: FEATURED_LIMIT,
        }
    }

    /// Serve the contents of a snapshot file
    pub fn from_snapshot_file(path: impl AsRef<Path>) -> DirectoryResult<Self> {
        let snapshot = DirectorySnapshot::load(path)?;
        Ok(Self::with_store(Arc::new(RwLock::new(MemoryStore::from_snapshot(snapshot)))))
    }

    pub fn with_featured_limit(mut self, limit: usize) -> Self {
        self.featured_limit = limit;
        self
    }

    /// Get a reference to the underlying store
    pub fn store(&self) -> &Arc<RwLock<MemoryStore>> {
        &self.store
    }

    /// Acquire a read lock on the store.
    pub async fn store_read(&self) -> tokio::sync::RwLockReadGuard<'_, MemoryStore> {
        self.store.read().await
    }

    /// Acquire a write lock on the store (seeding, toggling availability).
    pub async fn store_write(&self) -> tokio::sync::RwLockWriteGuard<'_, MemoryStore> {
        self.store.write().await
    }
}

impl Default for EmbeddedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryClient for EmbeddedClient {
    async fn list_categories(&self) -> DirectoryResult<Vec<Category>> {
        Ok(self.store.read().await.categories()?)
    }

    async fn list_subcategories(&self, category_id: CategoryId) -> DirectoryResult<Vec<Subcategory>> {
        Ok(self.store.read().await.subcategories_for(category_id)?)
    }

    async fn list_enterprises(&self, filter: &EnterpriseFilter) -> DirectoryResult<Vec<Enterprise>> {
        let store = self.store.read().await;
        Ok(store.enterprises(filter.category.as_deref(), &filter.subcategories)?)
    }

    async fn list_featured(&self) -> DirectoryResult<Vec<Enterprise>> {
        Ok(self.store.read().await.featured(self.featured_limit)?)
    }

    async fn get_enterprise(&self, id: &EnterpriseId) -> DirectoryResult<Option<Enterprise>> {
        Ok(self.store.read().await.enterprise(id)?)
    }

    async fn create_enterprise(&self, draft: NewEnterprise) -> DirectoryResult<Enterprise> {
        let mut store = self.store.write().await;
        store
            .create_enterprise(draft)
            .map_err(|e| DirectoryError::from(e).into_write_failure())
    }
}
