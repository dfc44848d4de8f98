//! DirectoryClient trait - the unified interface for embedded and remote modes

use async_trait::async_trait;
use regen_directory::{Category, CategoryId, Enterprise, EnterpriseId, NewEnterprise, Subcategory};
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::EnterpriseFilter;

/// Typed access to the directory tables.
///
/// Implemented by:
/// - `EmbeddedClient` - in-process `MemoryStore` (tests, demos, offline snapshots)
/// - `RemoteClient` - the hosted table API over HTTP
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// All categories
    async fn list_categories(&self) -> DirectoryResult<Vec<Category>>;

    /// Subcategories belonging to one category
    async fn list_subcategories(&self, category_id: CategoryId) -> DirectoryResult<Vec<Subcategory>>;

    /// Enterprises matching the filter ("contains any of" for subcategories)
    async fn list_enterprises(&self, filter: &EnterpriseFilter) -> DirectoryResult<Vec<Enterprise>>;

    /// Up to `FEATURED_LIMIT` featured enterprises
    async fn list_featured(&self) -> DirectoryResult<Vec<Enterprise>>;

    /// One enterprise, or `None` if the id is unknown
    async fn get_enterprise(&self, id: &EnterpriseId) -> DirectoryResult<Option<Enterprise>>;

    /// Insert a new enterprise and return the stored record
    async fn create_enterprise(&self, draft: NewEnterprise) -> DirectoryResult<Enterprise>;

    /// Like `get_enterprise`, but an unknown id is a `NotFound` error
    async fn get_enterprise_required(&self, id: &EnterpriseId) -> DirectoryResult<Enterprise> {
        self.get_enterprise(id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))
    }

    /// Normalize and validate a form submission, then create it.
    ///
    /// Validation failures return before any request is made. Any other
    /// failure is reported as a write failure.
    async fn submit_enterprise(&self, draft: NewEnterprise) -> DirectoryResult<Enterprise> {
        let draft = draft.normalized();
        if let Err(errors) = draft.validate() {
            debug!("Rejected submission for {:?}: {}", draft.name, errors);
            return Err(errors.into());
        }
        self.create_enterprise(draft)
            .await
            .map_err(DirectoryError::into_write_failure)
    }
}
