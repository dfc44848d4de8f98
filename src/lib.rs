//! Regenerative Enterprise Directory
//!
//! Core model and client-side logic for a directory of enterprises
//! (organizations and projects) grouped by category and subcategory.
//!
//! # Modules
//!
//! - `model`: categories, subcategories, enterprises and submission drafts
//! - `directory`: any-of subcategory filter and case-insensitive search
//! - `graph`: center -> subcategory -> enterprise association graph with radial layout
//! - `geo`: map markers and centroid for initial framing
//! - `validation`: field-level checks run before a submission is sent
//! - `store`: in-memory tables and JSON snapshots
//! - `config`: YAML + environment configuration
//!
//! Persistence and geocoding live behind the clients in `regen-directory-sdk`.
//!
//! ## Example Usage
//!
//! ```rust
//! use regen_directory::directory::{filter_by_any_subcategory, SubcategorySelection};
//! use regen_directory::graph::{build_graph, LayoutConfig, NoJitter};
//! use regen_directory::store::MemoryStore;
//! use regen_directory::NewEnterprise;
//!
//! let mut store = MemoryStore::new();
//! store.create_enterprise(
//!     NewEnterprise::new("Oak Hollow", "Land Projects").with_subcategories(["Permaculture", "Forestry"]),
//! ).unwrap();
//! store.create_enterprise(
//!     NewEnterprise::new("Birch Lot", "Land Projects").with_subcategories(["Forestry"]),
//! ).unwrap();
//!
//! let listings = store.enterprises(Some("Land Projects"), &[]).unwrap();
//! let selected: SubcategorySelection = ["Forestry"].into_iter().collect();
//! assert_eq!(filter_by_any_subcategory(&listings, &selected).len(), 2);
//!
//! let graph = build_graph(&listings, "Land Projects", &LayoutConfig::default(), &mut NoJitter);
//! assert_eq!(graph.node_count(), 1 + 2 + 2);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod directory;
pub mod geo;
pub mod graph;
pub mod model;
pub mod store;
pub mod validation;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, DirectoryConfig, GeocoderConfig, StoreConfig};
pub use directory::{
    filter_by_any_subcategory, narrow, search_enterprises, SearchFields, SearchQuery,
    SubcategorySelection,
};
pub use geo::{centroid, located, GeoPoint, MapMarker, MapView};
pub use graph::{build_graph, AssociationGraph, JitterSource, LayoutConfig};
pub use model::{
    category_slug, category_tagline, find_category, is_geographic_category, slug_to_category_name,
    Category, CategoryId, Enterprise, EnterpriseId, NewEnterprise, Subcategory, SubcategoryId,
    LAND_PROJECTS,
};
pub use store::{DirectorySnapshot, MemoryStore, StoreError, StoreResult};
pub use validation::{Field, FieldError, ValidationErrors};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
