//! Regen Directory SDK - client library for the enterprise directory
//!
//! Provides two client implementations:
//!
//! - **`EmbeddedClient`** - In-process, no network. Wraps a `MemoryStore`
//!   directly. Ideal for tests, demos, and browsing a snapshot file.
//!
//! - **`RemoteClient`** - Talks to the hosted table API over HTTP.
//!   For production use.
//!
//! Both implement the `DirectoryClient` trait for a unified API. On top of
//! that trait sit the `CategoryBrowser` page state, `global_search`, and
//! the `Geocoder` used to fill in a submission's location.
//!
//! # Quick Start
//!
//! ```rust
//! use regen_directory_sdk::{DirectoryClient, EmbeddedClient, EnterpriseFilter, NewEnterprise};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EmbeddedClient::new();
//!
//!     client.submit_enterprise(
//!         NewEnterprise::new("Oak Hollow", "Land Projects").with_subcategories(["Forestry"]),
//!     ).await.unwrap();
//!
//!     let listings = client
//!         .list_enterprises(&EnterpriseFilter::in_category("Land Projects"))
//!         .await
//!         .unwrap();
//!     println!("Found {} enterprises", listings.len());
//! }
//! ```

pub mod browser;
pub mod client;
pub mod embedded;
pub mod error;
pub mod geocode;
pub mod latest;
pub mod models;
pub mod remote;

// ============================================================
// Core SDK types
// ============================================================

pub use client::DirectoryClient;
pub use embedded::EmbeddedClient;
pub use remote::RemoteClient;
pub use error::{DirectoryError, DirectoryResult, FailureKind};
pub use models::{ApiErrorBody, EnterpriseFilter};

pub use browser::{global_search, CategoryBrowser, ViewMode, Visualization};
pub use geocode::{AddressCandidate, GeocodeError, GeocodeResult, Geocoder, MapboxGeocoder};
pub use latest::{LatestRequest, Ticket};

// ============================================================
// Directory types (re-exported from regen-directory core)
// ============================================================

pub use regen_directory::{
    Category, CategoryId, DirectoryConfig, Enterprise, EnterpriseId, GeoPoint, NewEnterprise,
    Subcategory, SubcategoryId, ValidationErrors,
};

pub use regen_directory::VERSION;
