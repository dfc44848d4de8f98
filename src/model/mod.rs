//! Directory data model
//!
//! - `Category` / `Subcategory`: read-only reference data
//! - `Enterprise`: a listing, referring to its category and subcategories by name
//! - `NewEnterprise`: the insert payload produced by the submission form

pub mod category;
pub mod enterprise;
pub mod types;

pub use category::{
    category_slug, category_tagline, find_category, is_geographic_category, slug_to_category_name,
    Category, Subcategory, LAND_PROJECTS,
};
pub use enterprise::{Enterprise, NewEnterprise};
pub use types::{CategoryId, EnterpriseId, SubcategoryId};
