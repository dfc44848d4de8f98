//! Categories, subcategories and category slugs
//!
//! Categories are static reference data. Enterprises refer to them by name,
//! not by id, so lookups here are by value.

use super::types::{CategoryId, SubcategoryId};
use serde::{Deserialize, Serialize};

/// The one category whose listings are shown on a map instead of a graph
pub const LAND_PROJECTS: &str = "Land Projects";

/// Top-level classification (e.g. "Land Projects")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
        }
    }

    /// URL slug for this category
    pub fn slug(&self) -> String {
        category_slug(&self.name)
    }

    /// Whether listings in this category carry meaningful coordinates
    pub fn is_geographic(&self) -> bool {
        is_geographic_category(&self.name)
    }
}

/// Fine-grained tag scoped to one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
}

impl Subcategory {
    pub fn new(
        id: impl Into<SubcategoryId>,
        category_id: impl Into<CategoryId>,
        name: impl Into<String>,
    ) -> Self {
        Subcategory {
            id: id.into(),
            category_id: category_id.into(),
            name: name.into(),
        }
    }
}

/// Find a category by its display name
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.name == name)
}

pub fn is_geographic_category(name: &str) -> bool {
    name == LAND_PROJECTS
}

/// Header blurb for the well-known categories
pub fn category_tagline(name: &str) -> Option<&'static str> {
    match name {
        LAND_PROJECTS => Some(
            "Discover regenerative farms, food forests, and other land-based projects restoring ecosystems.",
        ),
        "Capital Sources" => Some(
            "Find organizations providing funding, investment, and financial resources for regenerative work.",
        ),
        "Open Source Tools" => Some(
            "Explore digital tools supporting the management and monitoring of regenerative projects.",
        ),
        "Network Organizers" => Some(
            "Connect with organizations building communities and networks for ecosystem restoration.",
        ),
        _ => None,
    }
}

/// "Land Projects" -> "land-projects"
pub fn category_slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// "open-source-tools" -> "Open Source Tools"
///
/// Only the first character of each word is uppercased; the rest is kept
/// as written.
pub fn slug_to_category_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tagline() {
        assert!(category_tagline("Land Projects").unwrap().contains("food forests"));
        assert_eq!(category_tagline("Seed Banks"), None);
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(category_slug("Land Projects"), "land-projects");
        assert_eq!(category_slug("Open  Source Tools"), "open-source-tools");
        assert_eq!(category_slug("Capital"), "capital");
    }

    #[test]
    fn test_slug_to_category_name() {
        assert_eq!(slug_to_category_name("land-projects"), "Land Projects");
        assert_eq!(slug_to_category_name("network-organizers"), "Network Organizers");
        assert_eq!(slug_to_category_name(""), "");
    }

    #[test]
    fn test_slug_round_trip_for_seed_categories() {
        for name in ["Land Projects", "Capital Sources", "Open Source Tools", "Network Organizers"] {
            assert_eq!(slug_to_category_name(&category_slug(name)), name);
        }
    }

    #[test]
    fn test_find_category_by_name() {
        let categories = vec![
            Category::new(1, "Land Projects"),
            Category::new(2, "Capital Sources"),
        ];
        assert_eq!(find_category(&categories, "Capital Sources").map(|c| c.id), Some(CategoryId(2)));
        assert!(find_category(&categories, "capital sources").is_none());
    }

    #[test]
    fn test_only_land_projects_is_geographic() {
        assert!(Category::new(1, LAND_PROJECTS).is_geographic());
        assert!(!Category::new(2, "Open Source Tools").is_geographic());
    }
}
