//! Case-insensitive substring search over enterprise text fields
//!
//! There is no ranking: matches come back in input order. Which fields take
//! part depends on where the search runs. The category page only looks at
//! name and description; the global search also looks at subcategory labels.

use crate::model::Enterprise;
use serde::{Deserialize, Serialize};

/// Which enterprise fields participate in a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFields {
    pub name: bool,
    pub description: bool,
    pub subcategories: bool,
}

impl SearchFields {
    /// Category-scoped search: name and description
    pub const CATEGORY: SearchFields = SearchFields {
        name: true,
        description: true,
        subcategories: false,
    };

    /// Directory-wide search: name, description and subcategory labels
    pub const GLOBAL: SearchFields = SearchFields {
        name: true,
        description: true,
        subcategories: true,
    };
}

impl Default for SearchFields {
    fn default() -> Self {
        SearchFields::CATEGORY
    }
}

/// A prepared (lowercased) query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
    fields: SearchFields,
}

impl SearchQuery {
    /// Blank input yields a query that matches everything. Otherwise the
    /// input is matched as typed, surrounding whitespace included.
    pub fn new(query: &str, fields: SearchFields) -> Self {
        let needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        SearchQuery { needle, fields }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    pub fn fields(&self) -> SearchFields {
        self.fields
    }

    pub fn matches(&self, enterprise: &Enterprise) -> bool {
        let needle = match &self.needle {
            Some(n) => n.as_str(),
            None => return true,
        };
        let hit = |text: &str| text.to_lowercase().contains(needle);

        (self.fields.name && hit(enterprise.name.as_str()))
            || (self.fields.description
                && enterprise.description.as_deref().map_or(false, hit))
            || (self.fields.subcategories && enterprise.subcategories.iter().any(|s| hit(s.as_str())))
    }
}

/// Enterprises matching `query` on any of `fields`, in input order.
/// A blank query returns the input unchanged.
pub fn search_enterprises(
    enterprises: &[Enterprise],
    query: &str,
    fields: SearchFields,
) -> Vec<Enterprise> {
    let query = SearchQuery::new(query, fields);
    if query.is_blank() {
        return enterprises.to_vec();
    }
    enterprises
        .iter()
        .filter(|e| query.matches(e))
        .cloned()
        .collect()
}
