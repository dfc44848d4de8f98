//! Client-side narrowing of an enterprise collection
//!
//! Filter and search are independent pure predicates over the same base
//! collection. `narrow` applies both, filter first.

pub mod filter;
pub mod search;

pub use filter::{filter_by_any_subcategory, matches_any_subcategory, SubcategorySelection};
pub use search::{search_enterprises, SearchFields, SearchQuery};

use crate::model::Enterprise;

/// Enterprises passing both the subcategory filter and the search query
pub fn narrow(
    enterprises: &[Enterprise],
    selected: &SubcategorySelection,
    query: &SearchQuery,
) -> Vec<Enterprise> {
    enterprises
        .iter()
        .filter(|e| matches_any_subcategory(e, selected) && query.matches(e))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnterpriseId, NewEnterprise};
    use chrono::Utc;

    #[test]
    fn test_narrow_composes_both_predicates() {
        let make = |id: &str, name: &str, subs: &[&str]| {
            NewEnterprise::new(name, "Land Projects")
                .with_subcategories(subs.iter().copied())
                .into_enterprise(EnterpriseId::new(id), Utc::now())
        };
        let list = vec![
            make("a", "Cedar Grove", &["Forestry"]),
            make("b", "Cedar Commons", &["Permaculture"]),
            make("c", "Birch Lot", &["Forestry"]),
        ];
        let selected: SubcategorySelection = ["Forestry"].into_iter().collect();
        let query = SearchQuery::new("cedar", SearchFields::CATEGORY);

        let out = narrow(&list, &selected, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "a");

        let everything = narrow(&list, &SubcategorySelection::new(), &SearchQuery::new("", SearchFields::CATEGORY));
        assert_eq!(everything, list);
    }
}
