//! Any-of subcategory filter

use crate::model::Enterprise;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The set of subcategory names a user has toggled on.
///
/// Keeps toggle order so the UI can render the chips as they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategorySelection {
    names: IndexSet<String>,
}

impl SubcategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the name if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.shift_remove(&name) {
            false
        } else {
            self.names.insert(name);
            true
        }
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SubcategorySelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SubcategorySelection {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// True when the enterprise carries at least one selected subcategory.
///
/// An empty selection is the "no filter" state and matches everything.
pub fn matches_any_subcategory(enterprise: &Enterprise, selected: &SubcategorySelection) -> bool {
    selected.is_empty()
        || enterprise
            .subcategories
            .iter()
            .any(|s| selected.contains(s))
}

/// Order-preserving subsequence of `enterprises` sharing at least one
/// subcategory with `selected`; the whole input when nothing is selected.
pub fn filter_by_any_subcategory(
    enterprises: &[Enterprise],
    selected: &SubcategorySelection,
) -> Vec<Enterprise> {
    if selected.is_empty() {
        return enterprises.to_vec();
    }
    enterprises
        .iter()
        .filter(|e| matches_any_subcategory(e, selected))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EnterpriseId, NewEnterprise};
    use chrono::Utc;

    fn tagged(id: &str, subcategories: &[&str]) -> Enterprise {
        NewEnterprise::new(id, "Land Projects")
            .with_subcategories(subcategories.iter().copied())
            .into_enterprise(EnterpriseId::new(id), Utc::now())
    }

    fn ids(list: &[Enterprise]) -> Vec<&str> {
        list.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_selection_is_identity() {
        let list = vec![tagged("a", &["Forestry"]), tagged("b", &[])];
        let out = filter_by_any_subcategory(&list, &SubcategorySelection::new());
        assert_eq!(out, list);
    }

    #[test]
    fn test_any_of_semantics() {
        let list = vec![
            tagged("a", &["Permaculture", "Forestry"]),
            tagged("b", &["Forestry"]),
            tagged("c", &["Aquaculture"]),
            tagged("d", &["Permaculture"]),
        ];
        let selected: SubcategorySelection = ["Forestry", "Permaculture"].into_iter().collect();
        assert_eq!(ids(&filter_by_any_subcategory(&list, &selected)), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_untagged_never_matches_a_selection() {
        let list = vec![tagged("c", &[])];
        let selected: SubcategorySelection = ["Forestry"].into_iter().collect();
        assert!(filter_by_any_subcategory(&list, &selected).is_empty());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let list = vec![tagged("a", &["Forestry"])];
        let selected: SubcategorySelection = ["forestry"].into_iter().collect();
        assert!(filter_by_any_subcategory(&list, &selected).is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut selection = SubcategorySelection::new();
        assert!(selection.toggle("Forestry"));
        assert!(selection.toggle("Grants"));
        assert_eq!(selection.to_vec(), vec!["Forestry", "Grants"]);

        assert!(!selection.toggle("Forestry"));
        assert_eq!(selection.to_vec(), vec!["Grants"]);

        selection.clear();
        assert!(selection.is_empty());
    }
}
