//! Identifier types for directory records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a category row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(id: i64) -> Self {
        CategoryId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        CategoryId(id)
    }
}

/// Identifier of a subcategory row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SubcategoryId(pub i64);

impl SubcategoryId {
    pub fn new(id: i64) -> Self {
        SubcategoryId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubcategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubcategoryId {
    fn from(id: i64) -> Self {
        SubcategoryId(id)
    }
}

/// Opaque identifier of an enterprise, generated by the store on insert
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EnterpriseId(String);

impl EnterpriseId {
    pub fn new(id: impl Into<String>) -> Self {
        EnterpriseId(id.into())
    }

    /// Generate a fresh random identifier (UUID v4), the way the hosted store does
    pub fn generate() -> Self {
        EnterpriseId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnterpriseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EnterpriseId {
    fn from(s: String) -> Self {
        EnterpriseId(s)
    }
}

impl From<&str> for EnterpriseId {
    fn from(s: &str) -> Self {
        EnterpriseId(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_id() {
        let id = CategoryId::new(3);
        assert_eq!(id.as_i64(), 3);
        assert_eq!(format!("{}", id), "3");

        let id2: CategoryId = 7.into();
        assert!(id < id2);
    }

    #[test]
    fn test_enterprise_id_serializes_as_plain_string() {
        let id = EnterpriseId::new("b0c1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"b0c1\"");

        let back: EnterpriseId = serde_json::from_str("\"b0c1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EnterpriseId::generate();
        let b = EnterpriseId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }
}
