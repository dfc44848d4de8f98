//! Request and response shapes shared by the clients

use serde::{Deserialize, Serialize};

/// Constraints for a "list enterprises" request
///
/// Both parts are optional. Subcategories use "contains any of" semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnterpriseFilter {
    pub category: Option<String>,
    pub subcategories: Vec<String>,
}

impl EnterpriseFilter {
    /// No constraint: every enterprise
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            subcategories: Vec::new(),
        }
    }

    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = subcategories.into_iter().map(Into::into).collect();
        self
    }
}

/// Error body returned by the hosted table API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable description, falling back to `fallback`
    pub fn describe(&self, fallback: &str) -> String {
        let mut text = self.message.clone().unwrap_or_else(|| fallback.to_string());
        if let Some(details) = &self.details {
            text.push_str(&format!(" ({})", details));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builders() {
        let filter = EnterpriseFilter::in_category("Land Projects").with_subcategories(["Forestry"]);
        assert_eq!(filter.category.as_deref(), Some("Land Projects"));
        assert_eq!(filter.subcategories, vec!["Forestry"]);
        assert_eq!(EnterpriseFilter::all(), EnterpriseFilter::default());
    }

    #[test]
    fn test_error_body_description() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{"message":"permission denied for table enterprises","code":"42501","details":null,"hint":null}"#,
        )
        .unwrap();
        assert_eq!(body.describe("403"), "permission denied for table enterprises");
        assert_eq!(ApiErrorBody::default().describe("500 Internal Server Error"), "500 Internal Server Error");
    }
}
