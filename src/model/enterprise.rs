//! Enterprise listings
//!
//! `category` and `subcategories` are denormalized copies of category and
//! subcategory names. Nothing ties them back to the reference rows, so a
//! renamed category leaves older listings under the old name.

use super::types::EnterpriseId;
use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory listing for an organization or project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enterprise {
    pub id: EnterpriseId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub has_location: bool,
    /// Category name (by value, not a foreign key)
    pub category: String,
    /// Subcategory names in submission order
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enterprise {
    /// Coordinates, if the listing is flagged as located and both are present
    pub fn location(&self) -> Option<GeoPoint> {
        if !self.has_location {
            return None;
        }
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }

    /// Exact, case-sensitive tag match
    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }

    /// Path of the detail view for this listing
    pub fn detail_path(&self) -> String {
        format!("/enterprise/{}", self.id)
    }
}

/// Insert payload: every enterprise field except the id and timestamps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewEnterprise {
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub has_location: bool,
    pub category: String,
    pub subcategories: Vec<String>,
    pub is_featured: bool,
}

impl NewEnterprise {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        NewEnterprise {
            name: name.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcategories = subcategories.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a physical location and set `has_location`
    pub fn with_location(mut self, address: impl Into<String>, point: GeoPoint) -> Self {
        self.address = Some(address.into());
        self.latitude = Some(point.lat);
        self.longitude = Some(point.lng);
        self.has_location = true;
        self
    }

    /// Shape the draft the way the submission form sends it.
    ///
    /// Blank description and website become absent, and a draft without the
    /// location flag drops any address and coordinates it still carries.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = non_blank(self.description);
        self.website = non_blank(self.website);
        if self.has_location {
            self.address = non_blank(self.address);
        } else {
            self.address = None;
            self.latitude = None;
            self.longitude = None;
        }
        self
    }

    /// Materialize the stored record
    pub fn into_enterprise(self, id: EnterpriseId, now: DateTime<Utc>) -> Enterprise {
        Enterprise {
            id,
            name: self.name,
            description: self.description,
            website: self.website,
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            has_location: self.has_location,
            category: self.category,
            subcategories: self.subcategories,
            is_featured: self.is_featured,
            created_at: now,
            updated_at: now,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Enterprise {
        NewEnterprise::new("Willow Farm", "Land Projects")
            .with_subcategories(["Permaculture", "Forestry"])
            .into_enterprise(EnterpriseId::new("e-1"), Utc::now())
    }

    #[test]
    fn test_location_requires_flag_and_both_coordinates() {
        let mut e = listing();
        e.latitude = Some(10.0);
        e.longitude = Some(20.0);
        assert!(e.location().is_none());

        e.has_location = true;
        assert_eq!(e.location(), Some(GeoPoint::new(10.0, 20.0)));

        e.longitude = None;
        assert!(e.location().is_none());
    }

    #[test]
    fn test_has_subcategory_is_exact() {
        let e = listing();
        assert!(e.has_subcategory("Forestry"));
        assert!(!e.has_subcategory("forestry"));
    }

    #[test]
    fn test_normalized_clears_location_without_flag() {
        let draft = NewEnterprise {
            address: Some("1 Orchard Ln".into()),
            latitude: Some(1.0),
            longitude: Some(2.0),
            description: Some("   ".into()),
            website: Some(String::new()),
            ..NewEnterprise::new("  Seed Library ", "Network Organizers")
        }
        .normalized();

        assert_eq!(draft.name, "Seed Library");
        assert!(draft.address.is_none());
        assert!(draft.latitude.is_none());
        assert!(draft.description.is_none());
        assert!(draft.website.is_none());
    }

    #[test]
    fn test_enterprise_json_shape() {
        let json = r#"{
            "id": "9f0e",
            "is_featured": true,
            "name": "Commons Fund",
            "description": null,
            "website": "https://commons.example",
            "address": null,
            "latitude": null,
            "longitude": null,
            "has_location": false,
            "category": "Capital Sources",
            "subcategories": ["Grants"],
            "created_at": "2024-03-01T12:00:00+00:00",
            "updated_at": "2024-03-01T12:00:00+00:00"
        }"#;
        let e: Enterprise = serde_json::from_str(json).unwrap();
        assert_eq!(e.id.as_str(), "9f0e");
        assert!(e.is_featured);
        assert_eq!(e.subcategories, vec!["Grants".to_string()]);
        assert_eq!(e.detail_path(), "/enterprise/9f0e");
    }
}
