//! Submission checks for new enterprises
//!
//! Runs before anything is sent to the store. All field errors are collected
//! so the form can show them together.

use crate::geo::GeoPoint;
use crate::model::NewEnterprise;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Form field an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Category,
    Website,
    Address,
    Coordinates,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Website => "website",
            Field::Address => "address",
            Field::Coordinates => "coordinates",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// One or more field-level problems with a submission
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Message for `field`, if it failed
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: Field) -> bool {
        self.message_for(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

static WEBSITE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+")
        .expect("website pattern is a valid regex")
});

/// Loose website check: optional scheme, then something that looks like a host
pub fn is_valid_website(website: &str) -> bool {
    WEBSITE_PATTERN.is_match(website)
}

impl NewEnterprise {
    /// Check the draft as submitted. Blank optional fields count as absent.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        if self.name.trim().is_empty() {
            fail(Field::Name, "Name is required");
        }
        if self.category.trim().is_empty() {
            fail(Field::Category, "Category is required");
        }
        if let Some(website) = self.website.as_deref().filter(|w| !w.trim().is_empty()) {
            if !is_valid_website(website.trim()) {
                fail(Field::Website, "Please enter a valid URL");
            }
        }
        if self.has_location {
            if self.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
                fail(Field::Address, "Address is required when adding a location");
            }
            match (self.latitude, self.longitude) {
                (Some(lat), Some(lng)) => {
                    if !GeoPoint::new(lat, lng).is_valid() {
                        fail(Field::Coordinates, "Coordinates are out of range");
                    }
                }
                _ => fail(Field::Coordinates, "Select an address to set coordinates"),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_draft_is_valid() {
        assert!(NewEnterprise::new("Mycelium Network", "Network Organizers").validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let err = NewEnterprise::new(" ", "").validate().unwrap_err();
        assert_eq!(err.len(), 2);
        assert_eq!(err.message_for(Field::Name), Some("Name is required"));
        assert_eq!(err.message_for(Field::Category), Some("Category is required"));
    }

    #[test]
    fn test_website_pattern() {
        assert!(is_valid_website("https://example.com"));
        assert!(is_valid_website("www.regen-farm.org"));
        assert!(is_valid_website("seedbank.io/about"));
        assert!(!is_valid_website("not a url"));
        assert!(!is_valid_website("localhost"));

        let err = NewEnterprise::new("A", "Land Projects")
            .with_website("nope")
            .validate()
            .unwrap_err();
        assert_eq!(err.message_for(Field::Website), Some("Please enter a valid URL"));
    }

    #[test]
    fn test_blank_website_is_ignored() {
        let draft = NewEnterprise::new("A", "Land Projects").with_website("  ");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_location_needs_address_and_coordinates() {
        let mut draft = NewEnterprise::new("A", "Land Projects");
        draft.has_location = true;

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.message_for(Field::Address),
            Some("Address is required when adding a location")
        );
        assert!(err.has(Field::Coordinates));

        let ok = draft.with_location("12 Hedgerow Rd, Ithaca, NY", GeoPoint::new(42.44, -76.5));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let draft = NewEnterprise::new("A", "Land Projects")
            .with_location("Nowhere", GeoPoint::new(120.0, 0.0));
        let err = draft.validate().unwrap_err();
        assert_eq!(err.message_for(Field::Coordinates), Some("Coordinates are out of range"));
    }

    #[test]
    fn test_error_display_lists_fields() {
        let err = NewEnterprise::new("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "name: Name is required; category: Category is required");
    }
}
