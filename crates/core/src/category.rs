//! Category entity model and DTOs.
//!
//! Categories are the orderable, referenceable entities this workspace
//! manages. Articles in the newsroom collection point back at a category by
//! its `id`; that reference is what the deletion guard protects.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::{RecordId, Timestamp};

/// A category record as stored in the hosted collection.
///
/// Field presence on the wire varies (older rows predate `color`/`icon`),
/// so optional display fields default to `None` and the ordering fields
/// fall back to the store's column defaults: `sort_order` 0, `is_active`
/// true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: RecordId,
    pub name: String,
    /// URL-safe identifier, unique within the collection. Immutable.
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display hint (`#rrggbb`). No semantic meaning.
    #[serde(default)]
    pub color: Option<String>,
    /// Display hint (icon name). No semantic meaning.
    #[serde(default)]
    pub icon: Option<String>,
    /// Position key: ascending `sort_order` defines the display order.
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Maintained by the store; absent on records from older exports.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn default_is_active() -> bool {
    true
}

/// DTO for editing a category's non-ordering fields. Only non-`None`
/// fields are applied. Slug is immutable and cannot be changed;
/// `sort_order` only moves through the reorder flow and `is_active`
/// only through the toggle flow.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = validate_color))]
    pub color: Option<String>,
    #[validate(length(max = 64, message = "icon must be at most 64 characters"))]
    pub icon: Option<String>,
}

impl UpdateCategory {
    /// Returns `true` if the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.icon.is_none()
    }

    /// The store-facing field map for this patch (only provided fields).
    pub fn to_fields(&self) -> serde_json::Value {
        let mut fields = serde_json::Map::new();
        if let Some(name) = &self.name {
            fields.insert("name".into(), serde_json::json!(name));
        }
        if let Some(description) = &self.description {
            fields.insert("description".into(), serde_json::json!(description));
        }
        if let Some(color) = &self.color {
            fields.insert("color".into(), serde_json::json!(color));
        }
        if let Some(icon) = &self.icon {
            fields.insert("icon".into(), serde_json::json!(icon));
        }
        serde_json::Value::Object(fields)
    }

    /// Apply the patch to an in-memory record.
    pub fn apply_to(&self, record: &mut CategoryRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(description) = &self.description {
            record.description = Some(description.clone());
        }
        if let Some(color) = &self.color {
            record.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            record.icon = Some(icon.clone());
        }
    }
}

/// A color hint must be a `#rrggbb` hex triplet.
fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("color");
        err.message = Some("color must be a hex value like #aa3322".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CategoryRecord {
        CategoryRecord {
            id: id.to_string(),
            name: "Politics".to_string(),
            slug: "politics".to_string(),
            description: None,
            color: None,
            icon: None,
            sort_order: 0,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    // -- wire decoding -------------------------------------------------------

    #[test]
    fn decodes_record_with_all_fields() {
        let raw = serde_json::json!({
            "id": "c1",
            "name": "Politics",
            "slug": "politics",
            "description": "National and local politics",
            "color": "#aa3322",
            "icon": "gavel",
            "sort_order": 3,
            "is_active": false,
        });
        let rec: CategoryRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.sort_order, 3);
        assert!(!rec.is_active);
        assert_eq!(rec.color.as_deref(), Some("#aa3322"));
    }

    #[test]
    fn decodes_sparse_record_with_defaults() {
        let raw = serde_json::json!({
            "id": "c2",
            "name": "Sports",
            "slug": "sports",
        });
        let rec: CategoryRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(rec.description, None);
        assert_eq!(rec.sort_order, 0);
        assert!(rec.is_active);
    }

    // -- UpdateCategory ------------------------------------------------------

    #[test]
    fn patch_serializes_only_provided_fields() {
        let patch = UpdateCategory {
            name: Some("World".to_string()),
            icon: Some("globe".to_string()),
            ..Default::default()
        };
        let fields = patch.to_fields();
        assert_eq!(fields["name"], "World");
        assert_eq!(fields["icon"], "globe");
        assert!(fields.get("description").is_none());
        assert!(fields.get("color").is_none());
    }

    #[test]
    fn patch_applies_in_place() {
        let mut rec = record("c1");
        let patch = UpdateCategory {
            description: Some("Front page".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut rec);
        assert_eq!(rec.description.as_deref(), Some("Front page"));
        assert_eq!(rec.name, "Politics"); // untouched
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(UpdateCategory::default().is_empty());
        assert!(!UpdateCategory {
            name: Some("x".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn rejects_empty_name() {
        let patch = UpdateCategory {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn accepts_valid_color() {
        let patch = UpdateCategory {
            color: Some("#1A2b3C".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["aa3322", "#12345", "#12345g", "#1234567"] {
            let patch = UpdateCategory {
                color: Some(bad.to_string()),
                ..Default::default()
            };
            assert!(patch.validate().is_err(), "{bad} should be rejected");
        }
    }
}
