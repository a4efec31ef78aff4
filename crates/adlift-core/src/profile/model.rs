//! User profile domain model.
//!
//! Represents the target-user persona a campaign addresses. The four
//! sub-documents are opaque attribute maps: the orchestrator stores and
//! forwards them to the creative generator but never inspects their contents,
//! so new attributes can be added without touching this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single attribute value inside a profile sub-document.
///
/// Untagged so that plain JSON scalars and string lists deserialize directly,
/// matching the loosely-structured documents the creation wizard submits.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Free-text attribute (e.g. `age_range: "25-34"`)
    Text(String),
    /// Numeric attribute (e.g. a 1-5 personality-trait score)
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// List of strings (e.g. `hobbies: ["cycling", "cooking"]`)
    List(Vec<String>),
}

/// A named-attribute mapping, the shape of every profile sub-document.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// A target-user persona.
///
/// Created once per campaign-creation flow (or standalone via the profile
/// service), mutated in place by profile edits, and never deleted by the
/// orchestrator. Campaigns reference profiles by id.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the persona
    pub name: String,
    /// Age, gender, location and similar attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<AttributeMap>,
    /// Values, motivations, personality traits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychographics: Option<AttributeMap>,
    /// Occupation, hobbies, daily environments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<AttributeMap>,
    /// Preferred platforms, visual style, music
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_preferences: Option<AttributeMap>,
    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a new profile with a fresh UUID and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            demographics: None,
            psychographics: None,
            lifestyle: None,
            media_preferences: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_has_unique_id() {
        let a = UserProfile::new("Alex");
        let b = UserProfile::new("Alex");
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Alex");
        assert!(a.demographics.is_none());
    }

    #[test]
    fn test_attribute_value_deserializes_untagged() {
        let map: AttributeMap = serde_json::from_str(
            r#"{"age_range": "25-34", "tech_savviness": 4.0, "urban": true, "hobbies": ["cycling"]}"#,
        )
        .unwrap();
        assert_eq!(
            map.get("age_range"),
            Some(&AttributeValue::Text("25-34".to_string()))
        );
        assert_eq!(map.get("tech_savviness"), Some(&AttributeValue::Number(4.0)));
        assert_eq!(map.get("urban"), Some(&AttributeValue::Flag(true)));
        assert_eq!(
            map.get("hobbies"),
            Some(&AttributeValue::List(vec!["cycling".to_string()]))
        );
    }
}
