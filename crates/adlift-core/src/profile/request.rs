//! Profile creation and update request models.

use serde::{Deserialize, Serialize};

use super::model::{AttributeMap, UserProfile};
use crate::error::{AdliftError, Result};

/// Request to create a new user profile.
///
/// Submitted standalone by the profile editor or as the persona part of a
/// campaign-creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    /// Display name (required)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychographics: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_preferences: Option<AttributeMap>,
}

impl CreateProfileRequest {
    /// Validate the request and return the first offending field if any.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AdliftError::validation(
                "persona.name",
                "persona name is required and cannot be empty",
            ));
        }
        Ok(())
    }

    /// Convert this request into a `UserProfile`, always generating a new UUID.
    pub fn into_profile(self) -> UserProfile {
        let mut profile = UserProfile::new(self.name);
        profile.demographics = self.demographics;
        profile.psychographics = self.psychographics;
        profile.lifestyle = self.lifestyle;
        profile.media_preferences = self.media_preferences;
        profile
    }
}

/// PATCH-style request to update an existing profile.
///
/// Only fields that are `Some` are applied; absent fields leave the stored
/// value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psychographics: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<AttributeMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_preferences: Option<AttributeMap>,
}

impl UpdateProfileRequest {
    /// Applies the update to a stored profile in place.
    pub fn apply(self, profile: &mut UserProfile) -> Result<()> {
        if let Some(name) = self.name {
            if name.trim().is_empty() {
                return Err(AdliftError::validation(
                    "persona.name",
                    "persona name cannot be emptied",
                ));
            }
            profile.name = name;
        }
        if self.demographics.is_some() {
            profile.demographics = self.demographics;
        }
        if self.psychographics.is_some() {
            profile.psychographics = self.psychographics;
        }
        if self.lifestyle.is_some() {
            profile.lifestyle = self.lifestyle;
        }
        if self.media_preferences.is_some() {
            profile.media_preferences = self.media_preferences;
        }
        Ok(())
    }
}
