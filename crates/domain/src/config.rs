//! Purge configuration: a named set of CDN provider credentials bound to a zone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PurgeHubError, ValidationError};
use crate::id::ConfigId;
use crate::time::Timestamp;

/// Shown wherever a configuration has no display name.
pub const UNNAMED: &str = "Unnamed";

/// Replacement text for masked credential material.
const MASK: &str = "***";

/// Number of leading `secret_id` characters kept visible in listings.
const SECRET_ID_VISIBLE_CHARS: usize = 8;

/// Provider region a configuration targets.
///
/// Serialised as the provider's short code. Any code other than `cn` is
/// treated as international.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Region {
    /// Mainland China edge network (`cn`).
    #[default]
    Domestic,
    /// Global edge network (`intl`).
    International,
}

impl Region {
    /// Every selectable region, in display order.
    pub const ALL: [Self; 2] = [Self::Domestic, Self::International];

    /// Short code used on the wire and in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "cn",
            Self::International => "intl",
        }
    }

    /// Human-readable label for tables and selectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::International => "International",
        }
    }
}

impl From<&str> for Region {
    fn from(code: &str) -> Self {
        if code.trim() == "cn" {
            Self::Domestic
        } else {
            Self::International
        }
    }
}

impl From<String> for Region {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.as_str().to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored purge configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeConfig {
    pub id: ConfigId,
    #[serde(default)]
    pub name: Option<String>,
    pub secret_id: String,
    pub secret_key: String,
    pub zone_id: String,
    pub region: Region,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PurgeConfig {
    /// Name to display, falling back to [`UNNAMED`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED)
    }

    /// Return a copy safe to list: the key is fully hidden and only a
    /// prefix of the secret id stays visible.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.secret_id = mask_secret_id(&self.secret_id);
        self.secret_key = MASK.to_string();
        self
    }

    /// Merge a draft into this configuration.
    ///
    /// Empty draft fields keep the stored value, so an edit form may leave
    /// the secret blank to keep it. `region` is always taken from the draft.
    pub fn apply(&mut self, draft: ConfigDraft, at: Timestamp) {
        let draft = draft.normalized();
        if draft.name.is_some() {
            self.name = draft.name;
        }
        if !draft.secret_id.is_empty() {
            self.secret_id = draft.secret_id;
        }
        if !draft.secret_key.is_empty() {
            self.secret_key = draft.secret_key;
        }
        if !draft.zone_id.is_empty() {
            self.zone_id = draft.zone_id;
        }
        self.region = draft.region;
        self.updated_at = at;
    }
}

impl fmt::Debug for PurgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurgeConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret_id", &mask_secret_id(&self.secret_id))
            .field("secret_key", &MASK)
            .field("zone_id", &self.zone_id)
            .field("region", &self.region)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

fn mask_secret_id(secret_id: &str) -> String {
    if secret_id.chars().count() > SECRET_ID_VISIBLE_CHARS {
        let visible: String = secret_id.chars().take(SECRET_ID_VISIBLE_CHARS).collect();
        format!("{visible}{MASK}")
    } else {
        MASK.to_string()
    }
}

/// The flat form record sent when creating or updating a configuration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub secret_id: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub region: Region,
}

impl ConfigDraft {
    /// Trim every text field and turn a blank name into `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            secret_id: self.secret_id.trim().to_string(),
            secret_key: self.secret_key.trim().to_string(),
            zone_id: self.zone_id.trim().to_string(),
            region: self.region,
        }
    }

    /// Check that a draft carries everything a new configuration needs.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] naming the first empty
    /// required field.
    pub fn validate_for_create(&self) -> Result<(), PurgeHubError> {
        let required = [
            ("secret_id", &self.secret_id),
            ("secret_key", &self.secret_key),
            ("zone_id", &self.zone_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field).into());
            }
        }
        Ok(())
    }

    /// Build a draft pre-filled from a stored configuration (edit form).
    #[must_use]
    pub fn from_config(config: &PurgeConfig) -> Self {
        Self {
            name: config.name.clone(),
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
            zone_id: config.zone_id.clone(),
            region: config.region,
        }
    }
}

impl fmt::Debug for ConfigDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigDraft")
            .field("name", &self.name)
            .field("secret_id", &mask_secret_id(&self.secret_id))
            .field("zone_id", &self.zone_id)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
