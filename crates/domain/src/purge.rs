//! Purge requests: what to invalidate, how, and on which configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PurgeHubError, ValidationError};
use crate::id::ConfigId;

/// What a purge job invalidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgeType {
    /// Everything cached for the zone. Never carries targets.
    #[default]
    PurgeAll,
    /// Exact URLs.
    PurgeUrl,
    /// Directory / path prefixes.
    PurgePrefix,
    /// Whole hostnames.
    PurgeHost,
    /// Cache tags.
    PurgeCacheTag,
}

impl PurgeType {
    /// Every purge type, in display order.
    pub const ALL: [Self; 5] = [
        Self::PurgeAll,
        Self::PurgeUrl,
        Self::PurgePrefix,
        Self::PurgeHost,
        Self::PurgeCacheTag,
    ];

    /// Wire code (`purge_all`, `purge_url`, …).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PurgeAll => "purge_all",
            Self::PurgeUrl => "purge_url",
            Self::PurgePrefix => "purge_prefix",
            Self::PurgeHost => "purge_host",
            Self::PurgeCacheTag => "purge_cache_tag",
        }
    }

    /// Human-readable label for selectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PurgeAll => "Purge everything",
            Self::PurgeUrl => "By URL",
            Self::PurgePrefix => "By directory prefix",
            Self::PurgeHost => "By hostname",
            Self::PurgeCacheTag => "By cache tag",
        }
    }

    /// Whether this type takes a target list.
    #[must_use]
    pub fn takes_targets(self) -> bool {
        self != Self::PurgeAll
    }

    /// Parse a wire code. Returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == code)
    }
}

impl fmt::Display for PurgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the provider invalidates matched content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurgeMethod {
    /// Mark cached content stale; the edge revalidates with the origin.
    Invalidate,
    /// Drop cached content outright.
    #[default]
    Delete,
}

impl PurgeMethod {
    /// Every purge method, in display order.
    pub const ALL: [Self; 2] = [Self::Delete, Self::Invalidate];

    /// Wire code (`invalidate` / `delete`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalidate => "invalidate",
            Self::Delete => "delete",
        }
    }

    /// Human-readable label for selectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Invalidate => "Mark stale",
            Self::Delete => "Delete",
        }
    }

    /// Parse a wire code. Returns `None` for unknown codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == code)
    }
}

impl fmt::Display for PurgeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single purge submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeRequest {
    pub config_id: ConfigId,
    #[serde(rename = "type", default)]
    pub purge_type: PurgeType,
    #[serde(default)]
    pub method: PurgeMethod,
    #[serde(default)]
    pub targets: Vec<String>,
}

impl PurgeRequest {
    /// Build a request from the raw text of a target list.
    ///
    /// For [`PurgeType::PurgeAll`] the text is ignored and `targets` is
    /// empty; otherwise it is split with [`parse_targets`].
    #[must_use]
    pub fn from_form(
        config_id: ConfigId,
        purge_type: PurgeType,
        method: PurgeMethod,
        raw_targets: &str,
    ) -> Self {
        let targets = if purge_type.takes_targets() {
            parse_targets(raw_targets)
        } else {
            Vec::new()
        };
        Self {
            config_id,
            purge_type,
            method,
            targets,
        }
    }

    /// Return the request with targets dropped when the type takes none.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.purge_type.takes_targets() {
            self.targets = self
                .targets
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        } else {
            self.targets.clear();
        }
        self
    }

    /// Check that a targeted purge names at least one target.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingTargets`] for a targeted type with
    /// an empty target list.
    pub fn validate(&self) -> Result<(), PurgeHubError> {
        if self.purge_type.takes_targets() && self.targets.is_empty() {
            return Err(ValidationError::MissingTargets(self.purge_type.as_str()).into());
        }
        Ok(())
    }
}

/// Split a multi-line target list into trimmed, non-empty lines.
#[must_use]
pub fn parse_targets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// What the provider hands back for an accepted purge job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeReceipt {
    /// Provider job identifier, when one was issued.
    pub job_id: Option<String>,
    /// Targets the provider refused, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_targets: Vec<String>,
}
