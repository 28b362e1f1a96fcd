//! User settings consumed by detection and masking

use serde::{Deserialize, Serialize};

use crate::{Category, CategoryToggles};

/// A user-supplied detector layered on top of the built-in catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPattern {
    pub id: String,
    /// Regular expression source
    pub pattern: String,
    pub category: Category,
    /// Placeholder name, with or without surrounding brackets
    #[serde(default)]
    pub mask_token: String,
}

impl CustomPattern {
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        category: impl Into<Category>,
        mask_token: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            category: category.into(),
            mask_token: mask_token.into(),
        }
    }

    /// Bare placeholder label: `[INTERNAL_ID]` and `INTERNAL_ID` both yield `INTERNAL_ID`.
    /// Falls back to the upper-cased id when no token is configured.
    pub fn label(&self) -> String {
        let trimmed = self
            .mask_token
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();

        if trimmed.is_empty() {
            self.id.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }
}

/// Settings as delivered by the settings source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Master switch for paste and field masking
    pub enabled: bool,
    pub categories: CategoryToggles,
    pub custom_patterns: Vec<CustomPattern>,
    pub enable_restoration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            categories: CategoryToggles::default(),
            custom_patterns: Vec::new(),
            enable_restoration: true,
        }
    }
}

impl Settings {
    /// Best-effort settings used when the settings source is unreachable:
    /// default categories, no custom patterns, restoration off.
    pub fn fallback() -> Self {
        Self {
            enable_restoration: false,
            ..Self::default()
        }
    }
}
