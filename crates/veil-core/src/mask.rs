//! Masking and restore-map types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Category;

/// Output of an irreversible masking pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskResult {
    pub masked: String,
    pub replacements: usize,
    pub category_counts: BTreeMap<Category, usize>,
    /// Custom pattern id -> replacements made by that pattern
    pub custom_pattern_counts: BTreeMap<String, usize>,
}

/// Output of a reversible masking pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestorableMaskResult {
    pub masked: String,
    pub replacements: usize,
    pub restore_map: Vec<RestoreMapEntry>,
}

/// Maps one numbered replacement back to the text it stood for.
///
/// Serialized with the field names the browser extension writes to
/// session storage, so maps can be exchanged with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreMapEntry {
    pub numbered_replacement: String,
    pub original: String,
    /// Id of the rule that produced the match
    #[serde(rename = "type")]
    pub kind: String,
}

/// Result of substituting restore-map entries back into a text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    pub restored: String,
    /// Number of map entries that occurred in the text at least once
    pub applied_count: usize,
}

impl RestoreOutcome {
    pub fn is_noop(&self) -> bool {
        self.applied_count == 0
    }
}
