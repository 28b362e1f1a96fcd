//! Reverse substitution of numbered mask tokens

use std::collections::HashMap;

use regex::{Captures, Regex};
use tracing::{debug, warn};
use veil_core::{RestoreMapEntry, RestoreOutcome};

/// Replace every literal occurrence of each entry's numbered replacement
/// with its original text.
///
/// Entries whose replacement no longer occurs in `text` (edited or deleted
/// by the user) are skipped; partial restoration is not an error. The text
/// is scanned once, so restored originals are never substituted again.
pub fn restore(text: &str, restore_map: &[RestoreMapEntry]) -> RestoreOutcome {
    // First entry wins when a replacement is listed twice.
    let mut lookup: HashMap<&str, &str> = HashMap::new();
    for entry in restore_map {
        let token = entry.numbered_replacement.as_str();
        if !token.is_empty() && text.contains(token) {
            lookup.entry(token).or_insert(entry.original.as_str());
        }
    }

    if lookup.is_empty() {
        return RestoreOutcome {
            restored: text.to_string(),
            applied_count: 0,
        };
    }

    let mut tokens: Vec<&str> = lookup.keys().copied().collect();
    // Longest first so a token never shadows a longer one sharing its prefix.
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    let restored = match Regex::new(&alternation) {
        Ok(regex) => regex
            .replace_all(text, |caps: &Captures| {
                let found = &caps[0];
                lookup.get(found).copied().unwrap_or(found).to_string()
            })
            .into_owned(),
        Err(e) => {
            warn!(
                error = %e,
                entries = tokens.len(),
                "restore pattern too large, substituting sequentially"
            );
            tokens.iter().fold(text.to_string(), |acc, &token| {
                acc.replace(token, lookup.get(token).copied().unwrap_or(token))
            })
        }
    };

    debug!(
        applied = lookup.len(),
        available = restore_map.len(),
        "restored masked text"
    );

    RestoreOutcome {
        restored,
        applied_count: lookup.len(),
    }
}
