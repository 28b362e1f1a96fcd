//! Masking engine: rewrites detected secrets into mask tokens

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use veil_core::{
    CategoryToggles, CustomPattern, DetectionResult, MaskResult, Match, RestorableMaskResult,
    RestoreMapEntry,
};

use crate::catalogue::Catalogue;
use crate::detector::Detector;

/// Masks secrets found by a [`Detector`]
#[derive(Debug, Clone, Copy)]
pub struct Masker<'c> {
    detector: Detector<'c>,
}

impl Masker<'static> {
    pub fn builtin() -> Self {
        Self::new(Detector::builtin())
    }
}

impl Default for Masker<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'c> Masker<'c> {
    pub fn new(detector: Detector<'c>) -> Self {
        Self { detector }
    }

    pub fn with_catalogue(catalogue: &'c Catalogue) -> Self {
        Self::new(Detector::new(catalogue))
    }

    pub fn detector(&self) -> &Detector<'c> {
        &self.detector
    }

    /// Irreversible masking: every match becomes its fixed token (`[AWS_KEY]`)
    pub fn mask_secrets(
        &self,
        text: &str,
        categories: Option<&CategoryToggles>,
        custom_patterns: &[CustomPattern],
    ) -> MaskResult {
        let detection = self.detector.detect(text, categories, custom_patterns);
        mask_detected(text, &detection)
    }

    /// Reversible masking: every match becomes a numbered token (`[AWS_KEY_1]`)
    /// and is recorded in the returned restore map.
    pub fn mask_with_restore(
        &self,
        text: &str,
        categories: Option<&CategoryToggles>,
        custom_patterns: &[CustomPattern],
    ) -> RestorableMaskResult {
        let detection = self.detector.detect(text, categories, custom_patterns);
        mask_detected_with_restore(text, &detection)
    }
}

/// Rewrite `text` using an existing detection result over that same text
pub fn mask_detected(text: &str, detection: &DetectionResult) -> MaskResult {
    let masked = rewrite(text, &detection.matches, |m| m.replacement.render());

    let mut custom_pattern_counts = BTreeMap::new();
    for m in detection.matches.iter().filter(|m| m.custom) {
        *custom_pattern_counts.entry(m.rule_id.clone()).or_insert(0) += 1;
    }

    debug!(replacements = detection.count, "masked text");

    MaskResult {
        masked,
        replacements: detection.count,
        category_counts: detection.category_counts.clone(),
        custom_pattern_counts,
    }
}

/// Reversible variant of [`mask_detected`]. Numbering restarts at 1 for
/// every counter on each call.
pub fn mask_detected_with_restore(text: &str, detection: &DetectionResult) -> RestorableMaskResult {
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut restore_map = Vec::with_capacity(detection.count);

    let masked = rewrite(text, &detection.matches, |m| {
        let n = counters.entry(m.replacement.counter()).or_insert(0);
        *n += 1;

        let numbered = m.replacement.render_numbered(*n);
        restore_map.push(RestoreMapEntry {
            numbered_replacement: numbered.clone(),
            original: m.original_text.clone(),
            kind: m.rule_id.clone(),
        });
        numbered
    });

    debug!(replacements = detection.count, "masked text with restore map");

    RestorableMaskResult {
        masked,
        replacements: detection.count,
        restore_map,
    }
}

/// Positional rewrite against the unmodified source.
///
/// `matches` must be ascending and non-overlapping; output is built in one
/// pass so inserted tokens are never searched or replaced again.
fn rewrite<'m>(
    text: &str,
    matches: &'m [Match],
    mut render: impl FnMut(&'m Match) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in matches {
        out.push_str(&text[last..m.start]);
        out.push_str(&render(m));
        last = m.end;
    }
    out.push_str(&text[last..]);

    out
}
