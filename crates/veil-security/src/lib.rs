//! Secret detection, masking and restoration for veil
//!
//! The entry points below run against the built-in catalogue. Use
//! [`Detector`] and [`Masker`] directly to run a different [`Catalogue`].

pub mod catalogue;
pub mod detector;
pub mod masker;
pub mod restore;

pub use catalogue::{BUILTIN_RULES, Catalogue, PatternRule, RuleSpec, compile_custom};
pub use detector::Detector;
pub use masker::{Masker, mask_detected, mask_detected_with_restore};
pub use restore::restore;

use veil_core::{
    CategoryToggles, CustomPattern, DetectionResult, MaskResult, RestorableMaskResult,
};

/// Detect secrets using the built-in catalogue
pub fn detect(
    text: &str,
    categories: Option<&CategoryToggles>,
    custom_patterns: &[CustomPattern],
) -> DetectionResult {
    Detector::builtin().detect(text, categories, custom_patterns)
}

/// Replace every detected secret with its fixed mask token
pub fn mask_secrets(
    text: &str,
    categories: Option<&CategoryToggles>,
    custom_patterns: &[CustomPattern],
) -> MaskResult {
    Masker::builtin().mask_secrets(text, categories, custom_patterns)
}

/// Replace every detected secret with a numbered token and return the restore map
pub fn mask_with_restore(
    text: &str,
    categories: Option<&CategoryToggles>,
    custom_patterns: &[CustomPattern],
) -> RestorableMaskResult {
    Masker::builtin().mask_with_restore(text, categories, custom_patterns)
}
