//! Core domain models for veil
//!
//! This crate contains:
//! - Secret categories and per-category toggles
//! - Detection results (matches, counts, replacement shapes)
//! - Masking and restore-map types shared by the engine and storage layers
//! - User settings as delivered by the settings source

pub mod category;
pub mod detection;
pub mod error;
pub mod field;
pub mod mask;
pub mod settings;

pub use category::{Category, CategoryToggles};
pub use detection::{DetectionResult, MaskPiece, Match, Replacement};
pub use error::{CoreError, Result};
pub use field::FieldStatus;
pub use mask::{MaskResult, RestorableMaskResult, RestoreMapEntry, RestoreOutcome};
pub use settings::{CustomPattern, Settings};
