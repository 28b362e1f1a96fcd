//! Field orchestration for veil
//!
//! Ties detection, masking and restore maps to the lifecycle of tracked
//! input fields: debounced rescans while typing, masking on paste, and
//! restoration on copy.

pub mod debounce;
pub mod field;
pub mod guard;

pub use debounce::Debouncer;
pub use field::{FieldId, FieldRegistry, FieldState};
pub use guard::{FieldEvent, Guard, MaskOutcome, RestoreStatus};
