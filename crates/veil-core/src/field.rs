use serde::{Deserialize, Serialize};

use crate::DetectionResult;

/// UI-observable state of a tracked input field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// No secrets detected
    #[default]
    Idle,
    /// Secrets present and not yet masked
    Warning,
    /// Masking applied
    Secured,
}

impl FieldStatus {
    /// Unmasked secrets always warn, even in a field masked earlier
    pub fn classify(detection: &DetectionResult, is_masked: bool) -> Self {
        if !detection.is_empty() {
            FieldStatus::Warning
        } else if is_masked {
            FieldStatus::Secured
        } else {
            FieldStatus::Idle
        }
    }
}
