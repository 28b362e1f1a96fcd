//! Tracked input fields

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use veil_core::{DetectionResult, FieldStatus};

/// Opaque handle for an attached input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// What the UI knows about one field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    /// Field content before the most recent masking
    pub original_value: Option<String>,
    pub is_masked: bool,
    pub last_detection: Option<DetectionResult>,
    pub status: FieldStatus,
}

/// Fields currently being watched
#[derive(Debug)]
pub struct FieldRegistry {
    fields: DashMap<FieldId, FieldState>,
    next_id: AtomicU64,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn attach(&self) -> FieldId {
        let id = FieldId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.fields.insert(id, FieldState::default());
        id
    }

    pub fn detach(&self, id: FieldId) -> Option<FieldState> {
        self.fields.remove(&id).map(|(_, state)| state)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Snapshot of a field's state
    pub fn get(&self, id: FieldId) -> Option<FieldState> {
        self.fields.get(&id).map(|state| state.value().clone())
    }

    /// Mutate a field in place; `None` if it is not attached
    pub fn update<T>(&self, id: FieldId, f: impl FnOnce(&mut FieldState) -> T) -> Option<T> {
        self.fields.get_mut(&id).map(|mut state| f(state.value_mut()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}
