//! Detection results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Category;

/// One segment of the text that replaces a detected secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MaskPiece {
    /// Structure kept from the original match (e.g. `postgres://`)
    Text(String),
    /// Placeholder name, rendered as `[NAME]` or `[NAME_n]`
    Token(String),
}

/// The shape a match is rewritten to.
///
/// Every token piece of one replacement shares the same number in
/// reversible mode; that number is drawn from the counter named by `counter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pieces: Vec<MaskPiece>,
    counter: String,
}

impl Replacement {
    /// A replacement consisting of a single `[LABEL]` token
    pub fn token(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            pieces: vec![MaskPiece::Token(label.clone())],
            counter: label,
        }
    }

    pub fn new(pieces: Vec<MaskPiece>, counter: impl Into<String>) -> Self {
        Self {
            pieces,
            counter: counter.into(),
        }
    }

    pub fn pieces(&self) -> &[MaskPiece] {
        &self.pieces
    }

    pub fn counter(&self) -> &str {
        &self.counter
    }

    /// Render with fixed tokens: `[AWS_KEY]`
    pub fn render(&self) -> String {
        self.render_with(None)
    }

    /// Render with numbered tokens: `[AWS_KEY_2]`
    pub fn render_numbered(&self, n: usize) -> String {
        self.render_with(Some(n))
    }

    fn render_with(&self, n: Option<usize>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match (piece, n) {
                (MaskPiece::Text(text), _) => out.push_str(text),
                (MaskPiece::Token(label), None) => {
                    out.push('[');
                    out.push_str(label);
                    out.push(']');
                }
                (MaskPiece::Token(label), Some(n)) => {
                    out.push_str(&format!("[{}_{}]", label, n));
                }
            }
        }
        out
    }
}

/// A single detected secret occurrence within a source string.
///
/// `start` and `end` are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub category: Category,
    pub rule_id: String,
    pub start: usize,
    pub end: usize,
    pub original_text: String,
    #[serde(skip)]
    pub replacement: Replacement,
    /// Set when the match came from a user-supplied pattern
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub custom: bool,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &Match) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Every match found in one text, ascending by start offset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub matches: Vec<Match>,
    pub count: usize,
    pub category_counts: BTreeMap<Category, usize>,
}

impl DetectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from already-ordered matches, deriving the counts
    pub fn from_matches(matches: Vec<Match>) -> Self {
        let mut category_counts = BTreeMap::new();
        for m in &matches {
            *category_counts.entry(m.category.clone()).or_insert(0) += 1;
        }

        Self {
            count: matches.len(),
            matches,
            category_counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count_for(&self, category: &Category) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }
}
