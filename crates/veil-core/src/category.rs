//! Secret categories and the toggles that gate them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named grouping of related secret types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    CloudKeys,
    ApiTokens,
    PrivateKeys,
    Passwords,
    Database,
    /// Opt-in: URLs, domains, request lines and IP addresses
    Network,
    /// Opt-in: email addresses
    Pii,
    /// User-defined category introduced by a custom pattern
    Custom(String),
}

/// Built-in categories in catalogue order
static BUILTIN: [Category; 7] = [
    Category::CloudKeys,
    Category::ApiTokens,
    Category::PrivateKeys,
    Category::Passwords,
    Category::Database,
    Category::Network,
    Category::Pii,
];

impl Category {
    pub fn builtin() -> &'static [Category] {
        &BUILTIN
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::CloudKeys => "cloud_keys",
            Category::ApiTokens => "api_tokens",
            Category::PrivateKeys => "private_keys",
            Category::Passwords => "passwords",
            Category::Database => "database",
            Category::Network => "network",
            Category::Pii => "pii",
            Category::Custom(name) => name,
        }
    }

    /// Opt-in categories are disabled unless explicitly switched on
    pub fn is_opt_in(&self) -> bool {
        matches!(self, Category::Network | Category::Pii)
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }

    pub fn enabled_by_default(&self) -> bool {
        !self.is_opt_in()
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "cloud_keys" => Category::CloudKeys,
            "api_tokens" => Category::ApiTokens,
            "private_keys" => Category::PrivateKeys,
            "passwords" => Category::Passwords,
            "database" => Category::Database,
            "network" => Category::Network,
            "pii" => Category::Pii,
            other => Category::Custom(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match Category::from(name.as_str()) {
            Category::Custom(_) => Category::Custom(name),
            builtin => builtin,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Explicit per-category switches.
///
/// Categories missing from the map use their default: built-ins on,
/// `network` and `pii` off, custom categories on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryToggles(BTreeMap<Category, bool>);

impl CategoryToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in category switched on, opt-in ones included
    pub fn all() -> Self {
        Self(Category::builtin().iter().map(|c| (c.clone(), true)).collect())
    }

    pub fn with(mut self, category: impl Into<Category>, enabled: bool) -> Self {
        self.set(category, enabled);
        self
    }

    pub fn set(&mut self, category: impl Into<Category>, enabled: bool) {
        self.0.insert(category.into(), enabled);
    }

    pub fn is_enabled(&self, category: &Category) -> bool {
        self.0
            .get(category)
            .copied()
            .unwrap_or_else(|| category.enabled_by_default())
    }

    /// Built-in categories that are currently active, in catalogue order
    pub fn enabled_builtins(&self) -> impl Iterator<Item = &'static Category> + '_ {
        Category::builtin().iter().filter(|c| self.is_enabled(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, bool)> {
        self.0.iter().map(|(c, enabled)| (c, *enabled))
    }
}

impl FromIterator<(Category, bool)> for CategoryToggles {
    fn from_iter<I: IntoIterator<Item = (Category, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
