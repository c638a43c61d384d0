//! Identity label catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered catalog of the identity labels the remote model can output.
///
/// Position `i` of a returned score vector always maps to catalog entry
/// `i`. The ordering is shared with the server-side model and is
/// append-only: reordering or removing entries on one side silently
/// corrupts every result until both sides are updated together. The
/// catalog cannot detect that drift; it only guards vector length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LabelCatalog(Vec<String>);

impl LabelCatalog {
    /// Create a catalog from labels already in server output order.
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    /// Convenience constructor for string literals.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label at catalog position `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Catalog position of `label`, matched ASCII-case-insensitively.
    ///
    /// Server responses are inconsistent about casing; the catalog is an
    /// ordering and rendering aid, not an authority, so a loose match is
    /// the right call here.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|l| l.eq_ignore_ascii_case(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for LabelCatalog {
    fn from(labels: Vec<String>) -> Self {
        Self(labels)
    }
}

impl FromIterator<String> for LabelCatalog {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
