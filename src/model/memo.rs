use serde::{Deserialize, Serialize};

use super::category::Category;

/// A memo as it appears in the collection file. Owned by the store; views
/// only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Opaque unique identifier
    pub id: String,
    pub title: String,
    /// Markdown body
    #[serde(default)]
    pub content: String,
    pub category: Category,
    /// Tags (without the `#` prefix), in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// ISO timestamp text
    pub created_at: String,
    /// ISO timestamp text
    pub updated_at: String,
}
