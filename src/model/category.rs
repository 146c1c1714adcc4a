use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Memo category. Known keys get their own variant; any other value is kept
/// verbatim in `Unrecognized` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Personal,
    Work,
    Study,
    Idea,
    Other,
    Unrecognized(String),
}

/// Visual style token for a category badge. The theme resolves it to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStyle {
    Blue,
    Green,
    Purple,
    Yellow,
    Gray,
}

impl CategoryStyle {
    /// Token used for categories without a style of their own
    pub const DEFAULT: CategoryStyle = CategoryStyle::Gray;

    pub fn name(self) -> &'static str {
        match self {
            CategoryStyle::Blue => "blue",
            CategoryStyle::Green => "green",
            CategoryStyle::Purple => "purple",
            CategoryStyle::Yellow => "yellow",
            CategoryStyle::Gray => "gray",
        }
    }
}

impl Category {
    /// All known categories, in display order
    pub const KNOWN: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Study,
        Category::Idea,
        Category::Other,
    ];

    /// Map a raw category key. Never fails: unknown keys become `Unrecognized`.
    pub fn parse(raw: &str) -> Category {
        Category::KNOWN
            .iter()
            .find(|known| known.key() == raw)
            .cloned()
            .unwrap_or_else(|| Category::Unrecognized(raw.to_string()))
    }

    /// The raw key as it appears in the memo collection
    pub fn key(&self) -> &str {
        match self {
            Category::Personal => "personal",
            Category::Work => "work",
            Category::Study => "study",
            Category::Idea => "idea",
            Category::Other => "other",
            Category::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }

    /// Built-in human-readable label; unrecognized values are shown as-is
    pub fn label(&self) -> &str {
        match self {
            Category::Personal => "개인",
            Category::Work => "업무",
            Category::Study => "학습",
            Category::Idea => "아이디어",
            Category::Other => "기타",
            Category::Unrecognized(raw) => raw,
        }
    }

    pub fn style_token(&self) -> CategoryStyle {
        match self {
            Category::Personal => CategoryStyle::Blue,
            Category::Work => CategoryStyle::Green,
            Category::Study => CategoryStyle::Purple,
            Category::Idea => CategoryStyle::Yellow,
            Category::Other => CategoryStyle::Gray,
            Category::Unrecognized(_) => CategoryStyle::DEFAULT,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match Category::parse(&raw) {
            Category::Unrecognized(_) => Category::Unrecognized(raw),
            known => known,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unrecognized(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Category labels with per-key overrides from `[ui.category_labels]`.
/// Overrides apply to known categories only.
#[derive(Debug, Clone, Default)]
pub struct CategoryLabels {
    overrides: HashMap<String, String>,
}

impl CategoryLabels {
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        let overrides = overrides
            .iter()
            .filter(|(key, _)| Category::parse(key).is_known())
            .map(|(key, label)| (key.clone(), label.clone()))
            .collect();
        CategoryLabels { overrides }
    }

    pub fn label<'a>(&'a self, category: &'a Category) -> &'a str {
        if category.is_known()
            && let Some(label) = self.overrides.get(category.key())
        {
            return label;
        }
        category.label()
    }
}
