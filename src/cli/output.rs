use chrono::TimeZone;
use serde::Serialize;

use crate::model::{CategoryLabels, Memo};
use crate::tui::detail::DetailContent;
use crate::tui::markdown::markdown_to_plain;
use crate::util::unicode;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoJson {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub category_label: String,
    pub category_style: &'static str,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Display form of `createdAt`, or the raw text when unparseable
    pub created: String,
    pub updated: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoSummaryJson {
    pub id: String,
    pub title: String,
    pub category: String,
    pub category_label: String,
    pub tags: Vec<String>,
    pub updated_at: String,
}

#[derive(Serialize)]
pub struct DeleteJson {
    pub id: String,
    pub deleted: bool,
    /// Always false: deletions are not written back to the file
    pub persisted: bool,
}

pub fn memo_to_json<Tz: TimeZone>(memo: &Memo, labels: &CategoryLabels, tz: &Tz) -> MemoJson {
    let content = DetailContent::build(memo, labels, tz);
    MemoJson {
        id: memo.id.clone(),
        title: memo.title.clone(),
        content: memo.content.clone(),
        category: memo.category.key().to_string(),
        category_label: content.category_label,
        category_style: content.category_style.name(),
        tags: memo.tags.clone(),
        created_at: memo.created_at.clone(),
        updated_at: memo.updated_at.clone(),
        created: content.created,
        updated: content.updated,
    }
}

pub fn memo_to_summary_json(memo: &Memo, labels: &CategoryLabels) -> MemoSummaryJson {
    MemoSummaryJson {
        id: memo.id.clone(),
        title: memo.title.clone(),
        category: memo.category.key().to_string(),
        category_label: labels.label(&memo.category).to_string(),
        tags: memo.tags.clone(),
        updated_at: memo.updated_at.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per memo: id, label, title, tags
pub fn format_memo_line(memo: &Memo, labels: &CategoryLabels, id_width: usize) -> String {
    let mut line = format!(
        "{}  {}  {}",
        unicode::pad_to_width(&memo.id, id_width),
        unicode::pad_to_width(labels.label(&memo.category), 8),
        memo.title
    );
    for tag in &memo.tags {
        line.push_str(" #");
        line.push_str(tag);
    }
    line
}

/// The same content the detail overlay shows, as plain lines
pub fn format_memo_detail<Tz: TimeZone>(memo: &Memo, labels: &CategoryLabels, tz: &Tz) -> Vec<String> {
    let content = DetailContent::build(memo, labels, tz);
    let mut lines = vec![
        content.title.clone(),
        format!("[{}]", content.category_label),
        format!("최종 수정: {}", content.updated),
        format!("생성: {}", content.created),
        "\u{2500}".repeat(40),
    ];
    lines.extend(markdown_to_plain(&content.body));
    if content.has_tags() {
        lines.push(String::new());
        lines.push(content.tags.join(" "));
    }
    lines
}
