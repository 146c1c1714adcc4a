use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::memo_io::{MemoStore, parse_memos};
use crate::model::{Category, Memo, UiConfig};
use crate::tui::app::App;
use crate::tui::detail::DetailCallbacks;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            // Wide characters occupy two cells; the trailing cell is blank
            // and must be skipped to get readable text back.
            let mut s = String::new();
            let mut skip = 0;
            for cell in row {
                if skip > 0 {
                    skip -= 1;
                    continue;
                }
                let sym = cell.symbol();
                skip = unicode_width::UnicodeWidthStr::width(sym).saturating_sub(1);
                s.push_str(sym);
            }
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A single memo with two tags and a short markdown body.
pub fn sample_memo() -> Memo {
    Memo {
        id: "memo-1".into(),
        title: "Groceries".into(),
        content: "Buy **fresh** produce.\n\n- milk\n- eggs".into(),
        category: Category::Personal,
        tags: vec!["home".into(), "weekly".into()],
        created_at: "2024-01-15T05:30:00Z".into(),
        updated_at: "2024-01-16T08:00:00Z".into(),
    }
}

pub const SAMPLE_MEMOS_JSON: &str = r#"[
  {"id": "g1", "title": "Groceries", "content": "- milk\n- eggs",
   "category": "personal", "tags": ["home"],
   "createdAt": "2024-01-10T09:00:00Z", "updatedAt": "2024-01-12T09:00:00Z"},
  {"id": "w1", "title": "Weekly plan", "content": "Ship the **release**.",
   "category": "work", "tags": [],
   "createdAt": "2024-02-01T09:00:00Z", "updatedAt": "2024-02-02T09:00:00Z"},
  {"id": "x1", "title": "Odd category", "content": "plain",
   "category": "xyz", "tags": ["misc", "later"],
   "createdAt": "2023-12-01T09:00:00Z", "updatedAt": "2023-12-01T09:00:00Z"}
]"#;

pub fn sample_store() -> MemoStore {
    MemoStore::new(parse_memos(SAMPLE_MEMOS_JSON).unwrap()).unwrap()
}

/// App over the sample memos, list order: w1, g1, x1.
pub fn sample_app() -> App {
    App::new(sample_store(), &UiConfig::default())
}

/// A callback invocation recorded by `recording_callbacks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Close,
    Edit(Memo),
    Delete(String),
}

/// Callbacks that record every invocation, in order.
pub fn recording_callbacks() -> (DetailCallbacks, Rc<RefCell<Vec<Call>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let close = Rc::clone(&calls);
    let edit = Rc::clone(&calls);
    let delete = Rc::clone(&calls);
    let callbacks = DetailCallbacks {
        on_close: Rc::new(move || close.borrow_mut().push(Call::Close)),
        on_edit: Rc::new(move |memo: &Memo| edit.borrow_mut().push(Call::Edit(memo.clone()))),
        on_delete: Rc::new(move |id: &str| delete.borrow_mut().push(Call::Delete(id.to_string()))),
    };
    (callbacks, calls)
}
