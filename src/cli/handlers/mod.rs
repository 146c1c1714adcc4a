use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::Path;
use std::rc::Rc;

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::memo_io::{self, MemoStore};
use crate::model::{AppConfig, Category, CategoryLabels, Memo};
use crate::tui::detail::{Confirm, ConfirmResponse, DeleteState, DetailCallbacks, DetailView};
use crate::tui::listeners::InputBus;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let labels = CategoryLabels::from_overrides(&config.ui.category_labels);

    match cli.command {
        None => match cli.file {
            Some(file) => crate::tui::run(&file, config),
            None => Err("no memo file given (try `memo --help`)".into()),
        },
        Some(cmd) => match cmd {
            Commands::Open(args) => crate::tui::run(&args.file, config),
            Commands::List(args) => cmd_list(args, &labels, json),
            Commands::Show(args) => cmd_show(args, &labels, json),
            Commands::Delete(args) => cmd_delete(args, &labels, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Asks on stderr and reads the answer from `input`
pub struct PromptConfirm<R> {
    input: R,
}

impl<R: BufRead> PromptConfirm<R> {
    pub fn new(input: R) -> Self {
        PromptConfirm { input }
    }
}

impl<R: BufRead> Confirm for PromptConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> ConfirmResponse {
        eprint!("{} [y/n] ", prompt);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            // EOF: nobody answered
            Ok(0) => ConfirmResponse::Dismissed,
            Err(e) => {
                log::warn!("could not read confirmation answer: {}", e);
                ConfirmResponse::Dismissed
            }
            Ok(_) if answer.trim().eq_ignore_ascii_case("y") => ConfirmResponse::Yes,
            Ok(_) => ConfirmResponse::No,
        }
    }
}

/// Answers yes without asking (`--yes`)
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> ConfirmResponse {
        ConfirmResponse::Yes
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: ListArgs,
    labels: &CategoryLabels,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = memo_io::load_memos(&args.file)?;
    let category = args.category.as_deref().map(Category::parse);
    let memos: Vec<&Memo> = store
        .sorted_by_updated()
        .into_iter()
        .filter(|m| category.as_ref().is_none_or(|c| &m.category == c))
        .filter(|m| {
            args.tag
                .as_deref()
                .is_none_or(|tag| m.tags.iter().any(|t| t == tag))
        })
        .collect();

    if json {
        let out: Vec<MemoSummaryJson> = memos
            .iter()
            .map(|m| memo_to_summary_json(m, labels))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let id_width = memos
            .iter()
            .map(|m| crate::util::unicode::display_width(&m.id))
            .max()
            .unwrap_or(0);
        for memo in memos {
            println!("{}", format_memo_line(memo, labels, id_width));
        }
    }
    Ok(())
}

fn cmd_show(
    args: ShowArgs,
    labels: &CategoryLabels,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = memo_io::load_memos(&args.file)?;
    let memo = find_memo(&store, &args.id)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&memo_to_json(memo, labels, &Local))?
        );
    } else {
        for line in format_memo_detail(memo, labels, &Local) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

fn cmd_delete(
    args: DeleteArgs,
    labels: &CategoryLabels,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = memo_io::load_memos(&args.file)?;
    let memo = find_memo(&store, &args.id)?.clone();

    if !json {
        for line in format_memo_detail(&memo, labels, &Local) {
            println!("{}", line);
        }
        println!();
    }

    let state = if args.yes {
        run_delete(memo, &mut store, &mut AutoConfirm)
    } else {
        let stdin = std::io::stdin();
        run_delete(memo, &mut store, &mut PromptConfirm::new(stdin.lock()))
    };

    let deleted = state == DeleteState::Confirmed;
    if json {
        let out = DeleteJson {
            id: args.id.clone(),
            deleted,
            persisted: false,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if deleted {
        println!(
            "deleted {} ({} memos remain; {} was not modified)",
            args.id,
            store.len(),
            display_path(&args.file)
        );
    } else {
        println!("cancelled");
    }
    Ok(())
}

/// Drive the detail view's delete flow and apply a confirmed delete to `store`
fn run_delete(memo: Memo, store: &mut MemoStore, confirmer: &mut dyn Confirm) -> DeleteState {
    let requested: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&requested);
    let callbacks = DetailCallbacks {
        on_close: Rc::new(|| {}),
        on_edit: Rc::new(|_: &Memo| {}),
        on_delete: Rc::new(move |id: &str| *sink.borrow_mut() = Some(id.to_string())),
    };

    let bus = InputBus::new();
    let mut view = DetailView::mount(memo, callbacks, &bus);
    let state = view.delete_with(confirmer);
    view.unmount();

    if let Some(id) = requested.borrow_mut().take()
        && store.remove(&id).is_some()
    {
        log::info!("memo {} deleted from session", id);
    }
    state
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_memo<'a>(store: &'a MemoStore, id: &str) -> Result<&'a Memo, Box<dyn std::error::Error>> {
    store
        .get(id)
        .ok_or_else(|| format!("memo not found: {}", id).into())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memo_io::parse_memos;

    const MEMOS: &str = r#"[
      {"id": "a", "title": "A", "category": "work",
       "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"},
      {"id": "b", "title": "B", "category": "idea",
       "createdAt": "2024-01-02T00:00:00Z", "updatedAt": "2024-01-02T00:00:00Z"}
    ]"#;

    fn store() -> MemoStore {
        MemoStore::new(parse_memos(MEMOS).unwrap()).unwrap()
    }

    #[test]
    fn prompt_confirm_answers() {
        let mut yes = PromptConfirm::new("y\n".as_bytes());
        assert_eq!(yes.confirm("?"), ConfirmResponse::Yes);
        let mut upper = PromptConfirm::new("Y\n".as_bytes());
        assert_eq!(upper.confirm("?"), ConfirmResponse::Yes);
        let mut no = PromptConfirm::new("nope\n".as_bytes());
        assert_eq!(no.confirm("?"), ConfirmResponse::No);
        let mut eof = PromptConfirm::new("".as_bytes());
        assert_eq!(eof.confirm("?"), ConfirmResponse::Dismissed);
    }

    /// A reader whose every read fails
    struct BrokenInput;

    impl std::io::Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("stdin closed"))
        }
    }

    #[test]
    fn prompt_confirm_read_error_dismisses() {
        let mut broken = PromptConfirm::new(std::io::BufReader::new(BrokenInput));
        assert_eq!(broken.confirm("?"), ConfirmResponse::Dismissed);
    }

    #[test]
    fn confirmed_delete_removes_from_store() {
        let mut store = store();
        let memo = store.get("a").unwrap().clone();
        let state = run_delete(memo, &mut store, &mut AutoConfirm);
        assert_eq!(state, DeleteState::Confirmed);
        assert!(store.get("a").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn declined_delete_keeps_store() {
        let mut store = store();
        let memo = store.get("b").unwrap().clone();
        let state = run_delete(memo, &mut store, &mut PromptConfirm::new("n\n".as_bytes()));
        assert_eq!(state, DeleteState::Cancelled);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unknown_memo_is_an_error() {
        let store = store();
        let err = find_memo(&store, "zzz").unwrap_err();
        assert_eq!(err.to_string(), "memo not found: zzz");
    }
}
