use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::memo_io::{MemoStore, load_memos};
use crate::model::{AppConfig, CategoryLabels, Memo, UiConfig};

use super::detail::{DetailCallbacks, DetailView};
use super::input;
use super::listeners::InputBus;
use super::render;
use super::theme::Theme;

/// Requests raised by the detail overlay's callbacks, applied after each event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    CloseDetail,
    EditMemo(String),
    DeleteMemo(String),
}

type Outbox = Rc<RefCell<Vec<AppCommand>>>;

/// Main application state
pub struct App {
    pub store: MemoStore,
    /// Memo ids in list order (most recently updated first)
    pub order: Vec<String>,
    /// Cursor into `order`
    pub cursor: usize,
    /// First visible list row
    pub list_scroll: usize,
    /// Where the list rows were last drawn
    pub list_area: Option<Rect>,
    /// The mounted detail overlay, if any
    pub detail: Option<DetailView>,
    pub bus: InputBus,
    outbox: Outbox,
    pub theme: Theme,
    pub labels: CategoryLabels,
    pub show_key_hints: bool,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: MemoStore, ui: &UiConfig) -> Self {
        let mut app = App {
            store,
            order: Vec::new(),
            cursor: 0,
            list_scroll: 0,
            list_area: None,
            detail: None,
            bus: InputBus::new(),
            outbox: Rc::new(RefCell::new(Vec::new())),
            theme: Theme::from_config(ui),
            labels: CategoryLabels::from_overrides(&ui.category_labels),
            show_key_hints: ui.show_key_hints,
            status_message: None,
            should_quit: false,
        };
        app.rebuild_order();
        app
    }

    fn rebuild_order(&mut self) {
        self.order = self
            .store
            .sorted_by_updated()
            .into_iter()
            .map(|m| m.id.clone())
            .collect();
        self.cursor = self.cursor.min(self.order.len().saturating_sub(1));
    }

    pub fn memos_in_order(&self) -> Vec<&Memo> {
        self.order.iter().filter_map(|id| self.store.get(id)).collect()
    }

    pub fn selected_memo(&self) -> Option<&Memo> {
        self.order.get(self.cursor).and_then(|id| self.store.get(id))
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.order.is_empty() {
            return;
        }
        let max = self.order.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Callbacks handed to the detail overlay. Each queues a command.
    fn detail_callbacks(&self) -> DetailCallbacks {
        let close = Rc::clone(&self.outbox);
        let edit = Rc::clone(&self.outbox);
        let delete = Rc::clone(&self.outbox);
        DetailCallbacks {
            on_close: Rc::new(move || close.borrow_mut().push(AppCommand::CloseDetail)),
            on_edit: Rc::new(move |memo: &Memo| {
                edit.borrow_mut().push(AppCommand::EditMemo(memo.id.clone()))
            }),
            on_delete: Rc::new(move |id: &str| {
                delete.borrow_mut().push(AppCommand::DeleteMemo(id.to_string()))
            }),
        }
    }

    /// Open the overlay for the memo under the cursor
    pub fn open_selected(&mut self) {
        if let Some(id) = self.order.get(self.cursor).cloned() {
            self.open_detail(&id);
        }
    }

    pub fn open_detail(&mut self, id: &str) -> bool {
        let Some(memo) = self.store.get(id).cloned() else {
            return false;
        };
        if let Some(previous) = self.detail.take() {
            previous.unmount();
        }
        let callbacks = self.detail_callbacks();
        self.detail = Some(DetailView::mount(memo, callbacks, &self.bus));
        self.status_message = None;
        true
    }

    /// A close has been requested but not yet applied
    pub fn close_requested(&self) -> bool {
        self.outbox.borrow().contains(&AppCommand::CloseDetail)
    }

    pub fn pending_commands(&self) -> Vec<AppCommand> {
        self.outbox.borrow().clone()
    }

    /// Apply queued commands in the order they were raised
    pub fn drain_commands(&mut self) {
        let commands = std::mem::take(&mut *self.outbox.borrow_mut());
        for command in commands {
            match command {
                AppCommand::CloseDetail => {
                    if let Some(view) = self.detail.take() {
                        view.unmount();
                    }
                }
                AppCommand::EditMemo(id) => {
                    log::info!("edit requested for memo {}", id);
                    let title = self.store.get(&id).map(|m| m.title.clone()).unwrap_or(id);
                    self.status_message = Some(format!("편집 요청: {}", title));
                }
                AppCommand::DeleteMemo(id) => match self.store.remove(&id) {
                    Some(memo) => {
                        log::info!("memo {} removed from session", memo.id);
                        self.status_message = Some(format!("삭제됨: {}", memo.title));
                        self.rebuild_order();
                    }
                    None => log::warn!("delete requested for unknown memo {}", id),
                },
            }
        }
    }
}

/// Run the TUI application
pub fn run(memo_file: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_memos(memo_file)?;
    let mut app = App::new(store, &config.ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    log::info!("tui started with {} memos", app.store.len());
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            let ev = event::read()?;
            input::handle_event(app, ev);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
