//! The memo detail overlay: state, listener wiring and user actions.
//!
//! Rendering lives in `render::detail_modal`; this module owns what the
//! overlay shows and what its gestures do.

use std::rc::Rc;

use chrono::TimeZone;
use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};

use crate::format::display_timestamp_in;
use crate::model::{Category, CategoryLabels, CategoryStyle, Memo};

use super::listeners::{InputBus, InputEvent, ListenerGuard, ListenerKind, PanelRef};

pub type OnClose = Rc<dyn Fn()>;
pub type OnEdit = Rc<dyn Fn(&Memo)>;
pub type OnDelete = Rc<dyn Fn(&str)>;

/// The three required outward signals of the detail view
#[derive(Clone)]
pub struct DetailCallbacks {
    pub on_close: OnClose,
    pub on_edit: OnEdit,
    pub on_delete: OnDelete,
}

/// Prompt shown before a memo is deleted
pub const DELETE_PROMPT: &str = "정말로 이 메모를 삭제하시겠습니까?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    ConfirmPending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResponse {
    Yes,
    No,
    /// Prompt closed without an answer
    Dismissed,
}

/// A synchronous yes/no prompt
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> ConfirmResponse;
}

/// Buttons in the footer, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailButton {
    Edit,
    Delete,
    Close,
}

impl DetailButton {
    pub const ALL: [DetailButton; 3] = [DetailButton::Edit, DetailButton::Delete, DetailButton::Close];

    pub fn label(self) -> &'static str {
        match self {
            DetailButton::Edit => "편집",
            DetailButton::Delete => "삭제",
            DetailButton::Close => "닫기",
        }
    }

    fn index(self) -> usize {
        match self {
            DetailButton::Edit => 0,
            DetailButton::Delete => 1,
            DetailButton::Close => 2,
        }
    }
}

/// Screen regions from the last render, used for pointer hit tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailLayout {
    pub panel: Rect,
    /// The `×` marker in the top border
    pub close_marker: Rect,
    pub buttons: Vec<(DetailButton, Rect)>,
    /// The delete confirmation popup, when shown
    pub confirm: Option<Rect>,
}

impl DetailLayout {
    pub fn button_at(&self, pos: Position) -> Option<DetailButton> {
        if self.close_marker.contains(pos) {
            return Some(DetailButton::Close);
        }
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(button, _)| *button)
    }
}

/// Everything the overlay displays, resolved from a memo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailContent {
    pub title: String,
    pub category_label: String,
    pub category_style: CategoryStyle,
    pub category: Category,
    pub updated: String,
    pub created: String,
    /// Markdown source, rendered by `tui::markdown`
    pub body: String,
    /// Tag badges, `#`-prefixed, in memo order. Empty means no tag section.
    pub tags: Vec<String>,
}

impl DetailContent {
    pub fn build<Tz: TimeZone>(memo: &Memo, labels: &CategoryLabels, tz: &Tz) -> Self {
        DetailContent {
            title: memo.title.clone(),
            category_label: labels.label(&memo.category).to_string(),
            category_style: memo.category.style_token(),
            category: memo.category.clone(),
            updated: display_timestamp_in(&memo.updated_at, tz),
            created: display_timestamp_in(&memo.created_at, tz),
            body: memo.content.clone(),
            tags: memo.tags.iter().map(|t| format!("#{}", t)).collect(),
        }
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// A mounted detail overlay for one memo.
///
/// While mounted it holds two listeners on the input bus: Escape closes,
/// and a pointer press outside the rendered panel closes. Both are released
/// on unmount, on drop, and whenever the close callback is replaced.
pub struct DetailView {
    memo: Memo,
    callbacks: DetailCallbacks,
    bus: InputBus,
    panel: PanelRef,
    listeners: Vec<ListenerGuard>,
    delete_state: DeleteState,
    pub focus: DetailButton,
    pub scroll: u16,
    pub layout: Option<DetailLayout>,
}

impl DetailView {
    pub fn mount(memo: Memo, callbacks: DetailCallbacks, bus: &InputBus) -> Self {
        let mut view = DetailView {
            memo,
            callbacks,
            bus: bus.clone(),
            panel: PanelRef::default(),
            listeners: Vec::new(),
            delete_state: DeleteState::Idle,
            focus: DetailButton::Close,
            scroll: 0,
            layout: None,
        };
        view.acquire_listeners();
        log::debug!("detail view mounted for memo {}", view.memo.id);
        view
    }

    /// Release the listeners and drop the view
    pub fn unmount(mut self) {
        self.release_listeners();
        log::debug!("detail view unmounted for memo {}", self.memo.id);
    }

    pub fn is_mounted(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn content<Tz: TimeZone>(&self, labels: &CategoryLabels, tz: &Tz) -> DetailContent {
        DetailContent::build(&self.memo, labels, tz)
    }

    /// Replace the close callback. A different callback re-binds both listeners.
    pub fn set_on_close(&mut self, on_close: OnClose) {
        if Rc::ptr_eq(&self.callbacks.on_close, &on_close) {
            return;
        }
        self.callbacks.on_close = on_close;
        if self.is_mounted() {
            self.acquire_listeners();
        }
    }

    fn acquire_listeners(&mut self) {
        self.release_listeners();

        let on_close = Rc::clone(&self.callbacks.on_close);
        let key = self.bus.subscribe(ListenerKind::KeyPress, move |event| {
            if let InputEvent::Key(key) = event
                && key.code == KeyCode::Esc
            {
                on_close();
            }
        });

        let on_close = Rc::clone(&self.callbacks.on_close);
        let panel = self.panel.clone();
        let pointer = self.bus.subscribe(ListenerKind::PointerPress, move |event| {
            if let InputEvent::PointerDown(pos) = event
                && panel.is_outside(*pos)
            {
                on_close();
            }
        });

        self.listeners = vec![key, pointer];
    }

    fn release_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Record where the overlay was drawn
    pub fn set_layout(&mut self, layout: DetailLayout) {
        self.panel.set(layout.panel);
        self.layout = Some(layout);
    }

    pub fn set_confirm_area(&mut self, area: Option<Rect>) {
        if let Some(layout) = &mut self.layout {
            layout.confirm = area;
        }
    }

    pub fn close(&self) {
        (self.callbacks.on_close)();
    }

    /// Edit always closes the view afterwards
    pub fn edit(&self) {
        (self.callbacks.on_edit)(&self.memo);
        (self.callbacks.on_close)();
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete_state
    }

    pub fn is_confirm_pending(&self) -> bool {
        self.delete_state == DeleteState::ConfirmPending
    }

    /// Start the delete flow. Returns the prompt to show.
    pub fn request_delete(&mut self) -> &'static str {
        self.delete_state = DeleteState::ConfirmPending;
        DELETE_PROMPT
    }

    /// Answer a pending delete prompt. Without a pending prompt nothing happens.
    pub fn resolve_delete(&mut self, response: ConfirmResponse) -> DeleteState {
        if self.delete_state != DeleteState::ConfirmPending {
            return self.delete_state;
        }
        match response {
            ConfirmResponse::Yes => {
                self.delete_state = DeleteState::Confirmed;
                log::info!("delete confirmed for memo {}", self.memo.id);
                (self.callbacks.on_delete)(&self.memo.id);
                (self.callbacks.on_close)();
            }
            ConfirmResponse::No | ConfirmResponse::Dismissed => {
                self.delete_state = DeleteState::Cancelled;
                log::debug!("delete cancelled for memo {}", self.memo.id);
            }
        }
        self.delete_state
    }

    /// Run the whole delete flow through a synchronous prompt
    pub fn delete_with(&mut self, confirmer: &mut dyn Confirm) -> DeleteState {
        let prompt = self.request_delete();
        let response = confirmer.confirm(prompt);
        self.resolve_delete(response)
    }

    pub fn activate(&mut self, button: DetailButton) {
        self.focus = button;
        match button {
            DetailButton::Edit => self.edit(),
            DetailButton::Delete => {
                self.request_delete();
            }
            DetailButton::Close => self.close(),
        }
    }

    pub fn focus_next(&mut self) {
        let idx = (self.focus.index() + 1) % DetailButton::ALL.len();
        self.focus = DetailButton::ALL[idx];
    }

    pub fn focus_prev(&mut self) {
        let len = DetailButton::ALL.len();
        let idx = (self.focus.index() + len - 1) % len;
        self.focus = DetailButton::ALL[idx];
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_helpers::*;
    use chrono::FixedOffset;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(x: u16, y: u16) -> InputEvent {
        InputEvent::PointerDown(Position::new(x, y))
    }

    fn rendered(view: &mut DetailView) {
        view.set_layout(DetailLayout {
            panel: Rect::new(10, 5, 40, 12),
            ..Default::default()
        });
    }

    struct Scripted(ConfirmResponse, Vec<String>);

    impl Confirm for Scripted {
        fn confirm(&mut self, message: &str) -> ConfirmResponse {
            self.1.push(message.to_string());
            self.0
        }
    }

    #[test]
    fn mount_acquires_two_listeners() {
        let bus = InputBus::new();
        let (callbacks, _calls) = recording_callbacks();
        let view = DetailView::mount(sample_memo(), callbacks, &bus);
        assert!(view.is_mounted());
        assert_eq!(bus.count_of(ListenerKind::KeyPress), 1);
        assert_eq!(bus.count_of(ListenerKind::PointerPress), 1);
        view.unmount();
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn repeated_mount_cycles_do_not_leak() {
        let bus = InputBus::new();
        for _ in 0..5 {
            let (callbacks, _calls) = recording_callbacks();
            let view = DetailView::mount(sample_memo(), callbacks, &bus);
            assert_eq!(bus.listener_count(), 2);
            drop(view);
            assert_eq!(bus.listener_count(), 0);
        }
    }

    #[test]
    fn escape_closes_once() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let _view = DetailView::mount(sample_memo(), callbacks, &bus);

        bus.dispatch(&key(KeyCode::Esc));
        assert_eq!(*calls.borrow(), vec![Call::Close]);
    }

    #[test]
    fn other_keys_do_nothing() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let _view = DetailView::mount(sample_memo(), callbacks, &bus);

        bus.dispatch(&key(KeyCode::Enter));
        bus.dispatch(&key(KeyCode::Char('q')));
        bus.dispatch(&key(KeyCode::Backspace));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn press_outside_closes_inside_ignored() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        rendered(&mut view);

        bus.dispatch(&press(20, 8));
        bus.dispatch(&press(10, 5));
        assert!(calls.borrow().is_empty());

        bus.dispatch(&press(2, 2));
        assert_eq!(*calls.borrow(), vec![Call::Close]);
    }

    #[test]
    fn press_before_first_render_ignored() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let _view = DetailView::mount(sample_memo(), callbacks, &bus);
        bus.dispatch(&press(0, 0));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn unmounted_view_ignores_input() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        rendered(&mut view);
        view.unmount();

        bus.dispatch(&key(KeyCode::Esc));
        bus.dispatch(&press(0, 0));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn edit_then_close_in_order() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let view = DetailView::mount(sample_memo(), callbacks, &bus);
        view.edit();
        assert_eq!(
            *calls.borrow(),
            vec![Call::Edit(sample_memo()), Call::Close]
        );
    }

    #[test]
    fn explicit_close() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        view.activate(DetailButton::Close);
        assert_eq!(*calls.borrow(), vec![Call::Close]);
    }

    #[test]
    fn delete_confirmed_deletes_then_closes() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);

        let mut confirmer = Scripted(ConfirmResponse::Yes, Vec::new());
        assert_eq!(view.delete_with(&mut confirmer), DeleteState::Confirmed);
        assert_eq!(confirmer.1, vec![DELETE_PROMPT.to_string()]);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Delete("memo-1".into()), Call::Close]
        );
    }

    #[test]
    fn delete_declined_or_dismissed_does_nothing() {
        for response in [ConfirmResponse::No, ConfirmResponse::Dismissed] {
            let bus = InputBus::new();
            let (callbacks, calls) = recording_callbacks();
            let mut view = DetailView::mount(sample_memo(), callbacks, &bus);

            let mut confirmer = Scripted(response, Vec::new());
            assert_eq!(view.delete_with(&mut confirmer), DeleteState::Cancelled);
            assert!(calls.borrow().is_empty());
            assert!(view.is_mounted());
        }
    }

    #[test]
    fn delete_is_two_step() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);

        assert_eq!(view.delete_state(), DeleteState::Idle);
        view.activate(DetailButton::Delete);
        assert_eq!(view.delete_state(), DeleteState::ConfirmPending);
        assert!(calls.borrow().is_empty());

        assert_eq!(view.resolve_delete(ConfirmResponse::No), DeleteState::Cancelled);
        // A stale answer after cancelling has no effect
        assert_eq!(view.resolve_delete(ConfirmResponse::Yes), DeleteState::Cancelled);
        assert!(calls.borrow().is_empty());

        view.request_delete();
        assert_eq!(view.resolve_delete(ConfirmResponse::Yes), DeleteState::Confirmed);
        assert_eq!(
            *calls.borrow(),
            vec![Call::Delete("memo-1".into()), Call::Close]
        );
    }

    #[test]
    fn resolve_without_request_is_noop() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        assert_eq!(view.resolve_delete(ConfirmResponse::Yes), DeleteState::Idle);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn replacing_on_close_rebinds_listeners() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);

        let replaced = Rc::new(std::cell::Cell::new(0));
        let r = Rc::clone(&replaced);
        view.set_on_close(Rc::new(move || r.set(r.get() + 1)));
        assert_eq!(bus.listener_count(), 2);

        bus.dispatch(&key(KeyCode::Esc));
        assert_eq!(replaced.get(), 1);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn same_on_close_keeps_listeners() {
        let bus = InputBus::new();
        let (callbacks, calls) = recording_callbacks();
        let on_close = Rc::clone(&callbacks.on_close);
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        view.set_on_close(on_close);
        assert_eq!(bus.listener_count(), 2);
        bus.dispatch(&key(KeyCode::Esc));
        assert_eq!(*calls.borrow(), vec![Call::Close]);
    }

    #[test]
    fn focus_cycles_through_buttons() {
        let bus = InputBus::new();
        let (callbacks, _calls) = recording_callbacks();
        let mut view = DetailView::mount(sample_memo(), callbacks, &bus);
        assert_eq!(view.focus, DetailButton::Close);
        view.focus_next();
        assert_eq!(view.focus, DetailButton::Edit);
        view.focus_next();
        assert_eq!(view.focus, DetailButton::Delete);
        view.focus_prev();
        view.focus_prev();
        assert_eq!(view.focus, DetailButton::Close);
    }

    #[test]
    fn layout_hit_test() {
        let layout = DetailLayout {
            panel: Rect::new(0, 0, 40, 10),
            close_marker: Rect::new(36, 0, 3, 1),
            buttons: vec![
                (DetailButton::Edit, Rect::new(20, 8, 6, 1)),
                (DetailButton::Delete, Rect::new(27, 8, 6, 1)),
            ],
            confirm: None,
        };
        assert_eq!(layout.button_at(Position::new(37, 0)), Some(DetailButton::Close));
        assert_eq!(layout.button_at(Position::new(22, 8)), Some(DetailButton::Edit));
        assert_eq!(layout.button_at(Position::new(32, 8)), Some(DetailButton::Delete));
        assert_eq!(layout.button_at(Position::new(5, 5)), None);
    }

    #[test]
    fn content_tags_prefixed_in_order() {
        let mut memo = sample_memo();
        memo.tags = vec!["b".into(), "a".into(), "c".into()];
        let content = DetailContent::build(&memo, &CategoryLabels::default(), &FixedOffset::east_opt(0).unwrap());
        assert_eq!(content.tags, vec!["#b", "#a", "#c"]);
        assert!(content.has_tags());

        memo.tags.clear();
        let content = DetailContent::build(&memo, &CategoryLabels::default(), &FixedOffset::east_opt(0).unwrap());
        assert!(!content.has_tags());
    }

    #[test]
    fn content_category_label_and_style() {
        let mut overrides = HashMap::new();
        overrides.insert("personal".to_string(), "Personal".to_string());
        let labels = CategoryLabels::from_overrides(&overrides);
        let utc = FixedOffset::east_opt(0).unwrap();

        let memo = sample_memo();
        let content = DetailContent::build(&memo, &labels, &utc);
        assert_eq!(content.category_label, "Personal");
        assert_eq!(content.category_style, CategoryStyle::Blue);

        let mut odd = sample_memo();
        odd.category = Category::parse("xyz");
        let content = DetailContent::build(&odd, &labels, &utc);
        assert_eq!(content.category_label, "xyz");
        assert_eq!(content.category_style, CategoryStyle::DEFAULT);
    }

    #[test]
    fn content_timestamps_fall_back_to_raw() {
        let mut memo = sample_memo();
        memo.created_at = "sometime".into();
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let content = DetailContent::build(&memo, &CategoryLabels::default(), &kst);
        assert_eq!(content.created, "sometime");
        assert_eq!(content.updated, "2024년 1월 16일 오후 05:00");
    }
}
