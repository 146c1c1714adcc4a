//! Process-wide input bus with scoped listeners.
//!
//! A view that needs global key or pointer input subscribes for as long as
//! it is visible. Each subscription is a [`ListenerGuard`]; dropping the guard
//! deregisters it, so every exit path releases the listener.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};

/// An input event as seen by bus listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Pointer button pressed at a screen cell
    PointerDown(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    KeyPress,
    PointerPress,
}

impl InputEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            InputEvent::Key(_) => ListenerKind::KeyPress,
            InputEvent::PointerDown(_) => ListenerKind::PointerPress,
        }
    }
}

type Handler = Rc<dyn Fn(&InputEvent)>;

struct Entry {
    id: u64,
    kind: ListenerKind,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared handle to the input bus. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct InputBus {
    registry: Rc<RefCell<Registry>>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind` until the guard is dropped.
    pub fn subscribe(
        &self,
        kind: ListenerKind,
        handler: impl Fn(&InputEvent) + 'static,
    ) -> ListenerGuard {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push(Entry {
            id,
            kind,
            handler: Rc::new(handler),
        });
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to matching listeners in registration order. Returns
    /// how many were invoked.
    ///
    /// Handlers run with the registry unborrowed, so they may subscribe or
    /// release guards. A listener released mid-dispatch is skipped.
    pub fn dispatch(&self, event: &InputEvent) -> usize {
        let kind = event.kind();
        let targets: Vec<(u64, Handler)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| (e.id, Rc::clone(&e.handler)))
            .collect();

        let mut invoked = 0;
        for (id, handler) in targets {
            if !self.is_registered(id) {
                continue;
            }
            handler(event);
            invoked += 1;
        }
        invoked
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry.borrow().entries.iter().any(|e| e.id == id)
    }
}

/// A live subscription. Dropping it deregisters the listener.
#[must_use = "dropping the guard releases the listener immediately"]
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

/// Bounds of a rendered panel, written by the render pass and read by
/// pointer listeners for outside-press tests.
#[derive(Debug, Clone, Default)]
pub struct PanelRef {
    bounds: Rc<Cell<Option<Rect>>>,
}

impl PanelRef {
    pub fn set(&self, rect: Rect) {
        self.bounds.set(Some(rect));
    }

    pub fn get(&self) -> Option<Rect> {
        self.bounds.get()
    }

    /// True only when the panel has been rendered and `pos` lies outside it.
    pub fn is_outside(&self, pos: Position) -> bool {
        self.get().is_some_and(|rect| !rect.contains(pos))
    }
}
