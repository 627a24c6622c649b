//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds the dialog's submission mode and the lookup generation counter so
//! neither lives as a mutable tag on a DOM node.

use std::cell::RefCell;

use wishlist_form_core::{FormMode, LookupGeneration};

use crate::dom::Elements;

/// Central application state.
#[derive(Debug)]
pub struct AppState {
    pub form_mode: FormMode,
    pub lookup_generation: LookupGeneration,
}

impl Default for AppState {
    fn default() -> AppState {
        AppState {
            form_mode: FormMode::Search,
            lookup_generation: LookupGeneration::default(),
        }
    }
}

// ── Thread-local singletons ──

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
    static ELEMENTS: RefCell<Option<Elements>> = RefCell::new(None);
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn form_mode() -> FormMode {
    STATE.with(|s| s.borrow().form_mode)
}

pub fn set_form_mode(mode: FormMode) {
    with_mut(|s| s.form_mode = mode);
}

/// Start a new lookup generation, invalidating any outstanding ticket.
pub fn begin_lookup() -> u64 {
    with_mut(|s| s.lookup_generation.begin())
}

pub fn lookup_is_current(ticket: u64) -> bool {
    STATE.with(|s| s.borrow().lookup_generation.is_current(ticket))
}

// ── Page elements ──

pub fn set_elements(els: Elements) {
    ELEMENTS.with(|e| *e.borrow_mut() = Some(els));
}

/// Page-level elements bound at startup; `None` before `start()` ran.
pub fn elements() -> Option<Elements> {
    ELEMENTS.with(|e| e.borrow().clone())
}
