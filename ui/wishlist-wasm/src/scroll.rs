//! Scroll-position persistence across full-page navigations.
//!
//! The browser's automatic restoration is disabled; the position is written
//! on `beforeunload` and consumed exactly once on the next load.

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

const SCROLL_POS_KEY: &str = "scrollPos";

pub fn init() {
    let window = dom::window();

    if let Ok(history) = window.history() {
        let _ = history.set_scroll_restoration(web_sys::ScrollRestoration::Manual);
    }

    // Restore once, then drop the key.
    if let Ok(y) = LocalStorage::get::<f64>(SCROLL_POS_KEY) {
        window.scroll_to_with_x_and_y(0.0, y);
        LocalStorage::delete(SCROLL_POS_KEY);
    }

    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let y = dom::window().scroll_y().unwrap_or(0.0);
        let _ = LocalStorage::set(SCROLL_POS_KEY, y);
    }) as Box<dyn FnMut(_)>);
    window
        .add_event_listener_with_callback("beforeunload", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}
