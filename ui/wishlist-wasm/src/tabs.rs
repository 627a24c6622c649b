//! Active-tab persistence across full-page navigations.
//!
//! The tab widget itself is the page's own toolkit; we only click the saved
//! trigger on load and record the target whenever the toolkit reports a tab
//! as shown (`shown.bs.tab`).

use gloo_storage::{LocalStorage, Storage};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::{self, Elements};

const ACTIVE_TAB_KEY: &str = "activeTab";

pub fn init(els: &Elements) {
    // Restore the last active tab, if its trigger still exists.
    if let Ok(target) = LocalStorage::get::<String>(ACTIVE_TAB_KEY) {
        let selector = format!("button[data-bs-target=\"{}\"]", target);
        if let Some(trigger) = dom::query(&selector) {
            if let Some(html) = trigger.dyn_ref::<web_sys::HtmlElement>() {
                html.click();
            }
        }
    }

    // Record every tab change.
    for button in &els.tab_buttons {
        let button2 = button.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(target) = button2.get_attribute("data-bs-target") {
                let _ = LocalStorage::set(ACTIVE_TAB_KEY, target);
            }
        }) as Box<dyn FnMut(_)>);
        button
            .add_event_listener_with_callback("shown.bs.tab", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }
}
