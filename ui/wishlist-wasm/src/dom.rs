//! DOM element bindings.
//!
//! Page-level chrome is resolved once at startup into [`Elements`]; the
//! add/edit form's own controls live in a separate per-dialog-open binding
//! (`scrape_form::FormFields`) because the fragment is re-injected on every
//! open.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn query_all_typed<T: JsCast>(selector: &str) -> Vec<T> {
    query_all(selector)
        .into_iter()
        .filter_map(|e| e.dyn_into::<T>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_input_value(el: &HtmlInputElement, val: &str) {
    el.set_value(val);
}

/// Input value with surrounding whitespace stripped.
pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

/// Show an element via inline `display`.
pub fn show(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property("display");
    }
}

/// Hide an element via inline `display: none`.
pub fn hide(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("display", "none");
    }
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

// ── Elements struct ──

/// Page-level DOM references used by the wishlist UI.
///
/// The add/delete modals ship in the base template and are required; the
/// bulk-delete controls only exist on list pages and are optional.
#[derive(Clone)]
pub struct Elements {
    // Add/edit modal shell (the form inside is injected per open)
    pub add_modal_title: Element,
    pub add_modal_body: Element,

    // Delete confirmation modal
    pub delete_form: HtmlFormElement,
    pub delete_modal_title: Element,
    pub delete_modal_body: Element,

    // Bulk delete (list pages only)
    pub bulk_toggle: Option<HtmlInputElement>,
    pub select_all: Option<HtmlInputElement>,
    pub delete_checkboxes: Vec<HtmlInputElement>,

    // Tab triggers
    pub tab_buttons: Vec<Element>,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_form {
    ($id:expr) => {
        by_id_typed::<HtmlFormElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing form #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all page-level DOM references. Call once after the document
    /// has loaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            add_modal_title: get_el!("addModalTitle"),
            add_modal_body: get_el!("addModalBody"),

            delete_form: get_form!("deleteForm"),
            delete_modal_title: get_el!("deleteModalTitle"),
            delete_modal_body: get_el!("deleteModalBody"),

            bulk_toggle: by_id_typed::<HtmlInputElement>("bulkDeleteToggle"),
            select_all: by_id_typed::<HtmlInputElement>("selectAll"),
            delete_checkboxes: query_all_typed::<HtmlInputElement>(".delete-checkbox"),

            tab_buttons: query_all("button[data-bs-toggle=\"tab\"]"),
        })
    }
}
