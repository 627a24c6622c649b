//! Delete confirmation modal and bulk-delete checkbox panel.
//!
//! The row checkboxes are server-rendered; this module only toggles their
//! visibility, keeps the select-all box honest, and points the shared
//! delete form at the right endpoint before the dialog opens.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::dom::{self, Elements};

const BULK_DELETE_URL: &str = "/wishlist/bulk_delete/";
const BULK_IDS_ID: &str = "bulkDeleteIds";

/// Wire the bulk-delete controls. No-op on pages without them.
pub fn init(els: &Elements) {
    let Some(toggle) = els.bulk_toggle.clone() else {
        return;
    };

    // Checkbox visibility follows the toggle, once at load and on change.
    update_visibility(&toggle, &els.delete_checkboxes);
    {
        let toggle2 = toggle.clone();
        let boxes = els.delete_checkboxes.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            update_visibility(&toggle2, &boxes);
        }) as Box<dyn FnMut(_)>);
        toggle
            .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .unwrap();
        cb.forget();
    }

    if let Some(select_all) = els.select_all.clone() {
        {
            let select_all2 = select_all.clone();
            let boxes = els.delete_checkboxes.clone();
            let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
                let checked = select_all2.checked();
                for b in &boxes {
                    b.set_checked(checked);
                }
            }) as Box<dyn FnMut(_)>);
            select_all
                .add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }

        // Unchecking any row clears select-all.
        for b in &els.delete_checkboxes {
            let b2 = b.clone();
            let select_all2 = select_all.clone();
            let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
                if !b2.checked() && select_all2.checked() {
                    select_all2.set_checked(false);
                }
            }) as Box<dyn FnMut(_)>);
            b.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
                .unwrap();
            cb.forget();
        }
    }
}

fn update_visibility(toggle: &HtmlInputElement, boxes: &[HtmlInputElement]) {
    let visibility = if toggle.checked() { "visible" } else { "hidden" };
    for b in boxes {
        let _ = b.style().set_property("visibility", visibility);
    }
}

/// Point the delete dialog at a single record.
pub fn open_delete_modal(els: &Elements, url: &str, label: &str) {
    els.delete_form.set_action(url);
    dom::set_text(&els.delete_modal_title, &format!("Delete {label}"));
    dom::set_text(
        &els.delete_modal_body,
        &format!("Are you sure you want to delete this {label}?"),
    );
}

/// Point the delete dialog at the bulk endpoint with every checked row's id
/// in a hidden `ids` field (comma-joined, old field replaced).
pub fn open_bulk_delete_modal(els: &Elements) {
    let checked: Vec<String> = els
        .delete_checkboxes
        .iter()
        .filter(|b| b.checked())
        .map(|b| b.value())
        .collect();

    els.delete_form.set_action(BULK_DELETE_URL);
    dom::set_text(&els.delete_modal_title, "Delete Selected Items");
    dom::set_text(
        &els.delete_modal_body,
        &format!("Are you sure you want to delete {} item(s)?", checked.len()),
    );

    if let Some(old) = dom::by_id(BULK_IDS_ID) {
        old.remove();
    }

    let hidden: HtmlInputElement = dom::create_element("input").unchecked_into();
    hidden.set_type("hidden");
    hidden.set_name("ids");
    hidden.set_id(BULK_IDS_ID);
    hidden.set_value(&checked.join(","));
    let _ = els.delete_form.append_child(&hidden);
}
