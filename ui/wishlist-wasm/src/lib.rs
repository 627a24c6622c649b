//! Wishlist WASM Frontend
//!
//! Pure Rust + WASM glue for the server-rendered wishlist pages: the
//! add/edit dialog with its product lookup, the delete/bulk-delete modals,
//! and tab/scroll persistence. Each concern lives in its own module.
//!
//! The templates call the exported `openModal` / `openEditModal` /
//! `openDeleteModal` / `openBulkDeleteModal` functions from inline handlers,
//! exactly as they called the JS globals they replace.

pub mod api;
pub mod bulk;
pub mod dom;
pub mod modal;
pub mod scrape_form;
pub mod scroll;
pub mod state;
pub mod tabs;

use wasm_bindgen::prelude::*;

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let els = dom::Elements::bind()?;

    scroll::init();
    tabs::init(&els);
    bulk::init(&els);

    state::set_elements(els);

    Ok(())
}

/// Open the add-item dialog: loads the form fragment from `url` and arms
/// the lookup-first submit flow.
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(title: String, url: String) {
    wasm_bindgen_futures::spawn_local(modal::open_for_create(title, url));
}

/// Open the edit dialog for an existing item; submits go straight to the
/// bound action, no lookup step.
#[wasm_bindgen(js_name = openEditModal)]
pub fn open_edit_modal(title: String, url: String) {
    wasm_bindgen_futures::spawn_local(modal::open_for_edit(title, url));
}

/// Point the delete confirmation dialog at a single record.
#[wasm_bindgen(js_name = openDeleteModal)]
pub fn open_delete_modal(url: String, label: String) {
    if let Some(els) = state::elements() {
        bulk::open_delete_modal(&els, &url, &label);
    }
}

/// Point the delete confirmation dialog at every checked row.
#[wasm_bindgen(js_name = openBulkDeleteModal)]
pub fn open_bulk_delete_modal() {
    if let Some(els) = state::elements() {
        bulk::open_bulk_delete_modal(&els);
    }
}
