//! Add/edit dialog plumbing.
//!
//! Loads the server-rendered form fragment into the dialog body, binds the
//! form's action, and hands the injected controls to `scrape_form`. The
//! dialog widget itself stays opaque: opening is driven by the page's own
//! toggle attributes, closing by clicking the dismiss control.

use wasm_bindgen::JsCast;

use wishlist_form_core::FormMode;

use crate::dom;
use crate::scrape_form::{self, FormFields};
use crate::{api, state};

/// Open the dialog for a new item: fragment load, mode `Search`, results
/// hidden until the lookup has something to show.
pub async fn open_for_create(title: String, url: String) {
    open(title, url, FormMode::Search).await;
}

/// Open the dialog for an existing item: mode `Edit` unconditionally, no
/// lookup step, results visible immediately.
pub async fn open_for_edit(title: String, url: String) {
    open(title, url, FormMode::Edit).await;
}

async fn open(title: String, url: String, mode: FormMode) {
    let Some(els) = state::elements() else {
        gloo_console::error!("modal opened before startup finished");
        return;
    };

    // Invalidate any lookup still in flight for a previous open.
    state::begin_lookup();

    dom::set_text(&els.add_modal_title, &title);

    let html = match api::fetch_fragment(&url).await {
        Ok(html) => html,
        Err(e) => {
            gloo_console::error!("form fragment load failed:", e);
            return;
        }
    };
    els.add_modal_body.set_inner_html(&html);

    let fields = match FormFields::bind() {
        Ok(fields) => fields,
        Err(e) => {
            gloo_console::error!("injected fragment is missing controls:", e);
            return;
        }
    };

    // The same URL serves the fragment and receives the submission.
    fields.form.set_action(&url);

    state::set_form_mode(mode);
    fields.apply_mode(mode);
    scrape_form::attach_submit_handler(fields);
}

/// Dismiss the add/edit dialog through the widget's own close control.
pub fn close_dialog() {
    match dom::query("#addModal [data-bs-dismiss=\"modal\"]") {
        Some(el) => {
            if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>() {
                html.click();
            }
        }
        None => gloo_console::warn!("no dismiss control found for #addModal"),
    }
}
