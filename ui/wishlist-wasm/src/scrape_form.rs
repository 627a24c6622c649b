//! Add/edit dialog form controller.
//!
//! Owns the injected form's lifecycle: submit interception, the one
//! best-effort product lookup, and reconciling the visible form to the
//! lookup's outcome. The decisions live in `wishlist-form-core`; this module
//! binds the fragment's controls and applies the resulting writes.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlImageElement, HtmlInputElement};

use wishlist_form_core::{
    classify_reply, reconcile, validate_item_url, FormMode, LookupOutcome, Notice,
    NoticeSeverity, Reconciliation, EMPTY_URL_MESSAGE,
};

use crate::api;
use crate::dom;
use crate::modal;
use crate::state;

const VALIDATION_ID: &str = "itemUrlValidation";
const NOTICE_ID: &str = "scrapeNotice";

/// Controls of one injected form fragment.
///
/// Rebound on every dialog open; handlers close over their own binding, so a
/// superseded dialog's fields are never reached through ambient lookups.
#[derive(Clone)]
pub struct FormFields {
    pub form: HtmlFormElement,
    pub url: HtmlInputElement,
    pub name: HtmlInputElement,
    pub price: HtmlInputElement,
    pub image_preview: HtmlImageElement,
    pub image_value: HtmlInputElement,
    pub results: Element,
    pub submit: HtmlButtonElement,
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        dom::by_id_typed::<$ty>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing form control #{}", $id)))?
    };
}

impl FormFields {
    /// Resolve the fragment's controls. Call after each injection.
    pub fn bind() -> Result<FormFields, JsValue> {
        Ok(FormFields {
            form: get_typed!(HtmlFormElement, "addModalForm"),
            url: get_typed!(HtmlInputElement, "itemUrl"),
            name: get_typed!(HtmlInputElement, "itemName"),
            price: get_typed!(HtmlInputElement, "itemPrice"),
            image_preview: get_typed!(HtmlImageElement, "itemImagePreview"),
            image_value: get_typed!(HtmlInputElement, "itemImage"),
            results: dom::by_id("scrapeResults")
                .ok_or_else(|| JsValue::from_str("missing form control #scrapeResults"))?,
            submit: get_typed!(HtmlButtonElement, "addModalSubmit"),
        })
    }

    /// Put the form into its initial shape for `mode`: label the submit
    /// control, enable it, and show the results section only when no lookup
    /// step precedes manual entry.
    pub fn apply_mode(&self, mode: FormMode) {
        dom::set_text(&self.submit, mode.submit_label());
        self.submit.set_disabled(false);
        match mode {
            FormMode::Search => dom::hide(&self.results),
            FormMode::ReadyToSubmit | FormMode::Edit => dom::show(&self.results),
        }
    }

    /// Apply one reconciliation plan to the live form.
    fn apply(&self, plan: &Reconciliation) {
        dom::set_input_value(&self.name, &plan.name);
        dom::set_input_value(&self.price, &plan.price);

        // Preview and hidden value move together, populated or cleared.
        match &plan.image {
            Some(src) => {
                self.image_preview.set_src(src);
                dom::show(&self.image_preview);
                dom::set_input_value(&self.image_value, src);
            }
            None => {
                self.image_preview.set_src("");
                dom::hide(&self.image_preview);
                dom::set_input_value(&self.image_value, "");
            }
        }

        match &plan.notice {
            Some(notice) => self.render_notice(notice),
            None => self.clear_notice(),
        }

        dom::show(&self.results);
        self.apply_mode(plan.mode);
    }

    /// Render the inline URL validation message, reusing the node so
    /// repeated submits never stack duplicates.
    fn render_validation(&self, text: &str) {
        let node = match dom::by_id(VALIDATION_ID) {
            Some(node) => node,
            None => {
                let node = dom::create_element("div");
                node.set_id(VALIDATION_ID);
                node.set_class_name("form-text text-danger");
                let _ = self.url.insert_adjacent_element("afterend", &node);
                node
            }
        };
        dom::set_text(&node, text);
    }

    fn clear_validation(&self) {
        if let Some(node) = dom::by_id(VALIDATION_ID) {
            node.remove();
        }
    }

    /// Render-or-replace the lookup notice: consecutive failures leave one
    /// node carrying the latest message.
    pub fn render_notice(&self, notice: &Notice) {
        let node = match dom::by_id(NOTICE_ID) {
            Some(node) => node,
            None => {
                let node = dom::create_element("div");
                node.set_id(NOTICE_ID);
                let _ = self.results.append_child(&node);
                node
            }
        };
        node.set_class_name(match notice.severity {
            NoticeSeverity::Warning => "form-text text-warning",
            NoticeSeverity::Error => "form-text text-danger",
        });
        dom::set_text(&node, &notice.text);
    }

    fn clear_notice(&self) {
        if let Some(node) = dom::by_id(NOTICE_ID) {
            node.remove();
        }
    }
}

/// Attach the submit handler to a freshly injected form. The handler reads
/// the current mode from state; `ReadyToSubmit` is the one branch that lets
/// the browser's native submission proceed.
pub fn attach_submit_handler(fields: FormFields) {
    let form = fields.form.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::SubmitEvent| {
        match state::form_mode() {
            FormMode::ReadyToSubmit => {}
            FormMode::Search => {
                event.prevent_default();
                on_search(&fields);
            }
            FormMode::Edit => {
                event.prevent_default();
                let fields = fields.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    on_edit_submit(&fields).await;
                });
            }
        }
    }) as Box<dyn FnMut(_)>);
    form.add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Search-mode submit: validate, then run the one asynchronous lookup.
fn on_search(fields: &FormFields) {
    let raw = dom::get_input_value(&fields.url);
    let item_url = match validate_item_url(&raw) {
        Ok(url) => url.to_owned(),
        Err(_) => {
            fields.render_validation(EMPTY_URL_MESSAGE);
            return;
        }
    };

    fields.clear_validation();
    fields.submit.set_disabled(true);
    dom::set_text(&fields.submit, "Searching...");

    let ticket = state::begin_lookup();
    let fields = fields.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let body = format!("item_url={}", js_sys::encode_uri_component(&item_url));
        let outcome = match api::post_form("/scrape-product/", &body).await {
            Ok(reply) => classify_reply(reply.status, &reply.body),
            Err(e) => {
                gloo_console::warn!("product lookup failed:", e);
                LookupOutcome::HardFailure
            }
        };

        // The dialog was reset or reopened while we were in flight.
        if !state::lookup_is_current(ticket) {
            gloo_console::debug!("ignoring stale product lookup response");
            return;
        }

        let plan = reconcile(outcome);
        fields.apply(&plan);
        state::set_form_mode(plan.mode);
    });
}

/// Edit-mode submit: POST the serialized form to its bound action. Success
/// closes the dialog and reloads; failure keeps the dialog open with an
/// inline error.
async fn on_edit_submit(fields: &FormFields) {
    let body = match serialize_form(&fields.form) {
        Ok(body) => body,
        Err(e) => {
            gloo_console::error!("form serialization failed:", e);
            fields.render_notice(&Notice::error("Saving failed. Please try again."));
            return;
        }
    };

    match api::post_form(&fields.form.action(), &body).await {
        Ok(reply) if (200..300).contains(&reply.status) => {
            modal::close_dialog();
            let _ = dom::window().location().reload();
        }
        Ok(reply) => {
            fields.render_notice(&Notice::error(format!(
                "Saving failed ({}). Your changes were not stored.",
                reply.status
            )));
        }
        Err(e) => {
            gloo_console::error!("edit submit failed:", e);
            fields.render_notice(&Notice::error(
                "Saving failed. Check your connection and try again.",
            ));
        }
    }
}

/// Form-encode every control of the form, `URLSearchParams` style.
fn serialize_form(form: &HtmlFormElement) -> Result<String, JsValue> {
    let data = web_sys::FormData::new_with_form(form)?;
    let params = web_sys::UrlSearchParams::new_with_str_sequence_sequence(data.as_ref())?;
    Ok(String::from(params.to_string()))
}
