//! Form lifecycle logic for the wishlist add/edit dialog.
//!
//! Everything here is pure and browser-free: the WASM frontend asks this
//! crate what a lookup response *means* and what the form should look like
//! afterwards, then applies the answer to the live document. Keeping the
//! branching on this side makes the behaviour natively testable.

use serde::Deserialize;
use thiserror::Error;

// ── User-facing messages ──

/// Shown when the server answered but could not extract product data and
/// supplied no error text of its own.
pub const GENERIC_SOFT_FAILURE: &str =
    "We couldn't read product details from that link. You can fill the fields in yourself.";

/// Shown when the lookup request never completed (network/transport error)
/// or the response body was unreadable.
pub const GENERIC_NETWORK_FAILURE: &str =
    "Product lookup failed. Check your connection or fill the fields in yourself.";

/// Inline validation message for an empty product URL.
pub const EMPTY_URL_MESSAGE: &str = "Enter a product URL first.";

// ── Form mode ──

/// Submission behaviour of the dialog's submit control.
///
/// Exactly one mode is active at a time; transitions happen only on dialog
/// (re)initialisation and on lookup completion (any outcome of a lookup
/// lands on [`FormMode::ReadyToSubmit`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    /// URL entered but not looked up yet; submitting triggers the lookup.
    Search,
    /// Lookup finished (or degraded to manual entry); submitting persists
    /// via the browser's native form submission.
    ReadyToSubmit,
    /// Editing an existing record; submitting POSTs directly, no lookup.
    Edit,
}

impl FormMode {
    /// Label carried by the submit control in this mode.
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Search => "Search",
            FormMode::ReadyToSubmit => "Submit",
            FormMode::Edit => "Save",
        }
    }

    /// Whether the controller intercepts the submit event in this mode.
    /// `ReadyToSubmit` lets the native submission through untouched.
    pub fn intercepts_submit(self) -> bool {
        !matches!(self, FormMode::ReadyToSubmit)
    }
}

// ── Validation ──

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a product URL is required")]
    EmptyUrl,
}

/// Validate the product-URL field. Whitespace-only input counts as empty;
/// no network call may be made for it.
pub fn validate_item_url(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyUrl)
    } else {
        Ok(trimmed)
    }
}

// ── Lookup response ──

/// Parsed body of one `/scrape-product/` response. Lives for a single
/// submit-cycle; it is discarded once reconciled into the form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScrapeResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Product data extracted from a successful lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub price: String,
    pub image: Option<String>,
}

/// What one lookup attempt amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    /// 2xx with no error field: fields ready to populate the form.
    Success(ProductFields),
    /// The server answered but declined or failed to extract data, either
    /// via a non-2xx status or an `error` field in a 2xx body.
    SoftFailure(String),
    /// The exchange itself failed: transport error, or a 2xx body that was
    /// not parseable JSON (treated identically for UI purposes).
    HardFailure,
}

/// Classify a completed HTTP exchange.
///
/// Non-2xx replies are soft failures even when the body is unreadable; a
/// 2xx reply with an unreadable body is a hard failure.
pub fn classify_reply(status: u16, body: &str) -> LookupOutcome {
    let parsed = serde_json::from_str::<ScrapeResult>(body).ok();

    if !(200..300).contains(&status) {
        let message = parsed
            .and_then(|r| r.error)
            .unwrap_or_else(|| GENERIC_SOFT_FAILURE.to_owned());
        return LookupOutcome::SoftFailure(message);
    }

    match parsed {
        None => LookupOutcome::HardFailure,
        Some(result) => {
            if let Some(error) = result.error {
                return LookupOutcome::SoftFailure(error);
            }
            LookupOutcome::Success(ProductFields {
                name: result.name.unwrap_or_default(),
                price: result.price.unwrap_or_default(),
                image: result.image.filter(|url| !url.is_empty()),
            })
        }
    }
}

// ── Reconciliation ──

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeSeverity {
    Warning,
    Error,
}

/// Inline message rendered next to the lookup results. Render-or-replace:
/// the form never shows more than one notice at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub text: String,
}

impl Notice {
    pub fn warning(text: impl Into<String>) -> Notice {
        Notice {
            severity: NoticeSeverity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Notice {
        Notice {
            severity: NoticeSeverity::Error,
            text: text.into(),
        }
    }
}

/// Complete set of form writes for one lookup outcome.
///
/// `image` drives both the visible preview and the hidden image value, so
/// the two can never diverge. The results section is revealed and the
/// submit control re-enabled for every plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub name: String,
    pub price: String,
    pub image: Option<String>,
    pub notice: Option<Notice>,
    pub mode: FormMode,
}

/// Turn a lookup outcome into the form writes it requires.
///
/// Every outcome, total network failure included, converges on an editable
/// form in `ReadyToSubmit` mode: manual entry is always the fallback.
pub fn reconcile(outcome: LookupOutcome) -> Reconciliation {
    match outcome {
        LookupOutcome::Success(fields) => Reconciliation {
            name: fields.name,
            price: fields.price,
            image: fields.image,
            notice: None,
            mode: FormMode::ReadyToSubmit,
        },
        LookupOutcome::SoftFailure(message) => Reconciliation {
            name: String::new(),
            price: String::new(),
            image: None,
            notice: Some(Notice::warning(message)),
            mode: FormMode::ReadyToSubmit,
        },
        LookupOutcome::HardFailure => Reconciliation {
            name: String::new(),
            price: String::new(),
            image: None,
            notice: Some(Notice::error(GENERIC_NETWORK_FAILURE)),
            mode: FormMode::ReadyToSubmit,
        },
    }
}

// ── Lookup generation ──

/// Monotonic counter guarding against stale lookup responses.
///
/// Reopening or resetting the dialog begins a new generation; a response
/// carrying an older ticket must not touch the form.
#[derive(Debug, Default)]
pub struct LookupGeneration(u64);

impl LookupGeneration {
    /// Start a new generation, invalidating every outstanding ticket.
    pub fn begin(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_url_is_rejected_without_network() {
        for raw in ["", "   ", "\t", " \n "] {
            assert_eq!(validate_item_url(raw), Err(ValidationError::EmptyUrl));
        }
    }

    #[test]
    fn url_is_trimmed_before_use() {
        assert_eq!(
            validate_item_url("  https://example.com/item  "),
            Ok("https://example.com/item")
        );
    }

    #[test]
    fn success_with_image_populates_preview_and_hidden_value_together() {
        let outcome = classify_reply(
            200,
            r#"{"name":"Lamp","price":"19.99","image":"https://cdn.example.com/lamp.jpg"}"#,
        );
        let plan = reconcile(outcome);
        assert_eq!(plan.name, "Lamp");
        assert_eq!(plan.price, "19.99");
        assert_eq!(plan.image.as_deref(), Some("https://cdn.example.com/lamp.jpg"));
        assert_eq!(plan.notice, None);
        assert_eq!(plan.mode, FormMode::ReadyToSubmit);
    }

    #[test]
    fn success_without_image_clears_preview_and_hidden_value_together() {
        let outcome = classify_reply(200, r#"{"name":"Lamp","price":"19.99"}"#);
        let plan = reconcile(outcome);
        assert_eq!(plan.image, None);
        assert_eq!(plan.mode, FormMode::ReadyToSubmit);
    }

    #[test]
    fn empty_string_image_counts_as_absent() {
        let outcome = classify_reply(200, r#"{"name":"Lamp","image":""}"#);
        match outcome {
            LookupOutcome::Success(fields) => assert_eq!(fields.image, None),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn non_2xx_with_error_field_is_soft_failure_with_server_text() {
        let outcome = classify_reply(422, r#"{"error":"bad url"}"#);
        assert_eq!(outcome, LookupOutcome::SoftFailure("bad url".to_owned()));

        let plan = reconcile(outcome);
        assert_eq!(plan.name, "");
        assert_eq!(plan.price, "");
        assert_eq!(plan.image, None);
        assert_eq!(plan.notice, Some(Notice::warning("bad url")));
        assert_eq!(plan.mode, FormMode::ReadyToSubmit);
    }

    #[test]
    fn non_2xx_with_unreadable_body_falls_back_to_generic_soft_failure() {
        let outcome = classify_reply(500, "<html>Server Error</html>");
        assert_eq!(
            outcome,
            LookupOutcome::SoftFailure(GENERIC_SOFT_FAILURE.to_owned())
        );
    }

    #[test]
    fn error_field_on_2xx_is_still_a_soft_failure() {
        let outcome = classify_reply(200, r#"{"error":"no product found"}"#);
        assert_eq!(
            outcome,
            LookupOutcome::SoftFailure("no product found".to_owned())
        );
    }

    #[test]
    fn unreadable_2xx_body_is_a_hard_failure() {
        assert_eq!(classify_reply(200, "not json"), LookupOutcome::HardFailure);
    }

    #[test]
    fn hard_failure_clears_fields_like_a_soft_failure() {
        let plan = reconcile(LookupOutcome::HardFailure);
        assert_eq!(plan.name, "");
        assert_eq!(plan.price, "");
        assert_eq!(plan.image, None);
        assert_eq!(plan.notice, Some(Notice::error(GENERIC_NETWORK_FAILURE)));
        assert_eq!(plan.mode, FormMode::ReadyToSubmit);
    }

    #[test]
    fn every_mode_carries_its_label_and_interception() {
        assert_eq!(FormMode::Search.submit_label(), "Search");
        assert_eq!(FormMode::ReadyToSubmit.submit_label(), "Submit");
        assert_eq!(FormMode::Edit.submit_label(), "Save");

        assert!(FormMode::Search.intercepts_submit());
        assert!(FormMode::Edit.intercepts_submit());
        assert!(!FormMode::ReadyToSubmit.intercepts_submit());
    }

    #[test]
    fn superseded_lookup_ticket_is_stale() {
        let mut generation = LookupGeneration::default();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
