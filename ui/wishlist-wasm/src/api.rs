//! HTTP layer.
//!
//! Wraps `fetch` for the same-origin Django endpoints: fragment GETs and
//! form-encoded POSTs carrying the `X-CSRFToken` header. POST replies are
//! handed back as status + body so the caller (or `wishlist-form-core`)
//! decides what they mean; only transport-level failures surface as `Err`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::dom;

/// Status and raw body of a completed exchange.
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Read the `csrftoken` cookie. `None` when absent; the server is the one
/// to reject an unauthenticated request.
pub fn csrf_token() -> Option<String> {
    let html_doc = dom::document().dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = html_doc.cookie().ok()?;
    for pair in cookies.split(';') {
        let (name, value) = pair.trim().split_once('=')?;
        if name == "csrftoken" {
            return Some(value.to_string());
        }
    }
    None
}

/// GET a server-rendered fragment, returning the body as HTML text.
pub async fn fetch_fragment(url: &str) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;

    let resp = send(&request).await?;

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;

    if !resp.ok() {
        return Err(format!("{} {}", resp.status(), resp.status_text()));
    }

    Ok(text.as_string().unwrap_or_default())
}

/// POST a form-encoded body with the CSRF header attached.
pub async fn post_form(url: &str, body: &str) -> Result<HttpReply, String> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);

    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;
    headers
        .set("Content-Type", "application/x-www-form-urlencoded")
        .map_err(|e| format!("{:?}", e))?;
    if let Some(token) = csrf_token() {
        headers
            .set("X-CSRFToken", &token)
            .map_err(|e| format!("{:?}", e))?;
    }
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;

    let resp = send(&request).await?;

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;

    Ok(HttpReply {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

async fn send(request: &Request) -> Result<Response, String> {
    let window = dom::window();
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| format!("fetch error: {:?}", e))?;

    resp_value
        .dyn_into()
        .map_err(|_| "response is not a Response".to_string())
}
