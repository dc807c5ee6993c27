//! Thin wrappers over the browser APIs the views use.

use wasm_bindgen_futures::JsFuture;

/// Origin of the current page, e.g. `https://agenda.studio.com`.
pub fn origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        tracing::error!(url, error = ?e, "failed to open window");
    }
}

/// Write `text` to the clipboard. Returns whether it succeeded.
pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let promise = window.navigator().clipboard().write_text(text);
    match JsFuture::from(promise).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!(error = ?e, "clipboard write failed");
            false
        }
    }
}
