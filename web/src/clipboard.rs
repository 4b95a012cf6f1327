use gloo::utils::{body, document, window};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

/// Copies `text` to the clipboard, returning whether any method succeeded.
///
/// Tries the async clipboard API first and falls back to a hidden textarea
/// with `document.execCommand("copy")`. Failures are only logged.
pub(crate) async fn copy_text(text: &str) -> bool {
    let promise = window().navigator().clipboard().write_text(text);
    match JsFuture::from(promise).await {
        Ok(_) => return true,
        Err(err) => log::warn!("Clipboard API failed, trying fallback: {:?}", err),
    }

    match copy_with_textarea(text) {
        Ok(true) => true,
        Ok(false) => {
            log::error!("Fallback copy was refused");
            false
        }
        Err(err) => {
            log::error!("Fallback copy failed: {:?}", err);
            false
        }
    }
}

fn copy_with_textarea(text: &str) -> Result<bool, JsValue> {
    let textarea: HtmlTextAreaElement = document().create_element("textarea")?.dyn_into()?;
    textarea.set_value(text);
    textarea.set_attribute("readonly", "")?;
    let style = textarea.style();
    style.set_property("position", "fixed")?;
    style.set_property("opacity", "0")?;

    body().append_child(&textarea)?;
    textarea.select();
    let copied = document()
        .dyn_into::<HtmlDocument>()
        .map_err(JsValue::from)
        .and_then(|html| html.exec_command("copy"));
    textarea.remove();
    copied
}
