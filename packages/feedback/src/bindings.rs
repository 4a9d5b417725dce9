//! JavaScript entry points for the server-rendered templates.

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::{clear_busy, set_busy, FeedbackConfig};

/// Install console logging and arm the notification auto-dismiss.
#[wasm_bindgen(js_name = initFeedback)]
pub fn init_feedback() -> Result<(), JsValue> {
    crate::web::init_logging();
    crate::launch(FeedbackConfig::default()).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen(js_name = showLoading)]
pub fn show_loading(element: Option<HtmlElement>, text: Option<String>) {
    set_busy(element.as_ref(), text.as_deref());
}

#[wasm_bindgen(js_name = hideLoading)]
pub fn hide_loading(element: Option<HtmlElement>, original_text: Option<String>) {
    clear_busy(element.as_ref(), original_text.as_deref().unwrap_or_default());
}
