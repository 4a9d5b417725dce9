//! The browser backend: `web_sys` elements and `gloo-timers` timeouts.

use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

use crate::{FeedbackError, Page, PageElement, Scheduler, TimerHandle};

impl From<JsValue> for FeedbackError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        FeedbackError::Js(message)
    }
}

/// The page the module was loaded into.
#[derive(Clone, Debug)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    /// Grab the document of the global window.
    pub fn get() -> Result<Self, FeedbackError> {
        let window = web_sys::window().ok_or(FeedbackError::NoWindow)?;
        let document = window.document().ok_or(FeedbackError::NoDocument)?;
        Ok(Self { document })
    }

    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for WebPage {
    type Element = HtmlElement;

    fn query_selector_all(&self, selectors: &str) -> Result<Vec<HtmlElement>, FeedbackError> {
        let list = self
            .document
            .query_selector_all(selectors)
            .map_err(|_| FeedbackError::invalid_selector(selectors))?;

        // non-html matches (svg, mathml) have no inline style we can fade
        Ok((0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect())
    }
}

impl PageElement for HtmlElement {
    fn inner_html(&self) -> String {
        Element::inner_html(self)
    }

    fn set_inner_html(&self, html: &str) {
        Element::set_inner_html(self, html)
    }

    fn is_disabled(&self) -> bool {
        self.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if let Err(err) = self.toggle_attribute_with_force("disabled", disabled) {
            tracing::warn!("failed to toggle `disabled`: {err:?}");
        }
    }

    fn set_style_property(&self, property: &str, value: &str) {
        if let Err(err) = self.style().set_property(property, value) {
            tracing::warn!("failed to set `{property}: {value}`: {err:?}");
        }
    }

    fn is_connected(&self) -> bool {
        Node::is_connected(self)
    }

    fn remove(&self) {
        Element::remove(self)
    }
}

/// A [`Scheduler`] backed by `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let handle = TimerHandle::new();
        let millis = timeout_millis(delay);

        // the handle decides whether the task runs, so the timeout is never cleared
        let _id = Timeout::new(millis, handle.guard(task)).forget();
        handle
    }
}

/// `setTimeout` reads its delay as a signed 32-bit integer; anything larger would fire
/// immediately.
fn timeout_millis(delay: Duration) -> u32 {
    const MAX_TIMEOUT_MS: u32 = i32::MAX as u32;
    u32::try_from(delay.as_millis())
        .unwrap_or(MAX_TIMEOUT_MS)
        .min(MAX_TIMEOUT_MS)
}

fn still_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Run `callback` once the document has been parsed.
///
/// If `DOMContentLoaded` already fired, the callback runs immediately.
pub fn on_dom_ready(
    document: &Document,
    callback: impl FnOnce() + 'static,
) -> Result<(), FeedbackError> {
    if !still_parsing(&document.ready_state()) {
        callback();
        return Ok(());
    }

    let listener = Closure::once_into_js(callback);
    document.add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())?;
    Ok(())
}

/// Route `tracing` events to the browser console. Safe to call more than once.
pub fn init_logging() {
    if tracing_wasm::try_set_as_global_default().is_err() {
        tracing::trace!("a global tracing subscriber is already installed");
    }
}
