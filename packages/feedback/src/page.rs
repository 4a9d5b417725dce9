//! The seam between the feedback helpers and whatever owns the document.
//!
//! In the browser this is `web_sys`; in tests and headless hosts it is [`crate::MemoryPage`].

use crate::FeedbackError;

/// The handful of element operations the helpers need.
///
/// Every method takes `&self`: elements are handles into a document owned by the host page.
pub trait PageElement {
    /// The element's current markup content.
    fn inner_html(&self) -> String;

    /// Replace the element's markup content.
    fn set_inner_html(&self, html: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);

    /// Set a single inline style property, e.g. `opacity`.
    fn set_style_property(&self, property: &str, value: &str);

    /// Whether the element is still attached to its document.
    fn is_connected(&self) -> bool;

    /// Detach the element from its document. Detaching twice is a no-op.
    fn remove(&self);
}

/// A document that can be scanned for elements.
pub trait Page {
    type Element: PageElement + Clone + 'static;

    /// Every attached element matching the selector list, in document order.
    fn query_selector_all(&self, selectors: &str) -> Result<Vec<Self::Element>, FeedbackError>;
}
