//! Busy/idle toggles for the control that started a pending operation.
//!
//! A control moves Idle -> Busy through [`set_busy`] and back through [`clear_busy`].
//! There is no timeout: the caller always clears the busy state itself.

use crate::PageElement;

/// Label shown when the caller does not supply one.
pub const DEFAULT_BUSY_LABEL: &str = "Carregando...";

/// The spinning glyph placed in front of the busy label.
pub const BUSY_INDICATOR: &str = r#"<span class="animate-spin inline-block mr-2">⏳</span>"#;

/// The markup a busy control displays for `label`.
pub fn busy_markup(label: &str) -> String {
    format!("{BUSY_INDICATOR} {label}")
}

/// Disable `element` and replace its content with the busy indicator and `label`.
///
/// `None` for the element is a silent no-op, as is calling this on a control that is
/// already busy (the label is simply overwritten). The label is inserted as markup.
///
/// # Example
///
/// ```rust
/// use planner_feedback::{set_busy, MemoryElement, PageElement};
///
/// let button = MemoryElement::new("button").with_inner_html("Save");
/// set_busy(Some(&button), Some("Saving..."));
///
/// assert!(button.is_disabled());
/// assert!(button.inner_html().contains("Saving..."));
/// ```
pub fn set_busy<E: PageElement + ?Sized>(element: Option<&E>, label: Option<&str>) {
    let Some(element) = element else {
        return;
    };

    element.set_disabled(true);
    element.set_inner_html(&busy_markup(label.unwrap_or(DEFAULT_BUSY_LABEL)));
}

/// Re-enable `element` and restore `original` verbatim.
///
/// The caller captures `original` before calling [`set_busy`]; it is not validated.
pub fn clear_busy<E: PageElement + ?Sized>(element: Option<&E>, original: &str) {
    let Some(element) = element else {
        return;
    };

    element.set_disabled(false);
    element.set_inner_html(original);
}

/// Holds a control in the busy state and restores it when released or dropped.
///
/// The content captured on [`BusyGuard::engage`] is what gets restored, so engaging a
/// guard on a control that is already busy restores the busy markup.
pub struct BusyGuard<E: PageElement> {
    element: E,
    original: Option<String>,
}

impl<E: PageElement> BusyGuard<E> {
    pub fn engage(element: E, label: Option<&str>) -> Self {
        let original = element.inner_html();
        set_busy(Some(&element), label);
        Self {
            element,
            original: Some(original),
        }
    }

    /// The content that will be restored.
    pub fn original(&self) -> &str {
        self.original.as_deref().unwrap_or_default()
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Restore the control now instead of waiting for the guard to drop.
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(original) = self.original.take() {
            clear_busy(Some(&self.element), &original);
        }
    }
}

impl<E: PageElement> Drop for BusyGuard<E> {
    fn drop(&mut self) {
        self.restore();
    }
}
