/// Errors raised while attaching the feedback helpers to a page.
///
/// The busy toggles themselves never fail: a missing element is a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("no global `window` exists; the feedback helpers must run on the main thread of a page")]
    NoWindow,

    #[error("the window has no document attached")]
    NoDocument,

    #[error("`{selector}` is not a valid selector list")]
    InvalidSelector { selector: String },

    #[error("javascript error: {0}")]
    Js(String),
}

impl FeedbackError {
    pub(crate) fn invalid_selector(selector: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
        }
    }
}
