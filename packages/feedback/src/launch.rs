//! This module contains the `launch` function, the entry point for planner pages.

use std::{cell::Cell, rc::Rc};

use crate::{
    web::{on_dom_ready, GlooScheduler, WebPage},
    AutoDismiss, FeedbackConfig, FeedbackError,
};

thread_local! {
    static LAUNCHED: Cell<bool> = const { Cell::new(false) };
}

/// Mark the page as launched. Only the first call returns `true`.
fn claim_launch() -> bool {
    !LAUNCHED.with(|launched| launched.replace(true))
}

fn release_launch() {
    LAUNCHED.with(|launched| launched.set(false));
}

/// Log the startup line and arm the notification auto-dismiss for the current page.
///
/// The scan runs once, when the document is ready. Call this from the page's startup
/// code; nothing is registered until it is called. Later calls on the same page are
/// ignored, so the startup line is logged and each banner is scheduled only once.
///
/// # Example
///
/// ```rust, ignore
/// planner_feedback::launch(planner_feedback::FeedbackConfig::default())?;
/// ```
pub fn launch(config: FeedbackConfig) -> Result<(), FeedbackError> {
    if !claim_launch() {
        tracing::trace!("feedback helpers already launched on this page");
        return Ok(());
    }

    let page = match WebPage::get() {
        Ok(page) => page,
        Err(err) => {
            release_launch();
            return Err(err);
        }
    };

    if let Some(message) = config.startup_line() {
        tracing::info!("{message}");
    }

    let document = page.document().clone();
    on_dom_ready(&document, move || {
        match AutoDismiss::start(&page, Rc::new(GlooScheduler), &config) {
            Ok(dismiss) => tracing::debug!(banners = dismiss.len(), "notification dismissal armed"),
            Err(err) => tracing::error!("failed to scan for notifications: {err}"),
        }
    })
}
