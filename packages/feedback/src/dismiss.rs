//! Fade out and remove success/error banners some time after the page is ready.
//!
//! The scan runs once: banners rendered later are never picked up. Each banner gets its
//! own pair of timers, the fade and then the removal, and nothing orders one banner's
//! timers against another's.

use std::{cell::RefCell, rc::Rc};

use crate::{FeedbackConfig, FeedbackError, Page, PageElement, Scheduler, TimerHandle};

struct Dismissal {
    fade: TimerHandle,
    removal: Rc<RefCell<Option<TimerHandle>>>,
}

impl Dismissal {
    fn is_pending(&self) -> bool {
        self.fade.is_pending()
            || self
                .removal
                .borrow()
                .as_ref()
                .is_some_and(TimerHandle::is_pending)
    }

    fn cancel(&self) {
        self.fade.cancel();
        if let Some(removal) = self.removal.borrow().as_ref() {
            removal.cancel();
        }
    }
}

/// The dismissal sequences started by one page-ready scan.
///
/// Dropping this value leaves every sequence running. Call [`AutoDismiss::cancel_all`]
/// when the page is being torn down early.
pub struct AutoDismiss {
    dismissals: Vec<Dismissal>,
}

impl AutoDismiss {
    /// Scan `page` for notification banners and schedule their fade and removal.
    ///
    /// An element that has already left the page when one of its timers fires is skipped.
    pub fn start<P: Page>(
        page: &P,
        scheduler: Rc<dyn Scheduler>,
        config: &FeedbackConfig,
    ) -> Result<Self, FeedbackError> {
        if config.notice_selectors.is_empty() {
            return Ok(Self {
                dismissals: Vec::new(),
            });
        }

        let notices = page.query_selector_all(&config.selector_list())?;
        tracing::debug!(
            count = notices.len(),
            after = ?config.dismiss_after,
            "scheduling notification dismissal"
        );

        let dismissals = notices
            .into_iter()
            .map(|notice| schedule_dismissal(notice, &scheduler, config))
            .collect();

        Ok(Self { dismissals })
    }

    /// Number of banners found by the scan.
    pub fn len(&self) -> usize {
        self.dismissals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dismissals.is_empty()
    }

    /// Number of banners whose sequence has not finished yet.
    pub fn pending(&self) -> usize {
        self.dismissals.iter().filter(|d| d.is_pending()).count()
    }

    /// Stop every sequence that has not finished. Banners already faded stay faded.
    pub fn cancel_all(&self) {
        for dismissal in &self.dismissals {
            dismissal.cancel();
        }
    }
}

fn schedule_dismissal<E>(
    notice: E,
    scheduler: &Rc<dyn Scheduler>,
    config: &FeedbackConfig,
) -> Dismissal
where
    E: PageElement + Clone + 'static,
{
    let removal = Rc::new(RefCell::new(None));
    let transition = config.transition();
    let fade_duration = config.fade_duration;

    let fade = {
        let timers = scheduler.clone();
        let removal = removal.clone();
        scheduler.schedule(
            config.dismiss_after,
            Box::new(move || {
                if !notice.is_connected() {
                    tracing::trace!("notification left the page before fading");
                    return;
                }

                notice.set_style_property("transition", &transition);
                notice.set_style_property("opacity", "0");

                let handle = timers.schedule(
                    fade_duration,
                    Box::new(move || {
                        if notice.is_connected() {
                            notice.remove();
                        } else {
                            tracing::trace!("notification left the page while fading");
                        }
                    }),
                );
                *removal.borrow_mut() = Some(handle);
            }),
        )
    };

    Dismissal { fade, removal }
}
