use std::time::Duration;

/// Configuration for the notification auto-dismiss pass and the startup banner.
///
/// The defaults match the markup the planner pages render: success banners carry
/// `bg-green-100`, error banners carry `bg-red-100`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use planner_feedback::FeedbackConfig;
///
/// let cfg = FeedbackConfig::new()
///     .dismiss_after(Duration::from_secs(8))
///     .with_notice_selector(".bg-yellow-100");
///
/// assert_eq!(cfg.selector_list(), ".bg-green-100, .bg-red-100, .bg-yellow-100");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackConfig {
    pub(crate) notice_selectors: Vec<String>,
    pub(crate) dismiss_after: Duration,
    pub(crate) fade_duration: Duration,
    pub(crate) startup_message: Option<String>,
}

pub const DEFAULT_STARTUP_MESSAGE: &str = "Planner de Estudos - Sistema iniciado";

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            notice_selectors: vec![".bg-green-100".to_string(), ".bg-red-100".to_string()],
            dismiss_after: Duration::from_millis(5000),
            fade_duration: Duration::from_millis(500),
            startup_message: Some(DEFAULT_STARTUP_MESSAGE.to_string()),
        }
    }
}

impl FeedbackConfig {
    /// Create a new config with the planner defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selectors used to find notification banners.
    pub fn notice_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notice_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Add another selector to the notification scan.
    pub fn with_notice_selector(mut self, selector: impl Into<String>) -> Self {
        self.notice_selectors.push(selector.into());
        self
    }

    /// How long a notification stays fully visible after the page is ready.
    pub fn dismiss_after(mut self, delay: Duration) -> Self {
        self.dismiss_after = delay;
        self
    }

    /// How long the opacity fade runs before the element is removed.
    pub fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Set the line logged when the helpers start. `None` silences it.
    pub fn startup_message(mut self, message: Option<String>) -> Self {
        self.startup_message = message;
        self
    }

    pub fn selectors(&self) -> &[String] {
        &self.notice_selectors
    }

    pub fn dismiss_delay(&self) -> Duration {
        self.dismiss_after
    }

    pub fn fade(&self) -> Duration {
        self.fade_duration
    }

    pub fn startup_line(&self) -> Option<&str> {
        self.startup_message.as_deref()
    }

    /// The selectors joined into a single selector list, in scan order.
    pub fn selector_list(&self) -> String {
        self.notice_selectors.join(", ")
    }

    /// The CSS `transition` value applied right before the fade.
    pub fn transition(&self) -> String {
        format!("opacity {}s", self.fade_duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_planner_markup() {
        let cfg = FeedbackConfig::default();
        assert_eq!(cfg.selector_list(), ".bg-green-100, .bg-red-100");
        assert_eq!(cfg.dismiss_delay(), Duration::from_millis(5000));
        assert_eq!(cfg.fade(), Duration::from_millis(500));
        assert_eq!(cfg.startup_line(), Some(DEFAULT_STARTUP_MESSAGE));
    }

    #[test]
    fn transition_tracks_fade_duration() {
        assert_eq!(FeedbackConfig::default().transition(), "opacity 0.5s");

        let slow = FeedbackConfig::new().fade_duration(Duration::from_millis(1250));
        assert_eq!(slow.transition(), "opacity 1.25s");
    }

    #[test]
    fn selectors_can_be_replaced() {
        let cfg = FeedbackConfig::new().notice_selectors([".alert"]);
        assert_eq!(cfg.selectors(), [".alert".to_string()]);
        assert_eq!(cfg.selector_list(), ".alert");
    }
}
