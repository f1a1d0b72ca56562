//! Notification and navigation seam
//!
//! The original frontend mutated the environment directly (a toast call plus
//! `window.location.href`). Both side effects sit behind [`UiSink`] here so
//! the client can be exercised without a simulated browser; the host app
//! installs a sink wired to its own toast and router.

use tracing::warn;

/// Where the UI should send the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The login page.
    Login,
}

impl Navigation {
    /// Browser path for this destination.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
        }
    }
}

/// Receiver for the user-visible side effects of a request.
pub trait UiSink: Send + Sync {
    /// Show an error notification.
    fn notify_error(&self, message: &str);

    /// Send the user somewhere (full-page navigation in the browser).
    fn navigate(&self, target: Navigation);
}

/// Default sink: log and do nothing else.
#[derive(Debug, Default)]
pub struct TracingUiSink;

impl UiSink for TracingUiSink {
    fn notify_error(&self, message: &str) {
        warn!(%message, "api error notification");
    }

    fn navigate(&self, target: Navigation) {
        warn!(path = target.path(), "navigation requested");
    }
}

/// Browser sink: real page navigation; notifications are logged until the
/// host app swaps in a sink backed by its toast component.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserUiSink;

#[cfg(target_arch = "wasm32")]
impl UiSink for BrowserUiSink {
    fn notify_error(&self, message: &str) {
        warn!(%message, "api error notification");
    }

    fn navigate(&self, target: Navigation) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(target.path());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_path() {
        assert_eq!(Navigation::Login.path(), "/login");
    }
}
