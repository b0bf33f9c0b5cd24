//! Navigation and notification collaborators consumed by the controllers.

use tracing::{error, info};

/// Route of the landing page.
pub const HOME_ROUTE: &str = "/";

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Navigator that only records the transition in the log stream. Used where
/// no routing shell is attached (headless runs, the console app).
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, path: &str) {
        info!(path, "nav: route change requested");
    }
}

pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn info(&self, message: &str) {
        info!(message, "notify: info");
    }

    fn error(&self, message: &str) {
        error!(message, "notify: error");
    }
}
