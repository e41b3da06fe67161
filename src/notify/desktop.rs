//! Desktop notifications through the platform notification service

use notify_rust::{Notification, Timeout};

use super::NotificationChannel;

/// Shows notifications with `notify-rust`
#[derive(Debug, Clone)]
pub struct DesktopChannel {
    app_name: String,
    timeout: Timeout,
}

impl DesktopChannel {
    pub fn new() -> Self {
        Self {
            app_name: "countdown-panel".to_string(),
            timeout: Timeout::Milliseconds(10000),
        }
    }
}

impl Default for DesktopChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel for DesktopChannel {
    fn show(&self, message: &str) -> Result<(), String> {
        Notification::new()
            .appname(&self.app_name)
            .summary(message)
            .body("The countdown timer reached 00:00:00")
            .timeout(self.timeout)
            .show()
            .map(|_| ())
            .map_err(|e| format!("Failed to show notification: {}", e))
    }
}
