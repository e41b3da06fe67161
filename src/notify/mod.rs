//! Completion notification
//!
//! When the countdown finishes, the user is told through a platform
//! notification if permission was granted. Otherwise, or if the platform
//! channel fails, a blocking terminal alert is used instead.

pub mod alert;
pub mod desktop;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use alert::TerminalAlert;
pub use desktop::DesktopChannel;

/// Message shown when the countdown reaches zero
pub const COMPLETION_MESSAGE: &str = "Countdown Complete!";

/// Permission to show platform notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Never answered; treated like denied
    Default,
}

impl NotificationPermission {
    pub fn is_granted(&self) -> bool {
        matches!(self, NotificationPermission::Granted)
    }
}

impl fmt::Display for NotificationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationPermission::Granted => "granted",
            NotificationPermission::Denied => "denied",
            NotificationPermission::Default => "default",
        };
        f.write_str(name)
    }
}

/// A platform notification channel (desktop notifications)
pub trait NotificationChannel: Send + Sync {
    fn show(&self, message: &str) -> Result<(), String>;
}

/// Synchronous, blocking alert used when notifications are unavailable
pub trait Alert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Anything that can tell the user the countdown finished
pub trait CompletionNotifier: Send + Sync {
    fn notify(&self);
}

/// Notifier that prefers the platform channel and falls back to an alert.
///
/// Channel failures are logged and never returned; there is no retry.
pub struct FallbackNotifier<C, A> {
    permission: NotificationPermission,
    channel: C,
    alert: A,
}

impl<C: NotificationChannel, A: Alert> FallbackNotifier<C, A> {
    pub fn new(permission: NotificationPermission, channel: C, alert: A) -> Self {
        Self {
            permission,
            channel,
            alert,
        }
    }
}

impl FallbackNotifier<DesktopChannel, TerminalAlert> {
    /// Desktop notifications with a terminal alert fallback
    pub fn desktop(permission: NotificationPermission) -> Self {
        Self::new(permission, DesktopChannel::new(), TerminalAlert::new())
    }
}

impl<C: NotificationChannel, A: Alert> CompletionNotifier for FallbackNotifier<C, A> {
    fn notify(&self) {
        if self.permission.is_granted() {
            match self.channel.show(COMPLETION_MESSAGE) {
                Ok(()) => {
                    info!("Completion notification shown");
                    return;
                }
                Err(e) => warn!("Notification failed, falling back to alert: {}", e),
            }
        } else {
            debug!("Notification permission is {}, using alert", self.permission);
        }

        self.alert.alert(COMPLETION_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder {
        messages: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Recorder {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl NotificationChannel for Recorder {
        fn show(&self, message: &str) -> Result<(), String> {
            self.messages.lock().unwrap().push(message.to_string());
            if self.fail {
                Err("no notification daemon".to_string())
            } else {
                Ok(())
            }
        }
    }

    impl Alert for Recorder {
        fn alert(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn granted_permission_uses_the_channel_only() {
        let channel = Recorder::default();
        let alert = Recorder::default();
        let notifier =
            FallbackNotifier::new(NotificationPermission::Granted, channel.clone(), alert.clone());

        notifier.notify();

        assert_eq!(channel.messages(), vec![COMPLETION_MESSAGE.to_string()]);
        assert!(alert.messages().is_empty());
    }

    #[test]
    fn missing_permission_falls_back_to_alert() {
        for permission in [NotificationPermission::Denied, NotificationPermission::Default] {
            let channel = Recorder::default();
            let alert = Recorder::default();
            let notifier = FallbackNotifier::new(permission, channel.clone(), alert.clone());

            notifier.notify();

            assert!(channel.messages().is_empty());
            assert_eq!(alert.messages(), vec![COMPLETION_MESSAGE.to_string()]);
        }
    }

    #[test]
    fn channel_failure_falls_back_without_retry() {
        let channel = Recorder::failing();
        let alert = Recorder::default();
        let notifier =
            FallbackNotifier::new(NotificationPermission::Granted, channel.clone(), alert.clone());

        notifier.notify();

        assert_eq!(channel.messages().len(), 1);
        assert_eq!(alert.messages().len(), 1);
    }

    #[test]
    fn permission_display_matches_cli_values() {
        assert_eq!(NotificationPermission::Granted.to_string(), "granted");
        assert_eq!(NotificationPermission::Default.to_string(), "default");
    }
}
