//! Toast notifications.
//!
//! Components never touch the DOM to report an outcome; they call a
//! [`Notifier`]. The browser implementation lives in `web::notifications`,
//! and a plain `Vec<Notification>` records toasts in tests.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GalaxyError;

/// Severity of a toast; also its CSS modifier class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Operation completed.
    Success,
    /// Operation rejected or failed.
    Error,
    /// User needs to change something before retrying.
    Warning,
    /// Neutral message.
    #[default]
    Info,
}

impl NotificationLevel {
    /// Icon shown next to the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Warning => "⚠️",
            Self::Info => "ℹ️",
        }
    }

    /// CSS modifier class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationLevel {
    type Err = GalaxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(GalaxyError::validation(format!(
                "unknown notification level '{other}'"
            ))),
        }
    }
}

/// One toast message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// Create a notification.
    #[must_use]
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// Class attribute of the toast element, e.g. `notification warning`.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("notification {}", self.level)
    }
}

/// Sink for user-visible toasts.
pub trait Notifier {
    /// Show one toast. Toasts are independent and may stack.
    fn notify(&mut self, level: NotificationLevel, message: &str);

    /// Show a success toast.
    fn success(&mut self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Show an error toast.
    fn error(&mut self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }

    /// Show a warning toast.
    fn warning(&mut self, message: &str) {
        self.notify(NotificationLevel::Warning, message);
    }
}

impl Notifier for Vec<Notification> {
    fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.push(Notification::new(level, message));
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, level: NotificationLevel, message: &str) {
        (**self).notify(level, message);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(NotificationLevel::Success.icon(), "✅");
        assert_eq!(NotificationLevel::Error.icon(), "❌");
        assert_eq!(NotificationLevel::Warning.icon(), "⚠️");
        assert_eq!(NotificationLevel::Info.icon(), "ℹ️");
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!("fatal".parse::<NotificationLevel>().is_err());
        assert_eq!(
            "warning".parse::<NotificationLevel>().ok(),
            Some(NotificationLevel::Warning)
        );
    }

    #[test]
    fn test_class_name() {
        let n = Notification::new(NotificationLevel::Error, "boom");
        assert_eq!(n.class_name(), "notification error");
    }

    #[test]
    fn test_vec_records_in_order() {
        let mut log: Vec<Notification> = Vec::new();
        log.warning("first");
        log.success("second");
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].level, NotificationLevel::Warning);
        assert_eq!(log[1].message, "second");
    }

    #[test]
    fn test_level_serde_lowercase() {
        let json = serde_json::to_string(&NotificationLevel::Success).unwrap();
        assert_eq!(json, "\"success\"");
    }
}
