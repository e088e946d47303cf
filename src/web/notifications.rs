//! DOM toasts.

use gloo::timers::callback::Timeout;

use super::animate;
use super::dom;
use crate::anim::{lerp, Easing, Tween};
use crate::config::NotificationConfig;
use crate::error::{GalaxyError, GalaxyResult};
use crate::notify::{Notification, NotificationLevel, Notifier};

/// Appends an animated toast to `<body>` for every notification.
#[derive(Clone)]
pub struct NotificationService {
    document: web_sys::Document,
    config: NotificationConfig,
}

impl NotificationService {
    pub fn new(document: web_sys::Document, config: NotificationConfig) -> Self {
        Self { document, config }
    }

    /// Show one toast: slide in, wait, slide out, remove.
    pub fn show(&self, notification: &Notification) -> GalaxyResult<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| GalaxyError::dom("no <body>"))?;

        let toast = dom::create(&self.document, "div", &notification.class_name())?;
        dom::append_text(
            &self.document,
            &toast,
            "span",
            "notification-icon",
            notification.level.icon(),
        )?;
        dom::append_text(
            &self.document,
            &toast,
            "span",
            "notification-message",
            &notification.message,
        )?;
        apply_slide(&toast, 0.0);
        dom::append(&body, &toast)?;

        let enter = Tween::new(f64::from(self.config.enter_ms), Easing::EaseOutExpo);
        let exit = Tween::new(f64::from(self.config.exit_ms), Easing::EaseInExpo);
        let dismiss_after = self.config.dismiss_after_ms;

        let entering = toast.clone();
        animate::play(enter, move |p| apply_slide(&entering, p), || {});

        Timeout::new(dismiss_after, move || {
            let leaving = toast.clone();
            animate::play(
                exit,
                move |p| apply_slide(&leaving, 1.0 - p),
                move || toast.remove(),
            );
        })
        .forget();
        Ok(())
    }
}

/// `shown` = 0 is off-screen to the right and transparent, 1 is in place.
fn apply_slide(toast: &web_sys::HtmlElement, shown: f64) {
    let offset = lerp(100.0, 0.0, shown);
    dom::set_style(toast, "transform", &format!("translateX({offset:.2}%)"));
    dom::set_style(toast, "opacity", &format!("{shown:.3}"));
}

impl Notifier for NotificationService {
    fn notify(&mut self, level: NotificationLevel, message: &str) {
        let notification = Notification::new(level, message);
        if let Err(e) = self.show(&notification) {
            log::error!("could not show {level} toast '{message}': {e}");
        }
    }
}
