use std::time::{Duration, Instant};

/// How long a notice stays on screen.
const DISPLAY_FOR: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
    shown_at: Instant,
}

/// Holds at most one notice. A new `notify` call replaces the current
/// notice and restarts the display window from the moment of the call, so
/// pending expirations of an already-replaced notice never apply.
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn notify(&mut self, text: impl Into<String>, severity: Severity) {
        let text = text.into();
        match severity {
            Severity::Error => log::error!("{text}"),
            _ => log::debug!("{text}"),
        }
        self.set(text, severity, Instant::now());
    }

    fn set(&mut self, text: String, severity: Severity, now: Instant) {
        self.current = Some(Notice {
            text,
            severity,
            shown_at: now,
        });
    }

    /// The currently visible notice, if its display window has not elapsed.
    pub fn visible(&self) -> Option<&Notice> {
        self.visible_at(Instant::now())
    }

    fn visible_at(&self, now: Instant) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| now.duration_since(notice.shown_at) < DISPLAY_FOR)
    }
}
