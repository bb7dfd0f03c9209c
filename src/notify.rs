//! The notifier: log one record, then show a self-dismissing popup
//!
//! A call is fully synchronous. It returns once the popup window is gone,
//! whether the dismiss timer fired or the user closed it first.

use crate::config::{NotifierConfig, PopupStyle, Rgb, DEFAULT_DURATION_MS};
use crate::errors::{NotifierError, Result};
use crate::logging::LogSink;
use crate::popup::EguiBackend;
use std::time::Duration;

/// One notification to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub message: String,
    pub duration: Duration,
}

impl NotificationRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The line written to the log sink for this notification
    pub fn log_record(&self) -> String {
        format!("Notification: {} - {}", self.title, self.message)
    }
}

/// Everything a backend needs to draw one popup
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub message: String,
    pub duration: Duration,
    pub style: PopupStyle,
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Windowing seam: shows a popup and blocks until it is destroyed
pub trait PopupBackend {
    fn show(&self, popup: &Popup) -> Result<()>;
}

impl<B: PopupBackend + ?Sized> PopupBackend for &B {
    fn show(&self, popup: &Popup) -> Result<()> {
        (**self).show(popup)
    }
}

/// Logs and displays notifications with a fixed style
pub struct Notifier<S, B> {
    sink: S,
    backend: B,
    style: PopupStyle,
    default_duration: Duration,
}

impl<S: LogSink> Notifier<S, EguiBackend> {
    /// Notifier drawing native windows with the given configuration
    pub fn from_config(sink: S, config: &NotifierConfig) -> Self {
        Self::new(sink, EguiBackend)
            .with_style(config.style.clone())
            .with_default_duration(config.duration())
    }
}

impl<S: LogSink, B: PopupBackend> Notifier<S, B> {
    pub fn new(sink: S, backend: B) -> Self {
        Self {
            sink,
            backend,
            style: PopupStyle::default(),
            default_duration: Duration::from_millis(DEFAULT_DURATION_MS),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: PopupStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Show `message` under `title` for the default duration
    pub fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.send(NotificationRequest::new(title, message).with_duration(self.default_duration))
    }

    /// Log the request, then block while its popup is on screen
    ///
    /// The log record is written before any window is built, so the event
    /// is recorded even when the display is unavailable.
    pub fn send(&self, request: NotificationRequest) -> Result<()> {
        if request.duration.is_zero() {
            return Err(NotifierError::InvalidDuration);
        }

        self.sink.info(&request.log_record())?;

        let (background, foreground) = self.style.colors()?;
        let popup = Popup {
            title: request.title,
            message: request.message,
            duration: request.duration,
            style: self.style.clone(),
            background,
            foreground,
        };

        tracing::debug!(
            title = %popup.title,
            duration = ?popup.duration,
            "Showing popup"
        );
        self.backend.show(&popup)?;
        tracing::debug!(title = %popup.title, "Popup dismissed");
        Ok(())
    }
}

/// One-shot notification with the default style and a native window
///
/// `duration` defaults to 800 ms.
pub fn notify(
    title: &str,
    message: &str,
    logger: &impl LogSink,
    duration: Option<Duration>,
) -> Result<()> {
    let request = NotificationRequest::new(title, message);
    let request = match duration {
        Some(duration) => request.with_duration(duration),
        None => request,
    };
    Notifier::new(logger, EguiBackend).send(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::popup::{FrameAction, PopupLifecycle};
    use std::cell::{Cell, RefCell};
    use std::time::Instant;

    /// Backend that records what it was asked to show instead of drawing
    #[derive(Default)]
    struct RecordingBackend {
        shown: RefCell<Vec<Popup>>,
        records_at_show: RefCell<Vec<usize>>,
        sink: Option<MemorySink>,
        open: Cell<bool>,
        overlapped: Cell<bool>,
        block: bool,
        fail: bool,
    }

    impl RecordingBackend {
        fn watching(sink: &MemorySink) -> Self {
            Self {
                sink: Some(sink.clone()),
                ..Self::default()
            }
        }
    }

    impl PopupBackend for RecordingBackend {
        fn show(&self, popup: &Popup) -> Result<()> {
            if self.open.replace(true) {
                self.overlapped.set(true);
            }
            if let Some(sink) = &self.sink {
                self.records_at_show.borrow_mut().push(sink.records().len());
            }
            if self.fail {
                self.open.set(false);
                return Err(NotifierError::Display("no display surface".to_string()));
            }
            if self.block {
                // Drive the real lifecycle the way the window's frame loop does
                let mut lifecycle = PopupLifecycle::new(popup.duration);
                while let FrameAction::Paint { repaint_after } =
                    lifecycle.on_frame(Instant::now(), false)
                {
                    std::thread::sleep(repaint_after);
                }
            }
            self.shown.borrow_mut().push(popup.clone());
            self.open.set(false);
            Ok(())
        }
    }

    #[test]
    fn test_logs_exactly_one_record_before_showing() {
        let sink = MemorySink::new();
        let backend = RecordingBackend::watching(&sink);
        let notifier = Notifier::new(sink.clone(), &backend);

        notifier.notify("Build", "All tests passed").unwrap();

        assert_eq!(sink.records(), vec!["Notification: Build - All tests passed"]);
        assert_eq!(*backend.records_at_show.borrow(), vec![1]);
    }

    #[test]
    fn test_popup_carries_title_message_and_style() {
        let backend = RecordingBackend::default();
        let notifier = Notifier::new(MemorySink::new(), &backend);

        notifier.notify("Backup", "Done in 4s").unwrap();

        let shown = backend.shown.borrow();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Backup");
        assert_eq!(shown[0].message, "Done in 4s");
        assert_eq!(shown[0].duration, Duration::from_millis(800));
        assert_eq!(shown[0].style, PopupStyle::default());
        assert_eq!(shown[0].background, Rgb(0, 0, 0));
        assert_eq!(shown[0].foreground, Rgb(255, 255, 255));
    }

    #[test]
    fn test_empty_strings_are_allowed() {
        let sink = MemorySink::new();
        let backend = RecordingBackend::default();
        Notifier::new(sink.clone(), &backend).notify("", "").unwrap();
        assert_eq!(sink.records(), vec!["Notification:  - "]);
        assert_eq!(backend.shown.borrow().len(), 1);
    }

    #[test]
    fn test_zero_duration_rejected_without_side_effects() {
        let sink = MemorySink::new();
        let backend = RecordingBackend::default();
        let notifier = Notifier::new(sink.clone(), &backend);

        let request = NotificationRequest::new("t", "m").with_duration(Duration::ZERO);
        assert!(matches!(
            notifier.send(request),
            Err(NotifierError::InvalidDuration)
        ));
        assert!(sink.records().is_empty());
        assert!(backend.shown.borrow().is_empty());
    }

    #[test]
    fn test_sink_failure_aborts_before_window() {
        let backend = RecordingBackend::default();
        let notifier = Notifier::new(MemorySink::failing(), &backend);

        let err = notifier.notify("t", "m").unwrap_err();
        assert!(matches!(err, NotifierError::Log(_)));
        assert!(backend.records_at_show.borrow().is_empty());
        assert!(backend.shown.borrow().is_empty());
    }

    #[test]
    fn test_display_failure_still_logged() {
        let sink = MemorySink::new();
        let backend = RecordingBackend {
            fail: true,
            ..RecordingBackend::watching(&sink)
        };
        let notifier = Notifier::new(sink.clone(), &backend);

        let err = notifier.notify("Deploy", "Finished").unwrap_err();
        assert!(matches!(err, NotifierError::Display(_)));
        assert_eq!(sink.records(), vec!["Notification: Deploy - Finished"]);
    }

    #[test]
    fn test_invalid_style_color_is_reported() {
        let backend = RecordingBackend::default();
        let style = PopupStyle {
            background: "mauve-ish".to_string(),
            ..PopupStyle::default()
        };
        let notifier = Notifier::new(MemorySink::new(), &backend).with_style(style);
        assert!(matches!(
            notifier.notify("t", "m"),
            Err(NotifierError::InvalidColor(_))
        ));
        assert!(backend.shown.borrow().is_empty());
    }

    #[test]
    fn test_sequential_calls_never_overlap() {
        let sink = MemorySink::new();
        let backend = RecordingBackend::watching(&sink);
        let notifier = Notifier::new(sink.clone(), &backend);

        notifier.notify("first", "one").unwrap();
        notifier.notify("second", "two").unwrap();

        assert!(!backend.overlapped.get());
        assert_eq!(*backend.records_at_show.borrow(), vec![1, 2]);
        let titles: Vec<_> = backend
            .shown
            .borrow()
            .iter()
            .map(|p| p.title.clone())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_call_blocks_for_the_display_duration() {
        let backend = RecordingBackend {
            block: true,
            ..RecordingBackend::default()
        };
        let notifier = Notifier::new(MemorySink::new(), &backend)
            .with_default_duration(Duration::from_millis(60));

        let start = Instant::now();
        notifier.notify("t", "m").unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(60), "returned after {elapsed:?}");
        assert!(elapsed < Duration::from_millis(500), "lingered for {elapsed:?}");
        assert_eq!(backend.shown.borrow().len(), 1);
    }

    #[test]
    fn test_explicit_duration_overrides_default() {
        let backend = RecordingBackend::default();
        let notifier = Notifier::new(MemorySink::new(), &backend)
            .with_default_duration(Duration::from_secs(3));
        assert_eq!(notifier.default_duration(), Duration::from_secs(3));

        notifier
            .send(NotificationRequest::new("t", "m").with_duration(Duration::from_millis(250)))
            .unwrap();
        assert_eq!(backend.shown.borrow()[0].duration, Duration::from_millis(250));
    }

    #[test]
    fn test_log_record_format() {
        let request = NotificationRequest::new("Disk", "90% full");
        assert_eq!(request.log_record(), "Notification: Disk - 90% full");
        assert_eq!(request.duration, Duration::from_millis(800));
    }
}
