//! Native popup window drawn with eframe/egui
//!
//! The window lifecycle is `Created -> Displayed -> Destroyed`. The dismiss
//! timer starts as soon as the backend is asked to show the popup, and
//! either timer expiry or a user close ends it. `eframe::run_native` blocks
//! until the window is gone.

use crate::config::Rgb;
use crate::errors::{NotifierError, Result};
use crate::notify::{Popup, PopupBackend};
use eframe::egui;
use std::time::{Duration, Instant};

/// Counts down the time a popup stays on screen
#[derive(Debug, Clone, Copy)]
pub struct DismissTimer {
    started: Instant,
    duration: Duration,
}

impl DismissTimer {
    pub fn start(duration: Duration) -> Self {
        Self::starting_at(Instant::now(), duration)
    }

    pub fn starting_at(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started))
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Created,
    Displayed,
    Destroyed,
}

/// What the window should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Keep painting, wake again after this long
    Paint { repaint_after: Duration },
    Close,
}

/// Toolkit-independent popup state
///
/// The dismiss timer runs from construction, so window and event-loop
/// startup count against the display duration.
#[derive(Debug)]
pub struct PopupLifecycle {
    state: PopupState,
    timer: DismissTimer,
}

impl PopupLifecycle {
    pub fn new(duration: Duration) -> Self {
        Self::starting_at(Instant::now(), duration)
    }

    pub fn starting_at(started: Instant, duration: Duration) -> Self {
        Self {
            state: PopupState::Created,
            timer: DismissTimer::starting_at(started, duration),
        }
    }

    pub fn state(&self) -> PopupState {
        self.state
    }

    /// Advance the lifecycle for a frame painted at `now`
    pub fn on_frame(&mut self, now: Instant, close_requested: bool) -> FrameAction {
        if self.state == PopupState::Destroyed {
            return FrameAction::Close;
        }
        if close_requested {
            tracing::debug!("Popup closed by user");
            self.state = PopupState::Destroyed;
            return FrameAction::Close;
        }

        if self.timer.expired_at(now) {
            tracing::debug!("Popup dismiss timer expired");
            self.state = PopupState::Destroyed;
            return FrameAction::Close;
        }

        self.state = PopupState::Displayed;
        FrameAction::Paint {
            repaint_after: self.timer.remaining_at(now),
        }
    }
}

fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

struct PopupApp {
    message: String,
    background: egui::Color32,
    foreground: egui::Color32,
    font_size: f32,
    margin: egui::Margin,
    lifecycle: PopupLifecycle,
}

impl PopupApp {
    fn new(popup: &Popup, lifecycle: PopupLifecycle) -> Self {
        Self {
            message: popup.message.clone(),
            background: color32(popup.background),
            foreground: color32(popup.foreground),
            font_size: popup.style.font_size,
            margin: egui::Margin::symmetric(popup.style.side_margin(), popup.style.padding),
            lifecycle,
        }
    }
}

impl eframe::App for PopupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        match self.lifecycle.on_frame(Instant::now(), close_requested) {
            FrameAction::Close => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                return;
            }
            FrameAction::Paint { repaint_after } => ctx.request_repaint_after(repaint_after),
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.background)
                    .inner_margin(self.margin),
            )
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&self.message)
                                .size(self.font_size)
                                .color(self.foreground),
                        )
                        .wrap(true),
                    );
                });
            });
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::from(self.background).to_array()
    }
}

/// Draws popups as native always-on-top windows
#[derive(Debug, Clone, Copy, Default)]
pub struct EguiBackend;

impl PopupBackend for EguiBackend {
    fn show(&self, popup: &Popup) -> Result<()> {
        let lifecycle = PopupLifecycle::new(popup.duration);
        let style = &popup.style;
        let level = if style.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(popup.title.clone())
                .with_inner_size([style.width, style.height])
                .with_resizable(style.resizable)
                .with_window_level(level),
            centered: true,
            ..Default::default()
        };

        let app = PopupApp::new(popup, lifecycle);
        eframe::run_native(&popup.title, options, Box::new(move |_cc| Box::new(app)))
            .map_err(|err| NotifierError::Display(err.to_string()))
    }
}
