//! Interview Practice window — egui/eframe application.
//!
//! # Architecture
//!
//! [`PracticeApp`] is the top-level [`eframe::App`]. It owns the
//! [`SessionController`] (the only mutator of session state) and a
//! [`Player`] for artifact playback. Each frame it:
//!
//! 1. feeds elapsed whole seconds into the controller's countdown,
//! 2. renders the question, countdown, transcript editor and controls from
//!    the current [`SessionPhase`],
//! 3. schedules a repaint while the countdown or playback is animating.
//!
//! The transcript editor is enabled in every phase — typing is allowed
//! before, during and after recording.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::audio::Player;
use crate::config::AppConfig;
use crate::session::{SessionController, SessionPhase, TickOutcome};

/// Number of bars in the live input meter.
const METER_BARS: usize = 24;

// ---------------------------------------------------------------------------
// PracticeApp
// ---------------------------------------------------------------------------

/// eframe application — the interview practice window.
pub struct PracticeApp {
    controller: SessionController,
    player: Player,

    /// When the next whole-second countdown tick is due, while recording.
    next_tick: Option<Instant>,
    /// Window position observed this frame, persisted on exit.
    window_pos: Option<(f32, f32)>,
    /// Where to save settings on exit.
    config: AppConfig,
}

impl PracticeApp {
    pub fn new(controller: SessionController, config: AppConfig) -> Self {
        Self {
            controller,
            player: Player::new(),
            next_tick: None,
            window_pos: config.ui.window_position,
            config,
        }
    }

    // ── Countdown driving ────────────────────────────────────────────────

    /// Run the controller's one-second ticks for however much wall time has
    /// passed since the last frame.
    fn drive_countdown(&mut self) {
        if !self.controller.state().is_recording {
            self.next_tick = None;
            return;
        }

        let now = Instant::now();
        while let Some(due) = self.next_tick {
            if now < due {
                break;
            }
            self.next_tick = Some(due + Duration::from_secs(1));
            if self.controller.tick() == TickOutcome::Expired {
                self.next_tick = None;
                break;
            }
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn on_record_pressed(&mut self) {
        self.player.stop();
        self.controller.start_recording();
        if self.controller.state().is_recording {
            self.next_tick = Some(Instant::now() + Duration::from_secs(1));
        }
    }

    fn on_stop_pressed(&mut self) {
        self.controller.stop_recording();
        self.next_tick = None;
    }

    fn on_next_pressed(&mut self) {
        self.player.stop();
        self.controller.advance_question();
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Interview Practice");
            ui.label(
                egui::RichText::new(format!(
                    "Question {} of {}",
                    self.controller.state().question_index + 1,
                    self.controller.question_count()
                ))
                .size(12.0)
                .color(egui::Color32::from_rgb(140, 140, 140)),
            );
        });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(self.controller.current_question())
                    .size(16.0)
                    .strong(),
            );
        });
    }

    fn draw_countdown(&self, ui: &mut egui::Ui) {
        let state = self.controller.state();
        let limit = self.config.recording.answer_secs.max(1);

        ui.vertical_centered(|ui| {
            let color = if state.is_recording && state.time_remaining <= 10 {
                egui::Color32::from_rgb(255, 80, 80)
            } else {
                egui::Color32::from_rgb(68, 136, 255)
            };
            ui.label(
                egui::RichText::new(format!(
                    "Time remaining: {} seconds",
                    state.time_remaining
                ))
                .size(20.0)
                .strong()
                .color(color),
            );
        });

        ui.add(
            egui::ProgressBar::new(state.time_remaining as f32 / limit as f32)
                .desired_height(6.0),
        );
    }

    fn draw_capture_error(&self, ui: &mut egui::Ui) {
        if let Some(ref message) = self.controller.state().capture_error {
            ui.add_space(4.0);
            egui::Frame::new()
                .fill(egui::Color32::from_rgb(60, 30, 20))
                .corner_radius(egui::CornerRadius::same(4))
                .inner_margin(egui::Margin::same(6))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(format!("Recording unavailable: {message}"))
                            .color(egui::Color32::from_rgb(255, 136, 68))
                            .size(12.0),
                    );
                });
        }
    }

    fn draw_transcript_editor(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        let mut text = self.controller.state().transcript.clone();
        let response = ui.add(
            egui::TextEdit::multiline(&mut text)
                .hint_text("Type your response here...")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.controller.set_transcript(text);
        }
    }

    fn draw_record_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.vertical_centered(|ui| match self.controller.state().phase() {
            SessionPhase::Recording => {
                if ui
                    .button(
                        egui::RichText::new("■  Stop Recording")
                            .size(14.0)
                            .color(egui::Color32::from_rgb(255, 80, 80)),
                    )
                    .clicked()
                {
                    self.on_stop_pressed();
                }
            }
            _ => {
                if ui
                    .button(
                        egui::RichText::new("●  Start Recording")
                            .size(14.0)
                            .color(egui::Color32::from_rgb(80, 200, 120)),
                    )
                    .clicked()
                {
                    self.on_record_pressed();
                }
            }
        });
    }

    fn draw_playback_row(&mut self, ui: &mut egui::Ui) {
        let Some(artifact) = self.controller.state().artifact.clone() else {
            return;
        };

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "Recording: {} ({:.1} s)",
                    artifact.file_name(),
                    artifact.duration_secs
                ))
                .size(11.0)
                .color(egui::Color32::from_rgb(140, 140, 140)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.player.is_playing() {
                    if ui.button("Stop").clicked() {
                        self.player.stop();
                    }
                } else if ui.button("Play").clicked() {
                    if let Err(e) = self.player.play(&artifact.path) {
                        log::warn!("playback failed: {e}");
                    }
                }
            });
        });
    }

    fn draw_feedback_panel(&mut self, ui: &mut egui::Ui) {
        let Some(fb) = self.controller.state().feedback.clone() else {
            return;
        };

        ui.add_space(8.0);
        egui::Frame::new()
            .fill(egui::Color32::from_rgb(24, 36, 48))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("Feedback").size(14.0).strong());
                ui.add_space(4.0);
                ui.label(format!("Content: {}", fb.content_tip));
                ui.label(format!("Language: {}", fb.language_tip));
                ui.label(format!("Word count: {}", fb.word_count));
                ui.label(format!("Sentence count: {}", fb.sentence_count));

                ui.add_space(8.0);
                if ui.button("Next Question").clicked() {
                    self.on_next_pressed();
                }
            });
    }

    /// Bar-chart input meter shown while recording.
    fn draw_level_meter(&self, ui: &mut egui::Ui) {
        let bars = self.controller.level_bars(METER_BARS);

        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 28.0),
            egui::Sense::hover(),
        );

        let painter = ui.painter();
        let bar_width = rect.width() / bars.len().max(1) as f32;

        for (i, &amplitude) in bars.iter().enumerate() {
            let x = rect.left() + i as f32 * bar_width;
            let bar_height = (amplitude * rect.height()).max(2.0);

            painter.rect_filled(
                egui::Rect::from_center_size(
                    egui::pos2(x + bar_width / 2.0, rect.center().y),
                    egui::vec2((bar_width * 0.65).max(1.0), bar_height),
                ),
                1.0,
                egui::Color32::from_rgb(255, 80, 80),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for PracticeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drive_countdown();

        // Track the window position for persistence on exit.
        if let Some(rect) = ctx.input(|i| i.viewport().outer_rect) {
            self.window_pos = Some((rect.min.x, rect.min.y));
        }

        // Keep the countdown, meter and playback button fresh.
        if self.controller.state().is_recording {
            ctx.request_repaint_after(Duration::from_millis(33));
        } else if self.player.is_playing() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.add_space(8.0);
            self.draw_countdown(ui);
            self.draw_capture_error(ui);
            self.draw_transcript_editor(ui);

            if self.controller.state().phase() == SessionPhase::Recording {
                ui.add_space(4.0);
                self.draw_level_meter(ui);
            }

            self.draw_record_controls(ui);
            self.draw_playback_row(ui);
            self.draw_feedback_panel(ui);
        });
    }

    /// Persist the window position on exit (best-effort).
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.player.stop();
        self.config.ui.window_position = self.window_pos;
        if let Err(e) = self.config.save() {
            log::warn!("failed to save settings on exit: {e}");
        }
        log::info!("interview practice closing");
    }
}
