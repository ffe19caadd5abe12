//! Application entry point — Interview Practice.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Load the question bank (`questions.json` override or built-ins).
//! 4. Build the [`SessionController`] over the microphone recorder — the
//!    device is probed per recording attempt, so a missing or denied
//!    microphone surfaces in the UI instead of aborting startup.
//! 5. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use interview_practice::{
    app::PracticeApp,
    audio::MicRecorder,
    config::{AppConfig, AppPaths},
    feedback::RandomTipPicker,
    questions::QuestionBank,
    session::SessionController,
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([460.0, 640.0])
        .with_min_inner_size([380.0, 480.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Interview Practice starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    let paths = AppPaths::new();

    // 3. Question bank
    let questions = QuestionBank::load_or_builtin(&paths.questions_file);

    // 4. Session controller over the real microphone
    let recorder = MicRecorder::new(paths.recordings_dir.clone());
    let controller = SessionController::new(
        questions,
        Box::new(recorder),
        Box::new(RandomTipPicker),
        config.recording.answer_secs,
        config.recording.keep_recordings,
    );

    // 5. Run the UI (blocks until the window is closed)
    let app = PracticeApp::new(controller, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "Interview Practice",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
