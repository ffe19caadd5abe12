//! The session controller — the only mutator of [`SessionState`].
//!
//! The controller owns the capture backend and tip picker behind trait
//! objects, so the whole recording/countdown/feedback cycle is testable with
//! fakes. The countdown is driven externally: the UI calls [`tick`] once per
//! elapsed whole second while recording, and a tick that lands on zero goes
//! through the same stop path as the stop button, so the capture stream is
//! released and feedback generated exactly once no matter how recording
//! ends. Dropping the controller mid-recording releases the stream too
//! (RAII on the capture handle).
//!
//! [`tick`]: SessionController::tick

use crate::audio::{ActiveCapture, Recorder};
use crate::feedback::{self, TipPicker};
use crate::questions::QuestionBank;
use crate::session::state::SessionState;

// ---------------------------------------------------------------------------
// TickOutcome
// ---------------------------------------------------------------------------

/// What a countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not recording; nothing happened.
    Idle,
    /// One second elapsed; still recording.
    Counted,
    /// The countdown hit zero and recording was stopped automatically.
    Expired,
}

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Owns the session state and mediates every transition.
pub struct SessionController {
    state: SessionState,
    questions: QuestionBank,
    recorder: Box<dyn Recorder>,
    capture: Option<Box<dyn ActiveCapture>>,
    picker: Box<dyn TipPicker>,
    answer_secs: u32,
    keep_recordings: bool,
}

impl SessionController {
    pub fn new(
        questions: QuestionBank,
        recorder: Box<dyn Recorder>,
        picker: Box<dyn TipPicker>,
        answer_secs: u32,
        keep_recordings: bool,
    ) -> Self {
        Self {
            state: SessionState::new(answer_secs),
            questions,
            recorder,
            capture: None,
            picker,
            answer_secs,
            keep_recordings,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The question currently on screen.
    pub fn current_question(&self) -> &str {
        self.questions.get(self.state.question_index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Live input meter bars; silent when not recording.
    pub fn level_bars(&self, num_bars: usize) -> Vec<f32> {
        match &self.capture {
            Some(capture) => capture.level_bars(num_bars),
            None => vec![0.0; num_bars],
        }
    }

    // ── Operations ───────────────────────────────────────────────────────

    /// Start a capture session. No-op while one is already running.
    ///
    /// A refused capture (permission denied, no device) lands in
    /// `state.capture_error` for the UI to show; the session stays in the
    /// prompt phase and there is no automatic retry.
    pub fn start_recording(&mut self) {
        if self.state.is_recording {
            return;
        }

        self.state.feedback = None;
        self.state.capture_error = None;
        self.discard_artifact();

        match self.recorder.request_capture() {
            Ok(capture) => {
                self.capture = Some(capture);
                self.state.is_recording = true;
                self.state.time_remaining = self.answer_secs;
                log::info!(
                    "recording started for question {} ({} s limit)",
                    self.state.question_index,
                    self.answer_secs
                );
            }
            Err(e) => {
                log::warn!("capture request failed: {e}");
                self.state.capture_error = Some(e.to_string());
            }
        }
    }

    /// One whole-second countdown step. Reaching zero stops the recording
    /// through the normal stop path.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_recording {
            return TickOutcome::Idle;
        }

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining == 0 {
            log::info!("answer time expired; stopping recording");
            self.stop_recording();
            TickOutcome::Expired
        } else {
            TickOutcome::Counted
        }
    }

    /// Stop recording, finalize the artifact, and generate feedback from
    /// the current transcript. Idempotent: a second call without an
    /// intervening [`start_recording`](Self::start_recording) is a no-op.
    pub fn stop_recording(&mut self) {
        if !self.state.is_recording {
            return;
        }
        self.state.is_recording = false;

        if let Some(capture) = self.capture.take() {
            match capture.stop() {
                Ok(artifact) => self.state.artifact = Some(artifact),
                Err(e) => {
                    log::warn!("failed to finalize recording: {e}");
                    self.state.capture_error = Some(e.to_string());
                }
            }
        }

        let fb = feedback::generate(&self.state.transcript, self.picker.as_mut());
        log::info!(
            "feedback generated: {} words, {} sentences",
            fb.word_count,
            fb.sentence_count
        );
        self.state.feedback = Some(fb);
    }

    /// Move to the next question (wrapping after the last one), clearing
    /// all transient attempt state. A recording still in flight is released
    /// without generating feedback.
    pub fn advance_question(&mut self) {
        // Dropping the handle tears the stream down.
        self.capture = None;
        self.state.is_recording = false;

        self.discard_artifact();
        self.state.clear_attempt(self.answer_secs);
        self.state.question_index = self.questions.next_index(self.state.question_index);
        log::info!("advanced to question {}", self.state.question_index);
    }

    /// Update the typed transcript. Permitted in every phase.
    pub fn set_transcript(&mut self, text: String) {
        self.state.transcript = text;
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// Remove the artifact from the state and, unless recordings are kept,
    /// from disk (best-effort).
    fn discard_artifact(&mut self) {
        if let Some(artifact) = self.state.artifact.take() {
            if !self.keep_recordings {
                if let Err(e) = std::fs::remove_file(&artifact.path) {
                    log::debug!("could not delete {}: {e}", artifact.path.display());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::audio::{CaptureError, RecordingArtifact};
    use crate::session::state::SessionPhase;

    // ---- fakes ---

    /// Counts stream releases (capture drops) so tests can assert exactly-once
    /// teardown on every exit path.
    struct FakeCapture {
        releases: Arc<AtomicUsize>,
    }

    impl Drop for FakeCapture {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl ActiveCapture for FakeCapture {
        fn stop(self: Box<Self>) -> Result<RecordingArtifact, CaptureError> {
            Ok(RecordingArtifact {
                path: PathBuf::from("/tmp/fake-answer.wav"),
                duration_secs: 1.5,
                sample_rate: 16_000,
            })
        }

        fn level_bars(&self, num_bars: usize) -> Vec<f32> {
            vec![0.25; num_bars]
        }
    }

    struct FakeRecorder {
        deny: bool,
        releases: Arc<AtomicUsize>,
    }

    impl Recorder for FakeRecorder {
        fn request_capture(&mut self) -> Result<Box<dyn ActiveCapture>, CaptureError> {
            if self.deny {
                Err(CaptureError::PermissionDenied)
            } else {
                Ok(Box::new(FakeCapture {
                    releases: Arc::clone(&self.releases),
                }))
            }
        }
    }

    struct FirstTipPicker;

    impl TipPicker for FirstTipPicker {
        fn pick(&mut self, _len: usize) -> usize {
            0
        }
    }

    fn controller(deny: bool) -> (SessionController, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        let ctrl = SessionController::new(
            QuestionBank::builtin(),
            Box::new(FakeRecorder {
                deny,
                releases: Arc::clone(&releases),
            }),
            Box::new(FirstTipPicker),
            60,
            true,
        );
        (ctrl, releases)
    }

    // ---- start_recording ---

    #[test]
    fn start_enters_recording_with_full_countdown() {
        let (mut ctrl, _) = controller(false);
        ctrl.start_recording();

        let state = ctrl.state();
        assert!(state.is_recording);
        assert_eq!(state.time_remaining, 60);
        assert!(state.feedback.is_none());
        assert_eq!(state.phase(), SessionPhase::Recording);
    }

    #[test]
    fn start_while_recording_is_a_no_op() {
        let (mut ctrl, releases) = controller(false);
        ctrl.start_recording();
        ctrl.tick();
        ctrl.start_recording(); // must not reset the countdown

        assert_eq!(ctrl.state().time_remaining, 59);
        assert_eq!(releases.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn denied_capture_surfaces_error_and_stays_in_prompt() {
        let (mut ctrl, _) = controller(true);
        ctrl.start_recording();

        let state = ctrl.state();
        assert!(!state.is_recording);
        assert_eq!(state.phase(), SessionPhase::Prompt);
        let err = state.capture_error.as_deref().expect("error surfaced");
        assert!(err.contains("denied"));
    }

    #[test]
    fn capture_error_clears_on_advance() {
        let releases = Arc::new(AtomicUsize::new(0));
        let mut ctrl = SessionController::new(
            QuestionBank::builtin(),
            Box::new(FakeRecorder {
                deny: true,
                releases: Arc::clone(&releases),
            }),
            Box::new(FirstTipPicker),
            60,
            true,
        );
        ctrl.start_recording();
        assert!(ctrl.state().capture_error.is_some());

        ctrl.advance_question();
        assert!(ctrl.state().capture_error.is_none());
    }

    // ---- countdown ---

    #[test]
    fn tick_counts_down_while_recording() {
        let (mut ctrl, _) = controller(false);
        ctrl.start_recording();

        assert_eq!(ctrl.tick(), TickOutcome::Counted);
        assert_eq!(ctrl.tick(), TickOutcome::Counted);
        assert_eq!(ctrl.state().time_remaining, 58);
    }

    #[test]
    fn tick_when_idle_does_nothing() {
        let (mut ctrl, _) = controller(false);
        assert_eq!(ctrl.tick(), TickOutcome::Idle);
        assert_eq!(ctrl.state().time_remaining, 60);
    }

    #[test]
    fn countdown_expiry_stops_and_generates_feedback() {
        let releases = Arc::new(AtomicUsize::new(0));
        let mut ctrl = SessionController::new(
            QuestionBank::builtin(),
            Box::new(FakeRecorder {
                deny: false,
                releases: Arc::clone(&releases),
            }),
            Box::new(FirstTipPicker),
            3,
            true,
        );
        ctrl.start_recording();
        ctrl.set_transcript("Short answer.".into());

        assert_eq!(ctrl.tick(), TickOutcome::Counted);
        assert_eq!(ctrl.tick(), TickOutcome::Counted);
        assert_eq!(ctrl.tick(), TickOutcome::Expired);

        let state = ctrl.state();
        assert!(!state.is_recording);
        assert_eq!(state.time_remaining, 0);
        assert!(state.feedback.is_some());
        assert!(state.artifact.is_some());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    // ---- stop_recording ---

    #[test]
    fn stop_generates_feedback_from_the_transcript() {
        let (mut ctrl, _) = controller(false);
        ctrl.start_recording();
        ctrl.set_transcript("Hi! Hi!".into());
        ctrl.stop_recording();

        let fb = ctrl.state().feedback.as_ref().expect("feedback");
        assert_eq!(fb.word_count, 2);
        assert_eq!(fb.sentence_count, 2);
        assert_eq!(ctrl.state().phase(), SessionPhase::Feedback);
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut ctrl, releases) = controller(false);
        ctrl.start_recording();
        ctrl.set_transcript("An answer".into());
        ctrl.stop_recording();

        let first = ctrl.state().feedback.clone();
        let artifact = ctrl.state().artifact.clone();

        ctrl.stop_recording();

        assert_eq!(ctrl.state().feedback, first);
        assert_eq!(ctrl.state().artifact, artifact);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_when_never_started_is_a_no_op() {
        let (mut ctrl, _) = controller(false);
        ctrl.stop_recording();
        assert!(ctrl.state().feedback.is_none());
    }

    // ---- advance_question ---

    #[test]
    fn advance_increments_then_wraps() {
        let (mut ctrl, _) = controller(false);
        for expected in [1, 2, 3, 4, 0, 1] {
            ctrl.advance_question();
            assert_eq!(ctrl.state().question_index, expected);
        }
    }

    #[test]
    fn advance_clears_all_transient_state() {
        let (mut ctrl, _) = controller(false);
        ctrl.start_recording();
        ctrl.set_transcript("words words words".into());
        ctrl.stop_recording();
        ctrl.advance_question();

        let state = ctrl.state();
        assert_eq!(state.question_index, 1);
        assert_eq!(state.time_remaining, 60);
        assert!(state.transcript.is_empty());
        assert!(state.artifact.is_none());
        assert!(state.feedback.is_none());
    }

    #[test]
    fn advance_mid_recording_releases_the_capture_without_feedback() {
        let (mut ctrl, releases) = controller(false);
        ctrl.start_recording();
        ctrl.advance_question();

        assert!(!ctrl.state().is_recording);
        assert!(ctrl.state().feedback.is_none());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    // ---- teardown ---

    #[test]
    fn dropping_the_controller_mid_recording_releases_the_capture() {
        let (mut ctrl, releases) = controller(false);
        ctrl.start_recording();
        drop(ctrl);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    // ---- level meter ---

    #[test]
    fn level_bars_are_silent_when_not_recording() {
        let (ctrl, _) = controller(false);
        assert_eq!(ctrl.level_bars(4), vec![0.0; 4]);
    }

    #[test]
    fn level_bars_come_from_the_capture_while_recording() {
        let (mut ctrl, _) = controller(false);
        ctrl.start_recording();
        assert_eq!(ctrl.level_bars(4), vec![0.25; 4]);
    }

    // ---- end-to-end scenario ---

    #[test]
    fn full_attempt_cycle_matches_the_expected_flow() {
        let (mut ctrl, _) = controller(false);

        assert_eq!(ctrl.state().question_index, 0);
        ctrl.start_recording();
        ctrl.set_transcript(
            "I think technology helps businesses a lot by making things \
             faster and more efficient for everyone involved"
                .into(),
        );
        ctrl.stop_recording();

        let fb = ctrl.state().feedback.as_ref().expect("feedback");
        assert_eq!(fb.word_count, 17);
        assert_eq!(fb.sentence_count, 1);
        assert_eq!(
            fb.content_tip,
            "Try to provide more details and specific examples."
        );

        ctrl.advance_question();
        let state = ctrl.state();
        assert_eq!(state.question_index, 1);
        assert!(state.feedback.is_none());
        assert_eq!(state.time_remaining, 60);
    }
}
