//! Session state — everything the UI needs to render one answer attempt.

use crate::audio::RecordingArtifact;
use crate::feedback::Feedback;

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Coarse phase of the session, derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Showing the question, waiting for the user to start recording.
    Prompt,
    /// Microphone is live; the countdown is running.
    Recording,
    /// Recording has stopped and feedback is on screen.
    Feedback,
}

impl SessionPhase {
    /// A short human-readable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Prompt => "Ready",
            SessionPhase::Recording => "Recording",
            SessionPhase::Feedback => "Feedback",
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The one session state per running app instance. Owned and mutated only
/// by [`crate::session::SessionController`].
///
/// Invariants (upheld by the controller, checked by its tests):
/// * `is_recording` ⟹ `feedback.is_none()`
/// * `feedback.is_some()` ⟹ `!is_recording`
#[derive(Debug)]
pub struct SessionState {
    /// Index into the question bank.
    pub question_index: usize,
    /// Whether a capture session is live right now.
    pub is_recording: bool,
    /// Seconds left on the answer countdown.
    pub time_remaining: u32,
    /// The transcript the user has typed so far.
    pub transcript: String,
    /// The finalized recording, once one exists for this question.
    pub artifact: Option<RecordingArtifact>,
    /// Feedback generated when recording stopped; cleared on advance.
    pub feedback: Option<Feedback>,
    /// User-visible reason the last capture request failed, if it did.
    pub capture_error: Option<String>,
}

impl SessionState {
    /// Fresh state at question 0 with a full countdown.
    pub fn new(answer_secs: u32) -> Self {
        Self {
            question_index: 0,
            is_recording: false,
            time_remaining: answer_secs,
            transcript: String::new(),
            artifact: None,
            feedback: None,
            capture_error: None,
        }
    }

    /// The coarse phase this state is in.
    pub fn phase(&self) -> SessionPhase {
        if self.is_recording {
            SessionPhase::Recording
        } else if self.feedback.is_some() {
            SessionPhase::Feedback
        } else {
            SessionPhase::Prompt
        }
    }

    /// Clear everything tied to the current question attempt, keeping the
    /// question index untouched.
    pub(crate) fn clear_attempt(&mut self, answer_secs: u32) {
        self.time_remaining = answer_secs;
        self.transcript.clear();
        self.artifact = None;
        self.feedback = None;
        self.capture_error = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
