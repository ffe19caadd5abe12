//! The practice session — one question-attempt cycle from start-recording
//! to advance-to-next-question.
//!
//! # State machine
//!
//! ```text
//! Prompt ──start_recording──▶ Recording
//!        ◀──capture error────┘ (capture_error set, stays in Prompt)
//!
//! Recording ──stop / countdown hits 0──▶ Feedback
//! Feedback ──advance_question──▶ Prompt (next question, transient state cleared)
//! ```
//!
//! [`SessionState`] is the single source of truth the UI renders from;
//! [`SessionController`] is the only thing that mutates it, in response to
//! user actions and one-second countdown ticks.

pub mod controller;
pub mod state;

pub use controller::{SessionController, TickOutcome};
pub use state::{SessionPhase, SessionState};
