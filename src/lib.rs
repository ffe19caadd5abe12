//! Interview Practice — a desktop app for rehearsing spoken interview
//! answers.
//!
//! The app cycles through a fixed list of discussion questions. For each
//! question the user records a timed (60 s) spoken answer via the
//! microphone, types a transcript of what they said, and receives heuristic
//! feedback (word/sentence counts plus templated content and language tips)
//! the moment recording stops. The recorded audio is written to a WAV file
//! and can be replayed inside the app.
//!
//! # Module map
//!
//! * [`questions`] — the cyclic question bank (built-ins + optional user file).
//! * [`feedback`] — pure transcript metrics and tip selection.
//! * [`session`] — the state machine driving one answer attempt.
//! * [`audio`] — microphone capture, WAV artifact, playback, level meter.
//! * [`config`] — TOML settings and platform paths.
//! * [`app`] — the egui shell.

pub mod app;
pub mod audio;
pub mod config;
pub mod feedback;
pub mod questions;
pub mod session;
