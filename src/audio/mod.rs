//! Audio — microphone capture, WAV artifacts, playback and level metering.
//!
//! # Recording path
//!
//! ```text
//! Microphone → cpal callback → shared sample buffer
//!           → (on stop) downmix_to_mono → hound WAV file → RecordingArtifact
//! ```
//!
//! Capture sits behind the [`Recorder`] / [`ActiveCapture`] traits so the
//! session controller (and its tests) never touch cpal directly. The live
//! capture handle is RAII: dropping it tears down the input stream.
//!
//! Playback is the mirror image: [`Player`] decodes the artifact WAV with
//! `hound` and feeds it to a cpal output stream.

pub mod artifact;
pub mod capture;
pub mod meter;
pub mod playback;

pub use artifact::{downmix_to_mono, RecordingArtifact};
pub use capture::{ActiveCapture, CaptureError, MicRecorder, Recorder};
pub use meter::level_bars;
pub use playback::{PlaybackError, Player};
