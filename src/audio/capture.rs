//! Microphone capture via `cpal`, behind the [`Recorder`] seam.
//!
//! [`MicRecorder`] probes the default input device each time a capture is
//! requested, so a denied microphone permission or an unplugged device shows
//! up as a [`CaptureError`] on that attempt rather than a startup failure.
//! The returned [`ActiveCapture`] accumulates samples from the cpal callback;
//! stopping it downmixes to mono and writes the WAV artifact. The handle is
//! RAII — dropping it without calling `stop` still tears down the stream.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use super::artifact::{downmix_to_mono, write_wav, RecordingArtifact};
use super::meter;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors that can occur while requesting or finalizing a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The system denied access to the microphone. No automatic retry; the
    /// user has to grant permission and press record again.
    #[error("microphone access was denied — check the system permission settings")]
    PermissionDenied,

    #[error("no input device found on the default audio host")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to create recordings directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write recording: {0}")]
    Encode(#[from] hound::Error),
}

impl CaptureError {
    /// Classify a stream-build failure. Backend-specific errors are how the
    /// platforms report a declined microphone permission.
    fn from_build(err: cpal::BuildStreamError) -> Self {
        match err {
            cpal::BuildStreamError::BackendSpecific { .. }
            | cpal::BuildStreamError::DeviceNotAvailable => CaptureError::PermissionDenied,
            other => CaptureError::BuildStream(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Recorder / ActiveCapture traits
// ---------------------------------------------------------------------------

/// Source of capture sessions. The session controller holds this as a trait
/// object; tests substitute a fake.
pub trait Recorder {
    /// Begin a capture session, returning a live handle or the reason the
    /// microphone is unavailable.
    fn request_capture(&mut self) -> Result<Box<dyn ActiveCapture>, CaptureError>;
}

/// A live capture session. Exactly one exists per recording.
pub trait ActiveCapture {
    /// Stop capturing and finalize the recorded audio into an artifact.
    fn stop(self: Box<Self>) -> Result<RecordingArtifact, CaptureError>;

    /// RMS amplitude bars over the most recent captured audio, for the live
    /// input meter. `[0.0, 1.0]` per bar.
    fn level_bars(&self, num_bars: usize) -> Vec<f32>;
}

// ---------------------------------------------------------------------------
// MicRecorder
// ---------------------------------------------------------------------------

/// Shared sample sink filled by the cpal callback.
type SampleSink = Arc<Mutex<Vec<f32>>>;

/// Production [`Recorder`] on top of the system default input device.
pub struct MicRecorder {
    /// Directory that finalized WAV files are written into.
    recordings_dir: PathBuf,
}

impl MicRecorder {
    /// Create a recorder that writes artifacts into `recordings_dir`.
    ///
    /// Device probing happens per [`request_capture`](Recorder::request_capture)
    /// call, so construction never fails.
    pub fn new(recordings_dir: PathBuf) -> Self {
        Self { recordings_dir }
    }

    fn artifact_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.recordings_dir.join(format!("answer-{stamp}.wav"))
    }
}

impl Recorder for MicRecorder {
    fn request_capture(&mut self) -> Result<Box<dyn ActiveCapture>, CaptureError> {
        std::fs::create_dir_all(&self.recordings_dir)?;

        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
        let supported = device.default_input_config()?;

        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();

        let sink: SampleSink = Arc::new(Mutex::new(Vec::new()));
        let callback_sink = Arc::clone(&sink);

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // A poisoned lock means another thread panicked while
                    // appending; nothing useful to do on the audio thread.
                    if let Ok(mut samples) = callback_sink.lock() {
                        samples.extend_from_slice(data);
                    }
                },
                |err: cpal::StreamError| {
                    log::error!("cpal input stream error: {err}");
                },
                None, // no timeout
            )
            .map_err(CaptureError::from_build)?;

        stream.play()?;
        log::info!("capture started ({sample_rate} Hz, {channels} ch)");

        Ok(Box::new(MicCapture {
            stream,
            sink,
            sample_rate,
            channels,
            out_path: self.artifact_path(),
        }))
    }
}

// ---------------------------------------------------------------------------
// MicCapture
// ---------------------------------------------------------------------------

/// Live microphone capture. Holding the value keeps the cpal stream open;
/// dropping it stops the stream.
struct MicCapture {
    stream: cpal::Stream,
    sink: SampleSink,
    sample_rate: u32,
    channels: u16,
    out_path: PathBuf,
}

impl ActiveCapture for MicCapture {
    fn stop(self: Box<Self>) -> Result<RecordingArtifact, CaptureError> {
        // Tear the stream down before draining so the callback cannot append
        // mid-write.
        drop(self.stream);

        let interleaved = match self.sink.lock() {
            Ok(mut samples) => std::mem::take(&mut *samples),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };

        let mono = downmix_to_mono(&interleaved, self.channels);
        let artifact = write_wav(&self.out_path, &mono, self.sample_rate)?;
        log::info!(
            "recording finalized: {} ({:.1} s)",
            artifact.path.display(),
            artifact.duration_secs
        );
        Ok(artifact)
    }

    fn level_bars(&self, num_bars: usize) -> Vec<f32> {
        let window = self.sample_rate as usize * self.channels as usize;
        match self.sink.lock() {
            Ok(samples) => meter::level_bars(&samples, num_bars, window),
            Err(_) => vec![0.0; num_bars],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
