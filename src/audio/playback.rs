//! Playback of a recorded answer through the default output device.
//!
//! [`Player`] decodes the artifact WAV with `hound` and streams it through a
//! cpal output stream built at the file's own sample rate and channel count.
//! The stream handle is RAII: [`Player::stop`] (or dropping the player)
//! tears it down. Only one recording plays at a time; starting a new one
//! replaces the old stream.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use super::artifact::read_wav;

// ---------------------------------------------------------------------------
// PlaybackError
// ---------------------------------------------------------------------------

/// Errors that can occur while starting playback.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no output device found on the default audio host")]
    NoDevice,

    #[error("failed to read recording: {0}")]
    Decode(#[from] hound::Error),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// One-at-a-time WAV playback. Owned by the UI; all calls happen on the UI
/// thread while the cpal callback feeds the device from a shared cursor.
pub struct Player {
    stream: Option<cpal::Stream>,
    finished: Arc<AtomicBool>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            stream: None,
            finished: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start playing the WAV file at `path`, replacing any current playback.
    pub fn play(&mut self, path: &Path) -> Result<(), PlaybackError> {
        self.stop();

        let (samples, sample_rate, channels) = read_wav(path)?;

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;

        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let finished = Arc::new(AtomicBool::new(false));
        let cursor = Arc::new(AtomicUsize::new(0));

        let cb_samples = Arc::new(samples);
        let cb_finished = Arc::clone(&finished);
        let cb_cursor = Arc::clone(&cursor);

        let stream = device.build_output_stream(
            &config,
            move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let start = cb_cursor.fetch_add(out.len(), Ordering::Relaxed);
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = cb_samples.get(start + i).copied().unwrap_or(0.0);
                }
                if start >= cb_samples.len() {
                    cb_finished.store(true, Ordering::Relaxed);
                }
            },
            |err: cpal::StreamError| {
                log::error!("cpal output stream error: {err}");
            },
            None, // no timeout
        )?;

        stream.play()?;
        log::info!("playback started: {}", path.display());

        self.stream = Some(stream);
        self.finished = finished;
        Ok(())
    }

    /// Stop playback, dropping the output stream.
    pub fn stop(&mut self) {
        if self.stream.take().is_some() {
            log::debug!("playback stopped");
        }
        self.finished.store(true, Ordering::Relaxed);
    }

    /// Whether audio is currently playing. Reaps the stream once the file
    /// has run out so the device is released promptly.
    pub fn is_playing(&mut self) -> bool {
        if self.finished.load(Ordering::Relaxed) {
            self.stream = None;
            return false;
        }
        self.stream.is_some()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_is_not_playing() {
        let mut player = Player::new();
        assert!(!player.is_playing());
    }

    #[test]
    fn stop_without_playback_is_a_no_op() {
        let mut player = Player::new();
        player.stop();
        player.stop();
        assert!(!player.is_playing());
    }

    #[test]
    fn play_on_missing_file_reports_decode_error() {
        let mut player = Player::new();
        let err = player.play(Path::new("/nonexistent/answer.wav"));
        assert!(matches!(err, Err(PlaybackError::Decode(_))));
        assert!(!player.is_playing());
    }
}
