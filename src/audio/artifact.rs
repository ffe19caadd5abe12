//! Recorded-answer artifacts: mono downmix and 16-bit PCM WAV encoding.

use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// RecordingArtifact
// ---------------------------------------------------------------------------

/// A finalized answer recording on disk — the playable result of one
/// capture session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingArtifact {
    /// Path to the WAV file.
    pub path: PathBuf,
    /// Length of the recording in seconds.
    pub duration_secs: f32,
    /// Sample rate the file was written at, in Hz.
    pub sample_rate: u32,
}

impl RecordingArtifact {
    /// File name portion of the artifact path, for display.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

// ---------------------------------------------------------------------------
// Downmix
// ---------------------------------------------------------------------------

/// Downmix interleaved multi-channel samples to mono by averaging each
/// frame's channels. Mono input is returned unchanged.
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

// ---------------------------------------------------------------------------
// WAV encoding
// ---------------------------------------------------------------------------

/// Write mono `f32` samples in `[-1.0, 1.0]` to `path` as 16-bit PCM WAV
/// and return the finalized [`RecordingArtifact`].
pub fn write_wav(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
) -> Result<RecordingArtifact, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value)?;
    }
    writer.finalize()?;

    Ok(RecordingArtifact {
        path: path.to_path_buf(),
        duration_secs: samples.len() as f32 / sample_rate as f32,
        sample_rate,
    })
}

/// Read a WAV file back into `(mono-or-interleaved f32 samples, sample rate,
/// channels)`. Used by playback; accepts both int and float sample formats.
pub fn read_wav(path: &Path) -> Result<(Vec<f32>, u32, u16), hound::Error> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let max = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<Result<_, _>>()?
        }
        hound::SampleFormat::Float => {
            reader.samples::<f32>().collect::<Result<_, _>>()?
        }
    };

    Ok((samples, spec.sample_rate, spec.channels))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
