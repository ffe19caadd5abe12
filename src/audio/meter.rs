//! Live input level bars for the recording animation.
//!
//! Unlike a whole-clip waveform, the meter only looks at the tail of the
//! captured audio — the most recent `window` samples — so the bars track
//! what the microphone is hearing right now.

/// Compute `num_bars` RMS amplitude values over the last `window` samples
/// of `samples`.
///
/// The tail is divided into `num_bars` equal chunks, oldest first; the RMS
/// of each chunk becomes one bar, clamped to `[0.0, 1.0]`. When fewer than
/// `window` samples exist yet, the available audio fills the rightmost bars
/// and the rest stay at `0.0`.
pub fn level_bars(samples: &[f32], num_bars: usize, window: usize) -> Vec<f32> {
    if num_bars == 0 {
        return Vec::new();
    }

    let mut bars = vec![0.0_f32; num_bars];
    if samples.is_empty() || window == 0 {
        return bars;
    }

    let tail_len = samples.len().min(window);
    let tail = &samples[samples.len() - tail_len..];

    // Map the tail onto the right end of the bar row.
    let chunk = (window / num_bars).max(1);
    let filled = (tail_len / chunk).min(num_bars).max(1);
    let start_bar = num_bars - filled;

    for (i, bar) in bars[start_bar..].iter_mut().enumerate() {
        let lo = i * tail_len / filled;
        let hi = ((i + 1) * tail_len / filled).max(lo + 1).min(tail_len);
        let slice = &tail[lo..hi];
        let mean_sq = slice.iter().map(|s| s * s).sum::<f32>() / slice.len() as f32;
        *bar = mean_sq.sqrt().min(1.0);
    }

    bars
}
