//! Frame sampling from a video source.
//!
//! Picks up to [`MAX_FRAMES`] evenly spaced interior timestamps and rasterizes
//! one image per timestamp. Extraction succeeds or fails as a whole.

pub mod ffmpeg;

use tracing::debug;

use crate::error::{MoodError, MoodResult};

pub use ffmpeg::FfmpegFrameSource;

/// Seconds of video per sampled frame.
pub const SECONDS_PER_FRAME: f64 = 3.0;

/// Upper bound on frames sampled from one video.
pub const MAX_FRAMES: usize = 3;

/// A seekable video that can rasterize its current frame.
pub trait FrameSource {
    /// Load the video and return its duration in seconds.
    fn load(&mut self) -> MoodResult<f64>;

    /// Seek to `timestamp` seconds and return the frame as an image payload.
    fn frame_at(&mut self, timestamp: f64) -> MoodResult<String>;
}

/// Number of frames to sample: `clamp(floor(duration / 3), 1, 3)`.
pub fn frame_count(duration: f64) -> MoodResult<usize> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(MoodError::InvalidDuration(duration));
    }
    let count = (duration / SECONDS_PER_FRAME).floor() as usize;
    Ok(count.clamp(1, MAX_FRAMES))
}

/// Evenly spaced timestamps strictly inside `(0, duration)`.
pub fn sample_timestamps(duration: f64) -> MoodResult<Vec<f64>> {
    let count = frame_count(duration)?;
    Ok((0..count)
        .map(|i| duration * (i + 1) as f64 / (count + 1) as f64)
        .collect())
}

/// Load `source` and rasterize one frame per sampled timestamp, in order.
pub fn extract_frames<S: FrameSource + ?Sized>(source: &mut S) -> MoodResult<Vec<String>> {
    let duration = source.load()?;
    let timestamps = sample_timestamps(duration)?;
    debug!(duration, frames = timestamps.len(), "Sampling video frames");

    timestamps
        .into_iter()
        .map(|ts| source.frame_at(ts))
        .collect()
}
