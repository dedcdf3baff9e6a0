//! Frame source backed by the `ffprobe` and `ffmpeg` command-line tools.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::FrameSource;
use crate::analysis::normalizer::jpeg_data_url;
use crate::error::{MoodError, MoodResult};

/// JPEG quality passed to ffmpeg's mjpeg encoder (2 = best, 31 = worst).
const JPEG_QSCALE: &str = "4";

/// Reads frames from a local video file.
#[derive(Debug, Clone)]
pub struct FfmpegFrameSource {
    path: PathBuf,
}

impl FfmpegFrameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for FfmpegFrameSource {
    fn load(&mut self) -> MoodResult<f64> {
        if !self.path.is_file() {
            return Err(MoodError::VideoLoad(format!("{} not found", self.path.display())));
        }

        let output = Command::new("ffprobe")
            .args(["-v", "error", "-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(&self.path)
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| MoodError::VideoLoad(format!("failed to spawn ffprobe: {}", e)))?;

        if !output.status.success() {
            return Err(MoodError::VideoLoad(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let duration = parse_duration(&String::from_utf8_lossy(&output.stdout))?;
        debug!(path = %self.path.display(), duration, "Probed video");
        Ok(duration)
    }

    fn frame_at(&mut self, timestamp: f64) -> MoodResult<String> {
        let output = Command::new("ffmpeg")
            .args(["-v", "error", "-ss"])
            .arg(format!("{:.3}", timestamp))
            .arg("-i")
            .arg(&self.path)
            .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "mjpeg", "-q:v", JPEG_QSCALE, "-"])
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| MoodError::VideoLoad(format!("failed to spawn ffmpeg: {}", e)))?;

        if !output.status.success() || output.stdout.is_empty() {
            return Err(MoodError::VideoLoad(format!(
                "no frame at {:.3}s: {}",
                timestamp,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!(timestamp, bytes = output.stdout.len(), "Extracted frame");
        Ok(jpeg_data_url(&output.stdout))
    }
}

/// Parse ffprobe's duration output (seconds, possibly `N/A`).
fn parse_duration(stdout: &str) -> MoodResult<f64> {
    let value = stdout.lines().next().unwrap_or_default().trim();
    value
        .parse::<f64>()
        .map_err(|_| MoodError::VideoLoad(format!("unknown duration '{}'", value)))
}
