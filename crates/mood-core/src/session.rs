//! Client capture session.
//!
//! Owns the exclusive camera stream, the captured-frame cache and the
//! single in-flight request flag of one user interface controller.
//!
//! This is a library API for native front ends that drive a camera. No
//! binary in this workspace provides a [`Camera`]; the bundled browser client
//! manages its webcam in JavaScript and only talks to the HTTP API.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{MoodError, MoodResult};

/// A camera device that can be opened for streaming.
pub trait Camera {
    type Stream: CameraStream;

    fn acquire(&mut self) -> MoodResult<Self::Stream>;
}

/// An open camera stream.
pub trait CameraStream {
    /// Whether a frame is available to rasterize.
    fn is_ready(&self) -> bool;

    /// Rasterize the current frame as an image payload.
    fn snapshot(&mut self) -> MoodResult<String>;

    /// Release the device.
    fn stop(&mut self);
}

/// Where video-mode frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSource {
    Webcam,
    File,
}

/// Marks one analysis request as in flight. Dropping it re-enables the trigger.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct CaptureSession<C: Camera> {
    camera: C,
    stream: Option<C::Stream>,
    captured: Option<String>,
    source: VideoSource,
    in_flight: Arc<AtomicBool>,
}

impl<C: Camera> CaptureSession<C> {
    pub fn new(camera: C) -> Self {
        Self {
            camera,
            stream: None,
            captured: None,
            source: VideoSource::Webcam,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn source(&self) -> VideoSource {
        self.source
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    pub fn captured_frame(&self) -> Option<&str> {
        self.captured.as_deref()
    }

    /// Open the camera, stopping any stream already held.
    pub fn start_camera(&mut self) -> MoodResult<()> {
        self.stop_camera();
        let stream = self.camera.acquire()?;
        self.stream = Some(stream);
        info!("Camera stream started");
        Ok(())
    }

    pub fn stop_camera(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Camera stream stopped");
        }
    }

    /// Switch the video source. Clears the captured frame; the webcam is
    /// started for [`VideoSource::Webcam`] and released otherwise.
    pub fn switch_source(&mut self, source: VideoSource) -> MoodResult<()> {
        self.captured = None;
        self.source = source;
        match source {
            VideoSource::Webcam => self.start_camera(),
            VideoSource::File => {
                self.stop_camera();
                Ok(())
            }
        }
    }

    /// Rasterize the current camera frame into the cache.
    pub fn capture(&mut self) -> MoodResult<&str> {
        let stream = self
            .stream
            .as_mut()
            .filter(|s| s.is_ready())
            .ok_or_else(|| MoodError::Camera("Сначала нажмите «Снять кадр»".to_string()))?;
        let frame = stream.snapshot()?;
        Ok(self.captured.insert(frame).as_str())
    }

    /// Frames to send for webcam analysis: the cached frame, capturing one if needed.
    pub fn frames_for_analysis(&mut self) -> MoodResult<Vec<String>> {
        if let Some(frame) = &self.captured {
            return Ok(vec![frame.clone()]);
        }
        Ok(vec![self.capture()?.to_string()])
    }

    /// Mark a request as in flight, or `None` if one already is.
    pub fn begin_request(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight {
                flag: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl<C: Camera> Drop for CaptureSession<C> {
    fn drop(&mut self) {
        self.stop_camera();
    }
}
