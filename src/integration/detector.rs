//! Trait for upstream detection/tracking sources.

use crate::slots::{Detection, FrameSize};

/// One frame's worth of upstream output: the frame's pixel dimensions and
/// whatever the detector/tracker found in it.
#[derive(Debug, Clone)]
pub struct FrameDetections {
    pub size: FrameSize,
    pub detections: Vec<Detection>,
}

/// Pull-based source of tracked detections.
///
/// Implement this to connect any detector/tracker stack to the slot
/// pipeline. Returning `Ok(None)` signals the end of the stream and makes
/// the pipeline loop exit cleanly.
///
/// # Example
///
/// ```ignore
/// use slotcast_rs::{DetectionSource, FrameDetections};
///
/// struct MyCamera {
///     // Your capture + inference here
/// }
///
/// impl DetectionSource for MyCamera {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<FrameDetections>, Self::Error> {
///         // Grab a frame, run the tracker, convert its output
///         Ok(None)
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for source failures.
    type Error;

    /// Produce the next frame, or `None` when the stream has ended.
    fn next_frame(&mut self) -> Result<Option<FrameDetections>, Self::Error>;
}
