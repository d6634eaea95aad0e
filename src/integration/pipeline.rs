//! Frame loop: source → guard → router → sink.

use thiserror::Error;
use tracing::{debug, info};

use super::detector::{DetectionSource, FrameDetections};
use crate::output::ControlSink;
use crate::slots::{Detection, FrameOutput, SlotRouter};

/// Defensive re-validation of upstream detections.
///
/// The source is expected to pre-filter by class and confidence, but
/// trackers are known to let the occasional stray through, so the pipeline
/// checks again. Rejects are normal per-frame outcomes, not errors.
#[derive(Debug, Clone)]
pub struct DetectionGuard {
    pub min_confidence: f32,
    pub target_classes: Vec<u32>,
}

impl DetectionGuard {
    pub fn new(min_confidence: f32, target_classes: Vec<u32>) -> Self {
        Self {
            min_confidence,
            target_classes,
        }
    }

    pub fn admits(&self, det: &Detection) -> bool {
        det.track_id.is_some()
            && det.score >= self.min_confidence
            && self.target_classes.contains(&det.class_id)
    }
}

/// Error from a pipeline run: either side can fail, the core in between
/// cannot.
#[derive(Debug, Error)]
pub enum PipelineError<S, K> {
    #[error("detection source failed: {0}")]
    Source(S),
    #[error("control sink failed: {0}")]
    Sink(K),
}

/// Bundles a [`DetectionSource`], a [`SlotRouter`], and a [`ControlSink`]
/// into the complete frame-driven loop.
///
/// Strictly one frame at a time: each frame is routed and emitted before the
/// next is pulled, and shutdown (source exhaustion) is only observed between
/// frames.
pub struct SlotPipeline<D: DetectionSource, S: ControlSink> {
    source: D,
    sink: S,
    router: SlotRouter,
    guard: DetectionGuard,
}

impl<D: DetectionSource, S: ControlSink> SlotPipeline<D, S> {
    pub fn new(source: D, sink: S, router: SlotRouter, guard: DetectionGuard) -> Self {
        Self {
            source,
            sink,
            router,
            guard,
        }
    }

    /// Route one frame and emit every slot's tuple plus the active count.
    pub fn process_frame(&mut self, frame: FrameDetections) -> Result<FrameOutput, S::Error> {
        let FrameDetections { size, detections } = frame;
        let admitted: Vec<Detection> = detections
            .into_iter()
            .filter(|d| self.guard.admits(d))
            .collect();

        let output = self.router.update(admitted, size);
        for (slot, emission) in output.slots() {
            self.sink.send_slot(slot, emission.value())?;
        }
        self.sink.send_active_count(output.active())?;
        debug!(active = output.active(), "frame emitted");
        Ok(output)
    }

    /// Pull frames until the source is exhausted. Returns the number of
    /// frames processed.
    pub fn run(&mut self) -> Result<u64, PipelineError<D::Error, S::Error>> {
        info!(
            slots = self.router.max_slots(),
            classes = ?self.guard.target_classes,
            "pipeline started"
        );
        let mut frames = 0u64;
        while let Some(frame) = self.source.next_frame().map_err(PipelineError::Source)? {
            self.process_frame(frame).map_err(PipelineError::Sink)?;
            frames += 1;
        }
        info!(frames, "source exhausted, stopping");
        Ok(frames)
    }

    /// Get a reference to the underlying router.
    pub fn router(&self) -> &SlotRouter {
        &self.router
    }

    /// Get a mutable reference to the underlying sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
