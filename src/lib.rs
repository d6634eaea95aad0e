//! Stable output slots for unstable tracker identities.
//!
//! Upstream detector/trackers hand out transient track IDs that appear,
//! vanish, and get reused. Downstream control consumers (audio/visual
//! software listening for OSC) want a small fixed set of channels that never
//! flicker or jump. This crate sits in between: it routes each frame's
//! detections onto `max_slots` stable slots, smooths and holds each slot's
//! `(x, y, size)` output, and emits one tuple per slot per frame plus an
//! active-slot count.
//!
//! The core lives in [`slots`]; [`integration`] supplies the frame loop and
//! the seams for detectors and replays; [`output`] carries tuples to the
//! wire as OSC over UDP.

pub mod config;
pub mod integration;
pub mod output;
pub mod slots;

pub use config::{ClassVocabulary, ConfigError};
pub use integration::{
    DetectionBuilder, DetectionGuard, DetectionSource, FrameDetections, PipelineError,
    ReplaySource, SlotPipeline,
};
pub use output::{ControlSink, OscConfig, OscSink, SinkError};
pub use slots::{
    Detection, Emission, FilterConfig, FrameOutput, FrameSize, Rect, SENTINEL, SlotRouter,
};
