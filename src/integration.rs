//! Integration module for connecting detection sources and control sinks
//! to the slot router.
//!
//! This module provides the traits and glue for running the full frame loop
//! against any detector/tracker stack and any outbound transport.

mod builder;
mod detector;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, FrameDetections};
pub use pipeline::{DetectionGuard, PipelineError, SlotPipeline};
pub use replay::{ReplayDetection, ReplayError, ReplayFrame, ReplaySource};
