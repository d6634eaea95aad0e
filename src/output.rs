//! Outbound control-message transport.
//!
//! The pipeline only knows the [`ControlSink`] trait; [`OscSink`] is the
//! stock OSC-over-UDP implementation.

mod osc;
mod sink;

pub use osc::{OscConfig, OscSink, SinkError};
pub use sink::ControlSink;
