//! Trait for outbound control-message transports.

/// Where per-slot tuples and the active-slot count go each frame.
///
/// Implement this to point the pipeline at something other than OSC over
/// UDP, e.g. a channel in tests.
pub trait ControlSink {
    /// Error type for transport failures.
    type Error;

    /// Send one slot's `(x, y, size)` tuple. `slot` is 1-based.
    fn send_slot(&mut self, slot: u32, value: [f32; 3]) -> Result<(), Self::Error>;

    /// Send the frame's active-slot count.
    fn send_active_count(&mut self, count: u32) -> Result<(), Self::Error>;
}
