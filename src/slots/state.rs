//! Per-slot smoothing and hold memory.

/// Wire value meaning "no object in this slot".
pub const SENTINEL: [f32; 3] = [-1.0, -1.0, 0.0];

/// Mutable memory for one slot, updated once per frame by the output filter.
///
/// `has_value` is false exactly when `last_output` is the sentinel and
/// `smoothed` is absent; [`SlotState::clear`] is the only way back to that
/// state.
#[derive(Debug, Clone)]
pub struct SlotState {
    /// EMA memory, absent until the first accepted detection
    pub smoothed: Option<[f32; 3]>,
    /// Most recently emitted tuple
    pub last_output: [f32; 3],
    /// Consecutive frames without an accepted detection
    pub miss_count: u32,
    /// Whether a non-sentinel output is live (emitted and not yet expired)
    pub has_value: bool,
}

impl SlotState {
    pub fn new() -> Self {
        Self {
            smoothed: None,
            last_output: SENTINEL,
            miss_count: 0,
            has_value: false,
        }
    }

    /// Drop all memory and return to the sentinel state.
    pub fn clear(&mut self) {
        self.smoothed = None;
        self.last_output = SENTINEL;
        self.miss_count = 0;
        self.has_value = false;
    }
}

impl Default for SlotState {
    fn default() -> Self {
        Self::new()
    }
}
