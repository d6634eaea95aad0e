//! Temporal output filter: smoothing, hold-through, and expiry per slot.

use crate::slots::detection::Detection;
use crate::slots::state::{SENTINEL, SlotState};

/// Pixel dimensions of the source frame, used to normalize outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }
}

/// Configuration for the temporal output filter.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// EMA blend weight for new samples, in `[0, 1]`. 0 disables smoothing.
    pub ema_factor: f32,
    /// Frames to keep re-emitting the last value across misses
    pub hold_frames: u32,
    /// Minimum normalized box area for a detection to be accepted
    pub min_area_fraction: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ema_factor: 0.25,
            hold_frames: 12,
            min_area_fraction: 0.0008,
        }
    }
}

/// One slot's output for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    /// A detection was accepted this frame
    Fresh([f32; 3]),
    /// No accepted detection; the last value is repeated within the hold window
    Held([f32; 3]),
    /// The slot is empty (or its hold window ran out)
    Cleared,
}

impl Emission {
    /// The tuple to put on the wire.
    pub fn value(&self) -> [f32; 3] {
        match self {
            Emission::Fresh(v) | Emission::Held(v) => *v,
            Emission::Cleared => SENTINEL,
        }
    }

    /// Whether this emission counts toward the frame's active-slot total.
    /// A held value only counts while its size component is positive.
    pub fn is_active(&self) -> bool {
        match self {
            Emission::Fresh(_) => true,
            Emission::Held(v) => v[2] > 0.0,
            Emission::Cleared => false,
        }
    }
}

/// Turns a slot's raw (or absent) detection into exactly one emission per
/// frame, mutating the slot's state.
///
/// Three outcomes: **accept** (reset misses, smooth, emit), **hold** (repeat
/// the last value for up to `hold_frames` misses so single-frame detector
/// dropout does not reach downstream), **expire** (emit the sentinel and
/// forget everything). A detection below the area gate is treated as a miss.
#[derive(Debug, Clone, Default)]
pub struct OutputFilter {
    config: FilterConfig,
}

impl OutputFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn step(
        &self,
        state: &mut SlotState,
        detection: Option<&Detection>,
        frame: FrameSize,
    ) -> Emission {
        let accepted = detection.and_then(|det| {
            let raw = [
                det.center_x() / frame.width as f32,
                det.center_y() / frame.height as f32,
                det.area() / frame.area(),
            ];
            (raw[2] >= self.config.min_area_fraction).then_some(raw)
        });

        match accepted {
            Some(raw) => {
                state.miss_count = 0;
                let out = if self.config.ema_factor > 0.0 {
                    let a = self.config.ema_factor;
                    let next = match state.smoothed {
                        // First sample is taken exactly, no blending.
                        None => raw,
                        Some(prev) => [
                            (1.0 - a) * prev[0] + a * raw[0],
                            (1.0 - a) * prev[1] + a * raw[1],
                            (1.0 - a) * prev[2] + a * raw[2],
                        ],
                    };
                    state.smoothed = Some(next);
                    next
                } else {
                    raw
                };
                state.last_output = out;
                state.has_value = true;
                Emission::Fresh(out)
            }
            None if state.has_value && state.miss_count < self.config.hold_frames => {
                state.miss_count += 1;
                Emission::Held(state.last_output)
            }
            None => {
                state.clear();
                Emission::Cleared
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::rect::Rect;

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    fn det(cx: f32, cy: f32, side: f32) -> Detection {
        let rect = Rect::new(cx - side / 2.0, cy - side / 2.0, side, side);
        Detection::new(rect, 0.9, 0, Some(1))
    }

    #[test]
    fn test_first_sample_is_exact() {
        let filter = OutputFilter::new(FilterConfig {
            ema_factor: 0.25,
            ..Default::default()
        });
        let mut state = SlotState::new();

        let out = filter.step(&mut state, Some(&det(320.0, 240.0, 64.0)), FRAME);
        let expected = [0.5, 0.5, (64.0 * 64.0) / (640.0 * 480.0)];
        assert_eq!(out, Emission::Fresh(expected));
        assert_eq!(state.smoothed, Some(expected));
    }

    #[test]
    fn test_ema_blends_later_samples() {
        let filter = OutputFilter::new(FilterConfig {
            ema_factor: 0.5,
            ..Default::default()
        });
        let mut state = SlotState::new();

        filter.step(&mut state, Some(&det(320.0, 240.0, 64.0)), FRAME);
        let out = filter.step(&mut state, Some(&det(640.0, 480.0, 64.0)), FRAME);
        let v = out.value();
        assert!((v[0] - 0.75).abs() < 1e-6);
        assert!((v[1] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_zero_ema_passes_raw_through() {
        let filter = OutputFilter::new(FilterConfig {
            ema_factor: 0.0,
            ..Default::default()
        });
        let mut state = SlotState::new();

        for cx in [100.0, 200.0, 300.0] {
            let out = filter.step(&mut state, Some(&det(cx, 240.0, 64.0)), FRAME);
            assert_eq!(out.value()[0], cx / 640.0);
        }
        assert_eq!(state.smoothed, None);
    }

    #[test]
    fn test_hold_then_expire() {
        let filter = OutputFilter::new(FilterConfig {
            hold_frames: 2,
            ..Default::default()
        });
        let mut state = SlotState::new();

        let fresh = filter.step(&mut state, Some(&det(320.0, 240.0, 64.0)), FRAME);
        let held = fresh.value();

        assert_eq!(filter.step(&mut state, None, FRAME), Emission::Held(held));
        assert_eq!(filter.step(&mut state, None, FRAME), Emission::Held(held));
        assert_eq!(filter.step(&mut state, None, FRAME), Emission::Cleared);
        assert!(!state.has_value);
        assert_eq!(state.smoothed, None);
        assert_eq!(state.last_output, SENTINEL);
    }

    #[test]
    fn test_below_area_gate_is_a_miss() {
        let filter = OutputFilter::new(FilterConfig {
            min_area_fraction: 0.5,
            hold_frames: 1,
            ..Default::default()
        });
        let mut state = SlotState::new();

        // Tiny box on an empty slot: straight to sentinel, no hold.
        let out = filter.step(&mut state, Some(&det(320.0, 240.0, 8.0)), FRAME);
        assert_eq!(out, Emission::Cleared);
    }

    #[test]
    fn test_empty_slot_keeps_emitting_sentinel() {
        let filter = OutputFilter::default();
        let mut state = SlotState::new();
        for _ in 0..3 {
            let out = filter.step(&mut state, None, FRAME);
            assert_eq!(out, Emission::Cleared);
            assert_eq!(out.value(), SENTINEL);
            assert!(!out.is_active());
        }
    }
}
