//! Per-frame orchestration: assignment followed by temporal filtering.

use tracing::trace;

use crate::slots::detection::Detection;
use crate::slots::engine::SlotEngine;
use crate::slots::filter::{Emission, FilterConfig, FrameSize, OutputFilter};
use crate::slots::state::SlotState;

/// Everything the router produced for one frame: exactly one emission per
/// slot, plus the number of active slots.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    emissions: Vec<Emission>,
    active: u32,
}

impl FrameOutput {
    /// `(slot, emission)` pairs in slot order, slots numbered from 1.
    pub fn slots(&self) -> impl Iterator<Item = (u32, Emission)> + '_ {
        self.emissions
            .iter()
            .enumerate()
            .map(|(i, e)| (i as u32 + 1, *e))
    }

    /// The emission for `slot` (1-based).
    pub fn emission(&self, slot: u32) -> Emission {
        self.emissions[slot as usize - 1]
    }

    /// The wire tuple for `slot` (1-based).
    pub fn value(&self, slot: u32) -> [f32; 3] {
        self.emission(slot).value()
    }

    /// Number of slots carrying a live (non-sentinel) object this frame.
    pub fn active(&self) -> u32 {
        self.active
    }
}

/// Owns the assignment engine, the output filter, and one [`SlotState`] per
/// slot; [`SlotRouter::update`] runs one full frame through both stages.
///
/// All state is behind `&mut self`: callers that parallelize capture or
/// inference must still funnel frames through here one at a time.
#[derive(Debug)]
pub struct SlotRouter {
    engine: SlotEngine,
    filter: OutputFilter,
    states: Vec<SlotState>,
}

impl SlotRouter {
    pub fn new(max_slots: usize, config: FilterConfig) -> Self {
        Self {
            engine: SlotEngine::new(max_slots),
            filter: OutputFilter::new(config),
            states: vec![SlotState::new(); max_slots],
        }
    }

    pub fn max_slots(&self) -> usize {
        self.states.len()
    }

    pub fn engine(&self) -> &SlotEngine {
        &self.engine
    }

    /// Process one frame: update the track↔slot mapping, then run every
    /// slot through the temporal filter.
    pub fn update(&mut self, detections: Vec<Detection>, frame: FrameSize) -> FrameOutput {
        let view = self.engine.assign(detections);

        let emissions: Vec<Emission> = self
            .states
            .iter_mut()
            .zip(&view)
            .map(|(state, det)| self.filter.step(state, det.as_ref(), frame))
            .collect();

        let active = emissions.iter().filter(|e| e.is_active()).count() as u32;
        trace!(active, "frame routed");

        FrameOutput { emissions, active }
    }
}
