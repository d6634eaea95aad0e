//! Slot assignment: transient track IDs onto stable slot numbers.

use std::cmp::Ordering;

use tracing::debug;

use crate::slots::assignment::SlotMap;
use crate::slots::detection::Detection;

/// Maintains the track↔slot mapping across frames and resolves, each frame,
/// which detection occupies which slot.
///
/// Assignment favors continuity: a track that already owns a slot keeps it
/// for as long as the track exists, and a newcomer only displaces an
/// occupant by winning the largest-area comparison when every slot is taken.
#[derive(Debug)]
pub struct SlotEngine {
    map: SlotMap,
}

impl SlotEngine {
    pub fn new(max_slots: usize) -> Self {
        Self {
            map: SlotMap::new(max_slots),
        }
    }

    /// Read-only view of the current track↔slot mapping.
    pub fn map(&self) -> &SlotMap {
        &self.map
    }

    /// Process one frame of detections and return the per-slot view
    /// (index `s - 1` holds slot `s`'s detection, if any).
    ///
    /// Detections without a track id are discarded up front. If more
    /// detections arrive than there are slots, only the largest by area are
    /// considered, ties keeping input order.
    pub fn assign(&mut self, detections: Vec<Detection>) -> Vec<Option<Detection>> {
        let capacity = self.map.capacity();

        let mut dets: Vec<(u32, Detection)> = detections
            .into_iter()
            .filter_map(|d| d.track_id.map(|tid| (tid, d)))
            .collect();

        if dets.len() > capacity {
            // Stable sort: equal areas keep their input order.
            dets.sort_by(|(_, a), (_, b)| {
                b.area().partial_cmp(&a.area()).unwrap_or(Ordering::Equal)
            });
            dets.truncate(capacity);
        }

        // Frame-local areas. A slot whose track produced no surviving
        // detection this frame keeps area 0 and is the cheapest to evict.
        let mut slot_area = vec![0.0f32; capacity];
        for (tid, det) in &dets {
            if let Some(slot) = self.map.slot_for(*tid) {
                slot_area[slot as usize - 1] = det.area();
            }
        }

        // New tracks fill free slots first, then compete for the weakest
        // occupied slot. Losing candidates are dropped for the frame, not
        // queued.
        for (tid, det) in &dets {
            if self.map.slot_for(*tid).is_some() {
                continue;
            }
            if let Some(free) = self.map.first_free() {
                self.map.bind(*tid, free);
                slot_area[free as usize - 1] = det.area();
                debug!(track = *tid, slot = free, "track took free slot");
                continue;
            }

            let victim = self.map.occupied().min_by(|a, b| {
                let (wa, wb) = (slot_area[a.0 as usize - 1], slot_area[b.0 as usize - 1]);
                wa.partial_cmp(&wb).unwrap_or(Ordering::Equal)
            });
            if let Some((victim_slot, victim_track)) = victim
                && det.area() > slot_area[victim_slot as usize - 1]
            {
                self.map.release(victim_slot);
                self.map.bind(*tid, victim_slot);
                slot_area[victim_slot as usize - 1] = det.area();
                debug!(
                    track = *tid,
                    slot = victim_slot,
                    evicted = victim_track,
                    "track evicted smaller occupant"
                );
            }
        }

        let mut view: Vec<Option<Detection>> = vec![None; capacity];
        for (tid, det) in dets {
            if let Some(slot) = self.map.slot_for(tid) {
                view[slot as usize - 1] = Some(det);
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::rect::Rect;

    fn det(track_id: u32, area: f32) -> Detection {
        Detection::new(Rect::new(0.0, 0.0, area, 1.0), 0.9, 0, Some(track_id))
    }

    #[test]
    fn test_untracked_detections_discarded() {
        let mut engine = SlotEngine::new(2);
        let orphan = Detection::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0.9, 0, None);
        let view = engine.assign(vec![orphan]);
        assert!(view.iter().all(Option::is_none));
        assert_eq!(engine.map().occupied_count(), 0);
    }

    #[test]
    fn test_existing_track_keeps_slot() {
        let mut engine = SlotEngine::new(2);
        engine.assign(vec![det(5, 100.0)]);
        assert_eq!(engine.map().slot_for(5), Some(1));

        // A much larger newcomer fills the free slot instead of displacing.
        let view = engine.assign(vec![det(9, 500.0), det(5, 100.0)]);
        assert_eq!(engine.map().slot_for(5), Some(1));
        assert_eq!(engine.map().slot_for(9), Some(2));
        assert_eq!(view[0].as_ref().and_then(|d| d.track_id), Some(5));
        assert_eq!(view[1].as_ref().and_then(|d| d.track_id), Some(9));
    }

    #[test]
    fn test_eviction_requires_strictly_larger_area() {
        let mut engine = SlotEngine::new(1);
        engine.assign(vec![det(5, 100.0)]);

        // Equal area: no eviction. The cap keeps the incumbent (input order)
        // so the challenger never reaches the comparison at all.
        engine.assign(vec![det(5, 100.0), det(7, 100.0)]);
        assert_eq!(engine.map().slot_for(5), Some(1));
        assert_eq!(engine.map().slot_for(7), None);
    }

    #[test]
    fn test_absent_incumbent_counts_as_zero_area() {
        let mut engine = SlotEngine::new(1);
        engine.assign(vec![det(5, 100.0)]);

        // Track 5 vanished this frame, so its slot is worth 0 and any
        // newcomer wins it.
        engine.assign(vec![det(7, 1.0)]);
        assert_eq!(engine.map().slot_for(7), Some(1));
        assert_eq!(engine.map().slot_for(5), None);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut engine = SlotEngine::new(2);
        let view = engine.assign(vec![det(1, 10.0), det(2, 20.0), det(3, 30.0), det(4, 40.0)]);
        assert_eq!(view.len(), 2);
        assert_eq!(engine.map().occupied_count(), 2);
    }
}
