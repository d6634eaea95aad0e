//! Fixed-capacity mapping between transient track IDs and stable slots.

/// Partial bijection between upstream track IDs and slot numbers
/// `1..=capacity`.
///
/// Backed by a single slot-indexed array: a slot holds at most one track by
/// construction, and [`SlotMap::bind`] refuses a track that is already bound
/// elsewhere, so neither direction can ever be one-to-many. Lookups are
/// linear scans, which is the right trade at a capacity of a handful of
/// slots.
#[derive(Debug, Clone)]
pub struct SlotMap {
    /// Index `s - 1` holds the track bound to slot `s`, if any
    tracks: Vec<Option<u32>>,
}

impl SlotMap {
    pub fn new(capacity: usize) -> Self {
        Self {
            tracks: vec![None; capacity],
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.tracks.len()
    }

    /// Slot currently bound to `track_id`, if any.
    pub fn slot_for(&self, track_id: u32) -> Option<u32> {
        self.tracks
            .iter()
            .position(|t| *t == Some(track_id))
            .map(|i| i as u32 + 1)
    }

    /// Track currently bound to `slot`, if any.
    pub fn track_for(&self, slot: u32) -> Option<u32> {
        self.tracks.get(slot as usize - 1).copied().flatten()
    }

    /// Lowest-numbered unoccupied slot, if any.
    pub fn first_free(&self) -> Option<u32> {
        self.tracks
            .iter()
            .position(|t| t.is_none())
            .map(|i| i as u32 + 1)
    }

    /// Bind `track_id` to `slot`. The slot must be free and the track
    /// unbound; the engine releases first when evicting.
    pub fn bind(&mut self, track_id: u32, slot: u32) {
        debug_assert!(self.track_for(slot).is_none(), "slot {slot} occupied");
        debug_assert!(
            self.slot_for(track_id).is_none(),
            "track {track_id} already bound"
        );
        self.tracks[slot as usize - 1] = Some(track_id);
    }

    /// Remove whatever track is bound to `slot`, returning it.
    pub fn release(&mut self, slot: u32) -> Option<u32> {
        self.tracks[slot as usize - 1].take()
    }

    /// Occupied `(slot, track_id)` pairs in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.tracks
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|track| (i as u32 + 1, track)))
    }

    pub fn occupied_count(&self) -> usize {
        self.tracks.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_and_lookup() {
        let mut map = SlotMap::new(3);
        assert_eq!(map.first_free(), Some(1));

        map.bind(42, 1);
        assert_eq!(map.slot_for(42), Some(1));
        assert_eq!(map.track_for(1), Some(42));
        assert_eq!(map.first_free(), Some(2));
    }

    #[test]
    fn test_release_frees_slot() {
        let mut map = SlotMap::new(2);
        map.bind(7, 1);
        map.bind(9, 2);
        assert_eq!(map.first_free(), None);

        assert_eq!(map.release(1), Some(7));
        assert_eq!(map.slot_for(7), None);
        assert_eq!(map.first_free(), Some(1));
    }

    #[test]
    fn test_occupied_in_slot_order() {
        let mut map = SlotMap::new(3);
        map.bind(9, 3);
        map.bind(5, 1);
        let pairs: Vec<_> = map.occupied().collect();
        assert_eq!(pairs, vec![(1, 5), (3, 9)]);
        assert_eq!(map.occupied_count(), 2);
    }
}
