//! Detection input for the slot router.

use crate::slots::rect::Rect;

/// One detected object for one frame, as produced by an upstream
/// detector/tracker.
///
/// `track_id` is the upstream tracker's transient tag. It may be absent when
/// the tracker lost the object this frame, and an id may later be reused for
/// a different physical object, so nothing here treats it as a permanent
/// identity.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Transient tracker identifier, absent when the tracker dropped it
    pub track_id: Option<u32>,
    /// Bounding box in pixel coordinates
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Class index into the detector's vocabulary
    pub class_id: u32,
}

impl Detection {
    pub fn new(bbox: Rect, score: f32, class_id: u32, track_id: Option<u32>) -> Self {
        Self {
            track_id,
            bbox,
            score,
            class_id,
        }
    }

    /// Bounding-box center, x component.
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.bbox.center().0
    }

    /// Bounding-box center, y component.
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.bbox.center().1
    }

    /// Bounding-box pixel area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.bbox.area()
    }
}
