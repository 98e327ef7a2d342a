use crate::stroke::StrokeRef;
use std::sync::Arc;

/// Committed paint strokes baked into a photo.
///
/// Cloning is cheap; the stroke list is shared and never mutated once built.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PaintLayer {
    strokes: Arc<[StrokeRef]>,
}

impl PaintLayer {
    pub fn new(strokes: Vec<StrokeRef>) -> Self {
        Self {
            strokes: strokes.into(),
        }
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Edits pending on a photo until the editor is done.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PhotoModifications {
    /// Clockwise rotation in degrees, always one of 0, 90, 180 or 270.
    pub angle: i32,
    /// Horizontal mirror, applied before the rotation.
    pub flipped: bool,
    pub paint: Option<PaintLayer>,
}

impl PhotoModifications {
    pub fn rotate(&mut self) {
        self.angle = (self.angle + 90).rem_euclid(360);
    }

    /// Snaps the angle to the nearest quarter turn in `[0, 360)`.
    pub fn normalize_angle(&mut self) {
        let angle = self.angle.rem_euclid(360);
        self.angle = ((angle + 45) / 90 * 90) % 360;
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// True when applying these modifications leaves the photo unchanged.
    pub fn is_empty(&self) -> bool {
        self.angle == 0
            && !self.flipped
            && self.paint.as_ref().is_none_or(PaintLayer::is_empty)
    }

    /// Whether width and height trade places on screen.
    pub fn is_sideways(&self) -> bool {
        self.angle % 180 != 0
    }
}
