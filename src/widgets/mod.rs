//! Child widgets of the photo editor.
//!
//! [`crate::PhotoEditor`] only talks to its children through these traits, so
//! any of them can be swapped out (tests use recording mocks).

use crate::brush::Brush;
use crate::mode::{ControlRequest, EditorMode};
use crate::modifications::PhotoModifications;
use egui::{Pos2, Rect, Ui};

mod color_picker;
mod controls_bar;
mod photo_canvas;

pub use color_picker::{GradientColorPicker, PALETTE};
pub use controls_bar::ControlsBar;
pub use photo_canvas::{DisplayTransform, PhotoCanvas};

/// Shows the photo and owns the paint layer.
pub trait Canvas {
    fn set_geometry(&mut self, rect: Rect);

    /// Rotation and flip changed.
    fn apply_modifications(&mut self, modifications: &PhotoModifications);

    /// Called on every mode change; `Save` and `Discard` actions must be
    /// handled here, they are not repeated.
    fn apply_mode(&mut self, mode: EditorMode);

    fn apply_brush(&mut self, brush: Brush);

    /// Write everything the canvas owns (the paint layer) into `modifications`.
    fn save(&mut self, modifications: &mut PhotoModifications);

    fn ui(&mut self, ui: &mut Ui);
}

/// Toolbar under the canvas.
pub trait Controls {
    fn set_geometry(&mut self, rect: Rect);

    fn apply_mode(&mut self, mode: EditorMode);

    /// Draws the controls and returns the gesture the user made, if any.
    fn ui(&mut self, ui: &mut Ui) -> Option<ControlRequest>;
}

/// Brush color and size picker, visible in paint mode.
pub trait ColorPicker {
    /// Current brush, including defaults filled in for an unset saved brush.
    fn brush(&self) -> Brush;

    /// Position the picker line around `anchor`.
    fn move_line(&mut self, anchor: Pos2);

    fn set_visible(&mut self, visible: bool);

    /// Draws the picker; returns the brush when the user commits a change.
    fn ui(&mut self, ui: &mut Ui) -> Option<Brush>;
}
