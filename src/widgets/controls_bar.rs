use super::Controls;
use crate::components::IconButton;
use crate::mode::{ControlRequest, EditorMode};
use crate::undo::{SharedUndoController, UndoCommand};
use egui::{Rect, Ui, pos2, vec2};

const BUTTON_SIZE: f32 = 40.0;
const BUTTON_SPACING: f32 = 12.0;
const TEXT_BUTTON_WIDTH: f32 = 80.0;
/// Space above the button row, kept free for the color picker line.
pub const BUTTONS_TOP_SKIP: f32 = 40.0;

/// Toolbar with cancel/done on the sides and mode-specific icons in between.
pub struct ControlsBar {
    rect: Rect,
    mode: EditorMode,
    undo: SharedUndoController,
}

impl ControlsBar {
    pub fn new(undo: SharedUndoController) -> Self {
        Self {
            rect: Rect::NOTHING,
            mode: EditorMode::default(),
            undo,
        }
    }

    fn buttons_row(&self) -> Rect {
        let top = (self.rect.top() + BUTTONS_TOP_SKIP).min(self.rect.bottom());
        Rect::from_min_max(pos2(self.rect.left(), top), self.rect.max)
    }

    /// Cancel and Done, on the left and right ends of `row`.
    fn text_button_rects(row: Rect) -> (Rect, Rect) {
        let size = vec2(TEXT_BUTTON_WIDTH, BUTTON_SIZE);
        let offset = TEXT_BUTTON_WIDTH / 2.0 + BUTTON_SPACING;
        (
            Rect::from_center_size(pos2(row.left() + offset, row.center().y), size),
            Rect::from_center_size(pos2(row.right() - offset, row.center().y), size),
        )
    }
}

/// Square rects for `count` icons centered in `row`.
pub fn icon_rects(row: Rect, count: usize) -> Vec<Rect> {
    let total = count as f32 * BUTTON_SIZE + count.saturating_sub(1) as f32 * BUTTON_SPACING;
    let left = row.center().x - total / 2.0;
    (0..count)
        .map(|i| {
            let x = left + i as f32 * (BUTTON_SIZE + BUTTON_SPACING);
            Rect::from_min_size(pos2(x, row.center().y - BUTTON_SIZE / 2.0), vec2(BUTTON_SIZE, BUTTON_SIZE))
        })
        .collect()
}

impl Controls for ControlsBar {
    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn apply_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    fn ui(&mut self, ui: &mut Ui) -> Option<ControlRequest> {
        if self.rect.width() <= 0.0 || self.rect.height() <= 0.0 {
            return None;
        }
        ui.painter().rect_filled(self.rect, 0.0, egui::Color32::from_gray(15));

        let row = self.buttons_row();
        let id = ui.id().with("photo_editor_controls");
        let mut request = None;

        let (cancel_rect, done_rect) = Self::text_button_rects(row);

        if ui.put(cancel_rect, egui::Button::new("Cancel").frame(false)).clicked() {
            request = Some(ControlRequest::Cancel);
        }
        if ui.put(done_rect, egui::Button::new("Done").frame(false)).clicked() {
            request = Some(ControlRequest::Done);
        }

        if self.mode.is_paint() {
            let rects = icon_rects(row, 2);
            let undo = IconButton::new("⟲").enabled(self.undo.can_undo());
            if undo.show_at(ui, rects[0], id.with("undo")).clicked() {
                self.undo.request(UndoCommand::Undo);
            }
            let redo = IconButton::new("⟳").enabled(self.undo.can_redo());
            if redo.show_at(ui, rects[1], id.with("redo")).clicked() {
                self.undo.request(UndoCommand::Redo);
            }
        } else {
            let buttons = [
                ("↻", "rotate", ControlRequest::Rotate),
                ("⇄", "flip", ControlRequest::Flip),
                ("✏", "paint", ControlRequest::PaintMode),
            ];
            for ((icon, name, button_request), rect) in buttons.into_iter().zip(icon_rects(row, 3)) {
                if IconButton::new(icon).show_at(ui, rect, id.with(name)).clicked() {
                    request = Some(button_request);
                }
            }
        }

        if let Some(request) = request {
            log::debug!("Controls request: {:?}", request);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::undo::UndoController;
    use crate::util::headless::{self, click_frames, key_press};
    use egui::{Context, Event, Key, Pos2};

    #[test]
    fn test_icon_rects_are_centered() {
        let row = Rect::from_min_size(pos2(0.0, 40.0), vec2(400.0, 56.0));
        let rects = icon_rects(row, 3);

        assert_eq!(rects.len(), 3);
        assert_eq!(rects[1].center(), row.center());
        assert_eq!(rects[1].left() - rects[0].right(), BUTTON_SPACING);
        assert_eq!(rects[0].left() - row.left(), row.right() - rects[2].right());
    }

    #[test]
    fn test_buttons_row_leaves_room_for_picker() {
        let mut controls = ControlsBar::new(UndoController::new());
        controls.set_geometry(Rect::from_min_size(pos2(0.0, 300.0), vec2(400.0, 96.0)));

        let row = controls.buttons_row();
        assert_eq!(row.top(), 340.0);
        assert_eq!(row.bottom(), 396.0);
    }

    /// Controls laid out along the bottom of the test screen.
    fn bottom_controls(undo: SharedUndoController, mode: EditorMode) -> ControlsBar {
        let mut controls = ControlsBar::new(undo);
        let screen = headless::SCREEN;
        controls.set_geometry(Rect::from_min_max(pos2(screen.left(), screen.bottom() - 96.0), screen.max));
        controls.apply_mode(mode);
        controls
    }

    fn run(ctx: &Context, controls: &mut ControlsBar, frames: Vec<Vec<Event>>) -> Vec<ControlRequest> {
        let mut requests = Vec::new();
        for events in frames {
            headless::run_frame(ctx, events, |ui| requests.extend(controls.ui(ui)));
        }
        requests
    }

    fn click(ctx: &Context, controls: &mut ControlsBar, pos: Pos2) -> Vec<ControlRequest> {
        // First frame registers the widgets for hit testing
        let mut frames = vec![Vec::new()];
        frames.extend(click_frames(pos));
        run(ctx, controls, frames)
    }

    #[test]
    fn test_transform_buttons_send_requests() {
        let mode = EditorMode::default();
        let undo = UndoController::new();
        let mut controls = bottom_controls(undo, mode);
        let row = controls.buttons_row();
        let (cancel, done) = ControlsBar::text_button_rects(row);
        let icons = icon_rects(row, 3);

        let expected = [
            (cancel.center(), ControlRequest::Cancel),
            (icons[0].center(), ControlRequest::Rotate),
            (icons[1].center(), ControlRequest::Flip),
            (icons[2].center(), ControlRequest::PaintMode),
            (done.center(), ControlRequest::Done),
        ];
        for (pos, request) in expected {
            let ctx = Context::default();
            assert_eq!(click(&ctx, &mut controls, pos), vec![request], "click at {:?}", pos);
        }
    }

    #[test]
    fn test_paint_buttons_route_undo_to_controller() {
        let undo = UndoController::new();
        let mut commands = undo.commands();
        let paint = EditorMode::new(crate::mode::Mode::Paint, crate::mode::Action::None);
        let mut controls = bottom_controls(undo.clone(), paint);
        let icons = icon_rects(controls.buttons_row(), 2);

        // Nothing to undo yet, the button is disabled
        let ctx = Context::default();
        assert!(click(&ctx, &mut controls, icons[0].center()).is_empty());
        assert!(commands.try_recv().is_err());

        undo.set_state(true, true);
        for (rect, command) in icons.iter().zip([UndoCommand::Undo, UndoCommand::Redo]) {
            let ctx = Context::default();
            assert!(click(&ctx, &mut controls, rect.center()).is_empty());
            assert_eq!(commands.try_recv(), Ok(command));
        }

        // Rotate and flip are not offered while painting
        let (cancel, done) = ControlsBar::text_button_rects(controls.buttons_row());
        let ctx = Context::default();
        assert_eq!(click(&ctx, &mut controls, cancel.center()), vec![ControlRequest::Cancel]);
        let ctx = Context::default();
        assert_eq!(click(&ctx, &mut controls, done.center()), vec![ControlRequest::Done]);
    }

    #[test]
    fn test_enter_activates_focused_button() {
        let ctx = Context::default();
        let mut controls = bottom_controls(UndoController::new(), EditorMode::default());

        // Cancel is the first focusable widget
        let requests = run(
            &ctx,
            &mut controls,
            vec![Vec::new(), key_press(Key::Tab), key_press(Key::Enter)],
        );
        assert_eq!(requests, vec![ControlRequest::Cancel]);
    }
}
