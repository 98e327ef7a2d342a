use super::Canvas;
use crate::brush::Brush;
use crate::event::EventReceiver;
use crate::history::StrokeHistory;
use crate::mode::{Action, EditorMode, Mode};
use crate::modifications::PhotoModifications;
use crate::photo::Photo;
use crate::stroke::MutableStroke;
use crate::undo::{SharedUndoController, UndoCommand};
use egui::epaint::Vertex;
use egui::{Color32, Mesh, Pos2, Rect, Sense, Shape, TextureHandle, TextureOptions, Ui, Vec2, pos2, vec2};

/// Stroke thickness range, as a fraction of the photo's shorter side.
const MIN_BRUSH_THICKNESS: f32 = 0.005;
const MAX_BRUSH_THICKNESS: f32 = 0.05;

/// Maps normalized photo coordinates to the screen and back.
///
/// The photo is mirrored horizontally first (when flipped) and then rotated
/// clockwise, and fitted into the viewport keeping its aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    rect: Rect,
    angle: i32,
    flipped: bool,
}

impl DisplayTransform {
    pub fn fit(viewport: Rect, photo_size: Vec2, modifications: &PhotoModifications) -> Self {
        let shown = if modifications.is_sideways() {
            vec2(photo_size.y, photo_size.x)
        } else {
            photo_size
        };
        let scale = if shown.x > 0.0 && shown.y > 0.0 {
            (viewport.width() / shown.x).min(viewport.height() / shown.y).max(0.0)
        } else {
            0.0
        };

        Self {
            rect: Rect::from_center_size(viewport.center(), shown * scale),
            angle: modifications.angle.rem_euclid(360),
            flipped: modifications.flipped,
        }
    }

    /// Screen rect covered by the photo.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn to_screen(&self, photo: Pos2) -> Pos2 {
        self.rect.lerp_inside(self.to_display(photo).to_vec2())
    }

    pub fn to_photo(&self, screen: Pos2) -> Pos2 {
        let size = self.rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return Pos2::ZERO;
        }
        self.from_display(((screen - self.rect.min) / size).to_pos2())
    }

    /// Screen length of a thickness given relative to the photo's shorter side.
    pub fn to_screen_thickness(&self, thickness: f32) -> f32 {
        thickness * self.rect.width().min(self.rect.height())
    }

    fn to_display(&self, photo: Pos2) -> Pos2 {
        let u = if self.flipped { 1.0 - photo.x } else { photo.x };
        let v = photo.y;
        match self.angle {
            90 => pos2(1.0 - v, u),
            180 => pos2(1.0 - u, 1.0 - v),
            270 => pos2(v, 1.0 - u),
            _ => pos2(u, v),
        }
    }

    fn from_display(&self, display: Pos2) -> Pos2 {
        let (u, v) = match self.angle {
            90 => (display.y, 1.0 - display.x),
            180 => (1.0 - display.x, 1.0 - display.y),
            270 => (1.0 - display.y, display.x),
            _ => (display.x, display.y),
        };
        pos2(if self.flipped { 1.0 - u } else { u }, v)
    }
}

/// egui canvas that shows the photo and lets the user paint over it.
pub struct PhotoCanvas {
    photo: Photo,
    texture: Option<TextureHandle>,
    rect: Rect,
    modifications: PhotoModifications,
    mode: EditorMode,
    brush: Brush,
    history: StrokeHistory,
    current_stroke: Option<MutableStroke>,
    undo: SharedUndoController,
    undo_commands: EventReceiver<UndoCommand>,
}

impl PhotoCanvas {
    pub fn new(photo: Photo, modifications: &PhotoModifications, undo: SharedUndoController) -> Self {
        let undo_commands = undo.commands();
        let canvas = Self {
            photo,
            texture: None,
            rect: Rect::NOTHING,
            modifications: modifications.clone(),
            mode: EditorMode::default(),
            brush: Brush::default(),
            history: StrokeHistory::from_layer(modifications.paint.as_ref()),
            current_stroke: None,
            undo,
            undo_commands,
        };
        canvas.sync_undo_state();
        canvas
    }

    pub fn transform(&self) -> DisplayTransform {
        DisplayTransform::fit(self.rect, self.photo.size(), &self.modifications)
    }

    /// Apply undo/redo requests queued by the controls.
    pub fn process_undo_commands(&mut self) {
        let mut changed = false;
        while let Ok(command) = self.undo_commands.try_recv() {
            changed |= self.history.apply(command);
        }
        if changed {
            self.sync_undo_state();
        }
    }

    /// Begin or extend the current stroke at a normalized photo position.
    pub fn stroke_to(&mut self, photo: Pos2) {
        let point = pos2(photo.x.clamp(0.0, 1.0), photo.y.clamp(0.0, 1.0));
        let thickness = self.brush_thickness();
        let color = self.brush.color;
        self.current_stroke
            .get_or_insert_with(|| MutableStroke::new(color, thickness))
            .add_point(point);
    }

    pub fn finish_stroke(&mut self) {
        if let Some(stroke) = self.current_stroke.take() {
            if !stroke.is_empty() {
                self.history.push(stroke.into_stroke_ref());
                self.sync_undo_state();
            }
        }
    }

    fn brush_thickness(&self) -> f32 {
        let t = self.brush.size_ratio.clamp(0.0, 1.0);
        egui::lerp(MIN_BRUSH_THICKNESS..=MAX_BRUSH_THICKNESS, t)
    }

    fn sync_undo_state(&self) {
        let painting = self.mode.mode == Mode::Paint;
        self.undo.set_state(
            painting && self.history.can_undo(),
            painting && self.history.can_redo(),
        );
    }

    fn handle_pointer(&mut self, ui: &Ui) {
        let sense = if self.mode.is_paint() {
            // Keyboard focus stays with the controls
            Sense {
                focusable: false,
                ..Sense::click_and_drag()
            }
        } else {
            Sense::hover()
        };
        let response = ui.interact(self.rect, ui.id().with("photo_canvas"), sense);
        if !self.mode.is_paint() {
            return;
        }

        let transform = self.transform();
        if let Some(pointer) = response.interact_pointer_pos() {
            if response.dragged() || response.drag_started() || response.clicked() {
                self.stroke_to(transform.to_photo(pointer));
            }
        }
        if response.drag_stopped() || response.clicked() {
            self.finish_stroke();
        }
    }

    fn paint(&mut self, ui: &Ui) {
        let painter = ui.painter_at(self.rect);
        painter.rect_filled(self.rect, 0.0, Color32::from_gray(20));

        let texture = self.texture.get_or_insert_with(|| {
            ui.ctx().load_texture(
                "photo_editor_photo",
                self.photo.image().clone(),
                TextureOptions::LINEAR,
            )
        });

        let transform = DisplayTransform::fit(self.rect, self.photo.size(), &self.modifications);
        let shown = transform.rect();
        let mut mesh = Mesh::with_texture(texture.id());
        for corner in [
            shown.left_top(),
            shown.right_top(),
            shown.right_bottom(),
            shown.left_bottom(),
        ] {
            mesh.vertices.push(Vertex {
                pos: corner,
                uv: transform.to_photo(corner),
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(mesh));

        for stroke in self.history.visible_strokes() {
            paint_stroke(&painter, &transform, stroke.points(), stroke.color(), stroke.thickness());
        }
        if let Some(stroke) = &self.current_stroke {
            paint_stroke(&painter, &transform, stroke.points(), stroke.color(), stroke.thickness());
        }
    }
}

fn paint_stroke(
    painter: &egui::Painter,
    transform: &DisplayTransform,
    points: &[Pos2],
    color: Color32,
    thickness: f32,
) {
    let width = transform.to_screen_thickness(thickness);
    let points: Vec<Pos2> = points.iter().map(|p| transform.to_screen(*p)).collect();
    match points.as_slice() {
        [] => {}
        [dot] => {
            painter.circle_filled(*dot, width / 2.0, color);
        }
        _ => {
            painter.add(Shape::line(points, egui::Stroke::new(width, color)));
        }
    }
}

impl Canvas for PhotoCanvas {
    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    fn apply_modifications(&mut self, modifications: &PhotoModifications) {
        self.modifications.angle = modifications.angle;
        self.modifications.flipped = modifications.flipped;
    }

    fn apply_mode(&mut self, mode: EditorMode) {
        // A stroke in progress belongs to the session being left
        self.current_stroke = None;

        match (mode.mode, mode.action) {
            (Mode::Transform, Action::Save) => self.history.commit(),
            (Mode::Transform, Action::Discard) => self.history.discard(),
            _ => {}
        }
        log::debug!("Canvas mode: {:?}", mode);

        self.mode = mode;
        self.sync_undo_state();
    }

    fn apply_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    fn save(&mut self, modifications: &mut PhotoModifications) {
        modifications.paint = self.history.committed_layer();
    }

    fn ui(&mut self, ui: &mut Ui) {
        if self.rect.width() <= 0.0 || self.rect.height() <= 0.0 {
            return;
        }
        self.process_undo_commands();
        self.handle_pointer(ui);
        self.paint(ui);
    }
}

impl std::fmt::Debug for PhotoCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoCanvas")
            .field("photo", &self.photo)
            .field("rect", &self.rect)
            .field("mode", &self.mode)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Stroke;
    use crate::undo::UndoController;
    use egui::ColorImage;

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 100.0))
    }

    fn assert_close(a: Pos2, b: Pos2) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    fn test_canvas() -> (PhotoCanvas, SharedUndoController) {
        let photo = Photo::from_color_image("gray", ColorImage::new([40, 20], Color32::GRAY)).unwrap();
        let undo = UndoController::new();
        let mut canvas = PhotoCanvas::new(photo, &PhotoModifications::default(), undo.clone());
        canvas.set_geometry(viewport());
        (canvas, undo)
    }

    fn visible(canvas: &PhotoCanvas) -> Vec<Stroke> {
        canvas.history.visible_strokes().map(|s| (**s).clone()).collect()
    }

    fn draw(canvas: &mut PhotoCanvas, x: f32) {
        canvas.stroke_to(pos2(x, 0.1));
        canvas.stroke_to(pos2(x, 0.9));
        canvas.finish_stroke();
    }

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        let transform = DisplayTransform::fit(viewport(), vec2(50.0, 100.0), &PhotoModifications::default());
        assert_eq!(transform.rect(), Rect::from_center_size(pos2(100.0, 50.0), vec2(50.0, 100.0)));

        let rotated = PhotoModifications {
            angle: 90,
            ..Default::default()
        };
        let transform = DisplayTransform::fit(viewport(), vec2(50.0, 100.0), &rotated);
        assert_eq!(transform.rect(), viewport());
    }

    #[test]
    fn test_rotation_moves_top_left_clockwise() {
        let mut modifications = PhotoModifications::default();

        // Where the photo's top-left corner ends up, relative to the shown rect
        for expected in [pos2(0.0, 0.0), pos2(1.0, 0.0), pos2(1.0, 1.0), pos2(0.0, 1.0)] {
            let transform = DisplayTransform::fit(viewport(), vec2(200.0, 100.0), &modifications);
            let rect = transform.rect();
            let relative = (transform.to_screen(Pos2::ZERO) - rect.min) / rect.size();
            assert_close(relative.to_pos2(), expected);
            modifications.rotate();
        }
    }

    #[test]
    fn test_flip_mirrors_horizontally() {
        let modifications = PhotoModifications {
            flipped: true,
            ..Default::default()
        };
        let transform = DisplayTransform::fit(viewport(), vec2(200.0, 100.0), &modifications);
        assert_close(transform.to_screen(pos2(0.0, 0.0)), pos2(200.0, 0.0));
        assert_close(transform.to_screen(pos2(1.0, 1.0)), pos2(0.0, 100.0));
    }

    #[test]
    fn test_to_photo_inverts_to_screen() {
        for angle in [0, 90, 180, 270] {
            for flipped in [false, true] {
                let modifications = PhotoModifications {
                    angle,
                    flipped,
                    ..Default::default()
                };
                let transform = DisplayTransform::fit(viewport(), vec2(40.0, 20.0), &modifications);
                let point = pos2(0.25, 0.75);
                assert_close(transform.to_photo(transform.to_screen(point)), point);
            }
        }
    }

    #[test]
    fn test_paint_session_save_commits() {
        let (mut canvas, undo) = test_canvas();
        canvas.apply_mode(EditorMode::new(Mode::Paint, Action::None));
        draw(&mut canvas, 0.2);
        assert!(undo.can_undo());

        canvas.apply_mode(EditorMode::new(Mode::Transform, Action::Save));
        assert!(!undo.can_undo());

        let mut modifications = PhotoModifications::default();
        canvas.save(&mut modifications);
        assert_eq!(modifications.paint.map(|layer| layer.strokes().len()), Some(1));
    }

    #[test]
    fn test_paint_session_discard_drops_strokes() {
        let (mut canvas, _undo) = test_canvas();
        canvas.apply_mode(EditorMode::new(Mode::Paint, Action::None));
        draw(&mut canvas, 0.2);
        canvas.stroke_to(pos2(0.5, 0.5));

        canvas.apply_mode(EditorMode::new(Mode::Transform, Action::Discard));
        assert!(visible(&canvas).is_empty());

        let mut modifications = PhotoModifications::default();
        canvas.save(&mut modifications);
        assert_eq!(modifications.paint, None);
    }

    #[test]
    fn test_undo_requests_reach_history() {
        let (mut canvas, undo) = test_canvas();
        canvas.apply_mode(EditorMode::new(Mode::Paint, Action::None));
        draw(&mut canvas, 0.2);
        draw(&mut canvas, 0.4);

        undo.request(UndoCommand::Undo);
        canvas.process_undo_commands();
        assert_eq!(visible(&canvas).len(), 1);
        assert!(undo.can_redo());

        undo.request(UndoCommand::Redo);
        canvas.process_undo_commands();
        assert_eq!(visible(&canvas).len(), 2);
        assert!(!undo.can_redo());
    }

    #[test]
    fn test_strokes_use_brush() {
        let (mut canvas, _undo) = test_canvas();
        canvas.apply_mode(EditorMode::new(Mode::Paint, Action::None));
        canvas.apply_brush(Brush::new(1.0, Color32::RED));
        canvas.stroke_to(pos2(1.5, -0.5));
        canvas.finish_stroke();

        let strokes = visible(&canvas);
        assert_eq!(strokes[0].color(), Color32::RED);
        assert_eq!(strokes[0].thickness(), MAX_BRUSH_THICKNESS);
        assert_eq!(strokes[0].points(), &[pos2(1.0, 0.0)]);
    }
}
