use crate::brush::{self, Brush};
use crate::event::{EventReceiver, EventStream};
use crate::mode::{ControlRequest, EditorMode, Transition};
use crate::modifications::PhotoModifications;
use crate::photo::Photo;
use crate::settings::SettingsStore;
use crate::undo::{SharedUndoController, UndoController};
use crate::widgets::{Canvas, ColorPicker, Controls, ControlsBar, GradientColorPicker, PhotoCanvas};
use egui::{Key, Modifiers, Pos2, Rect, Ui, pos2};
use std::cell::RefCell;
use std::rc::Rc;

/// Height of the controls strip under the canvas.
pub const CONTROLS_HEIGHT: f32 = 96.0;
/// Distance from the top of the controls to the color picker line.
pub const COLOR_PICKER_TOP_SKIP: f32 = 20.0;

pub type SharedSettings = Rc<RefCell<dyn SettingsStore>>;

/// Where the editor puts its children for a given geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorLayout {
    pub content: Rect,
    pub controls: Rect,
    pub color_picker_line: Pos2,
}

impl EditorLayout {
    pub fn compute(geometry: Rect) -> Self {
        let content_bottom = (geometry.bottom() - CONTROLS_HEIGHT).max(geometry.top());
        let content = Rect::from_min_max(geometry.min, pos2(geometry.right(), content_bottom));
        let controls = Rect::from_min_max(pos2(geometry.left(), content_bottom), geometry.max);

        Self {
            content,
            controls,
            color_picker_line: pos2(
                controls.center().x,
                controls.top() + COLOR_PICKER_TOP_SKIP,
            ),
        }
    }
}

/// Photo editor: canvas, controls and color picker wired to the
/// transform/paint mode machine.
///
/// Results are reported through [`PhotoEditor::done_requests`] and
/// [`PhotoEditor::cancel_requests`]; the owner is expected to close the editor
/// when either fires.
pub struct PhotoEditor {
    modifications: PhotoModifications,
    mode: EditorMode,
    geometry: Option<Rect>,
    undo: SharedUndoController,
    canvas: Box<dyn Canvas>,
    controls: Box<dyn Controls>,
    color_picker: Box<dyn ColorPicker>,
    settings: SharedSettings,
    done: EventStream<PhotoModifications>,
    cancel: EventStream<()>,
}

impl PhotoEditor {
    /// Editor built from the egui widgets of this crate.
    pub fn new(photo: Photo, modifications: PhotoModifications, settings: SharedSettings) -> Self {
        Self::with_widgets(
            modifications,
            settings,
            |undo, modifications| Box::new(PhotoCanvas::new(photo, modifications, undo)),
            |undo| Box::new(ControlsBar::new(undo)),
            |brush| Box::new(GradientColorPicker::new(brush)),
        )
    }

    /// Editor built from custom children.
    ///
    /// The color picker factory receives the brush decoded from the settings.
    pub fn with_widgets(
        mut modifications: PhotoModifications,
        settings: SharedSettings,
        canvas: impl FnOnce(SharedUndoController, &PhotoModifications) -> Box<dyn Canvas>,
        controls: impl FnOnce(SharedUndoController) -> Box<dyn Controls>,
        color_picker: impl FnOnce(Brush) -> Box<dyn ColorPicker>,
    ) -> Self {
        let requested_angle = modifications.angle;
        modifications.normalize_angle();
        if modifications.angle != requested_angle {
            log::warn!(
                "Photo editor angle {} snapped to {}",
                requested_angle,
                modifications.angle
            );
        }

        let undo = UndoController::new();
        let canvas = canvas(undo.clone(), &modifications);
        let controls = controls(undo.clone());

        let saved = brush::deserialize(&settings.borrow().photo_editor_brush());
        let color_picker = color_picker(saved);

        let mut editor = Self {
            modifications,
            mode: EditorMode::default(),
            geometry: None,
            undo,
            canvas,
            controls,
            color_picker,
            settings,
            done: EventStream::new(),
            cancel: EventStream::new(),
        };
        editor.canvas.apply_brush(editor.color_picker.brush());
        editor.apply_mode();
        editor
    }

    pub fn modifications(&self) -> &PhotoModifications {
        &self.modifications
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn undo_controller(&self) -> &SharedUndoController {
        &self.undo
    }

    /// Fires a snapshot of the modifications once the user is done.
    pub fn done_requests(&self) -> EventReceiver<PhotoModifications> {
        self.done.events()
    }

    /// Fires when the user cancels out of transform mode.
    pub fn cancel_requests(&self) -> EventReceiver<()> {
        self.cancel.events()
    }

    /// Lay out the children inside `geometry`. Empty or unchanged geometry is
    /// ignored.
    pub fn set_geometry(&mut self, geometry: Rect) {
        if geometry.width() <= 0.0 || geometry.height() <= 0.0 {
            return;
        }
        if self.geometry == Some(geometry) {
            return;
        }
        self.geometry = Some(geometry);

        let layout = EditorLayout::compute(geometry);
        self.canvas.set_geometry(layout.content);
        self.controls.set_geometry(layout.controls);
        self.color_picker.move_line(layout.color_picker_line);
    }

    pub fn handle_request(&mut self, request: ControlRequest) {
        match self.mode.transition(request) {
            Transition::SetMode(mode) => self.set_mode(mode),
            Transition::Save => self.save(),
            Transition::Cancel => {
                log::info!("Photo editor cancelled");
                self.cancel.fire(());
            }
            Transition::Rotate => {
                self.modifications.rotate();
                self.canvas.apply_modifications(&self.modifications);
            }
            Transition::Flip => {
                self.modifications.flip();
                self.canvas.apply_modifications(&self.modifications);
            }
        }
    }

    /// The color picker committed a brush.
    pub fn handle_brush_saved(&mut self, brush: Brush) {
        self.canvas.apply_brush(brush);

        let serialized = brush::serialize(&brush);
        let mut settings = self.settings.borrow_mut();
        if settings.photo_editor_brush() != serialized {
            settings.set_photo_editor_brush(serialized);
            settings.save_settings_delayed();
        }
    }

    /// Runs one frame of the editor inside the available space of `ui`.
    ///
    /// At most one control request is handled per frame. Escape and Enter map
    /// to Cancel and Done only when the controls stayed idle and no widget has
    /// keyboard focus, since a focused button already treats Enter as a click.
    pub fn ui(&mut self, ui: &mut Ui) {
        self.set_geometry(ui.available_rect_before_wrap());

        self.canvas.ui(ui);
        let mut request = self.controls.ui(ui);
        if let Some(brush) = self.color_picker.ui(ui) {
            self.handle_brush_saved(brush);
        }

        if request.is_none() {
            request = shortcut_request(ui);
        }
        if let Some(request) = request {
            self.handle_request(request);
        }
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        log::debug!("Photo editor mode: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.apply_mode();
    }

    fn apply_mode(&mut self) {
        self.canvas.apply_mode(self.mode);
        self.controls.apply_mode(self.mode);
        self.color_picker.set_visible(self.mode.is_paint());
    }

    fn save(&mut self) {
        self.canvas.save(&mut self.modifications);
        log::info!("Photo editor done: {:?}", self.modifications);
        self.done.fire(self.modifications.clone());
    }
}

fn shortcut_request(ui: &Ui) -> Option<ControlRequest> {
    if ui.memory(|memory| memory.focused().is_some()) {
        return None;
    }
    ui.input_mut(|input| {
        if input.consume_key(Modifiers::NONE, Key::Escape) {
            Some(ControlRequest::Cancel)
        } else if input.consume_key(Modifiers::NONE, Key::Enter) {
            Some(ControlRequest::Done)
        } else {
            None
        }
    })
}
