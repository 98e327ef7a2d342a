use egui::{Color32, ColorImage, Context, Event, Key, Modifiers, RawInput, Rect, pos2};
use photo_editor::editor::SharedSettings;
use photo_editor::event::EventReceiver;
use photo_editor::{Action, AppSettings, ControlRequest, EditorMode, Mode, Photo, PhotoEditor, PhotoModifications};
use std::cell::RefCell;
use std::rc::Rc;

const SCREEN: Rect = Rect {
    min: pos2(0.0, 0.0),
    max: pos2(800.0, 600.0),
};

const PAINT: EditorMode = EditorMode::new(Mode::Paint, Action::None);
const PAINT_SAVED: EditorMode = EditorMode::new(Mode::Transform, Action::Save);
const PAINT_DISCARDED: EditorMode = EditorMode::new(Mode::Transform, Action::Discard);

/// A real editor hosted in a windowless egui context
struct Harness {
    ctx: Context,
    editor: PhotoEditor,
    done: EventReceiver<PhotoModifications>,
    cancel: EventReceiver<()>,
}

impl Harness {
    fn painting() -> Self {
        let photo = Photo::from_color_image("gray", ColorImage::new([64, 48], Color32::GRAY))
            .expect("photo is not empty");
        let settings: SharedSettings = Rc::new(RefCell::new(AppSettings::default()));
        let mut editor = PhotoEditor::new(photo, PhotoModifications::default(), settings);
        let done = editor.done_requests();
        let cancel = editor.cancel_requests();
        editor.handle_request(ControlRequest::PaintMode);

        let mut harness = Self {
            ctx: Context::default(),
            editor,
            done,
            cancel,
        };
        harness.frame(Vec::new());
        harness
    }

    fn frame(&mut self, events: Vec<Event>) {
        let input = RawInput {
            screen_rect: Some(SCREEN),
            events,
            ..Default::default()
        };
        let editor = &mut self.editor;
        let _ = self.ctx.run(input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| editor.ui(ui));
        });
    }

    fn press(&mut self, key: Key) {
        let events = [true, false]
            .into_iter()
            .map(|pressed| Event::Key {
                key,
                physical_key: None,
                pressed,
                repeat: false,
                modifiers: Modifiers::NONE,
            })
            .collect();
        self.frame(events);
    }

    fn done_fired(&mut self) -> bool {
        self.done.try_recv().is_ok()
    }

    fn cancel_fired(&mut self) -> bool {
        self.cancel.try_recv().is_ok()
    }
}

#[test]
fn test_enter_finishes_painting_before_saving() {
    let mut harness = Harness::painting();

    harness.press(Key::Enter);
    assert_eq!(harness.editor.mode(), PAINT_SAVED);
    assert!(!harness.done_fired());

    harness.press(Key::Enter);
    assert!(harness.done_fired());
    assert!(!harness.done_fired());
}

#[test]
fn test_escape_discards_painting_then_cancels() {
    let mut harness = Harness::painting();

    harness.press(Key::Escape);
    assert_eq!(harness.editor.mode(), PAINT_DISCARDED);
    assert!(!harness.cancel_fired());

    harness.press(Key::Escape);
    assert!(harness.cancel_fired());
    assert!(!harness.done_fired());
}

#[test]
fn test_enter_on_focused_widget_sends_one_request() {
    let mut modes = Vec::new();

    for tabs in 1..=4 {
        let mut harness = Harness::painting();
        for _ in 0..tabs {
            harness.press(Key::Tab);
        }
        harness.press(Key::Enter);

        let mode = harness.editor.mode();
        assert!(
            [PAINT, PAINT_SAVED, PAINT_DISCARDED].contains(&mode),
            "tabs={} mode={:?}",
            tabs,
            mode
        );
        assert!(!harness.done_fired(), "tabs={} fired done", tabs);
        assert!(!harness.cancel_fired(), "tabs={} fired cancel", tabs);
        modes.push(mode);
    }

    // Both the Cancel and the Done buttons were reached and activated
    assert!(modes.contains(&PAINT_SAVED));
    assert!(modes.contains(&PAINT_DISCARDED));
}

#[test]
fn test_angle_from_caller_is_snapped() {
    let photo = Photo::from_color_image("gray", ColorImage::new([8, 8], Color32::GRAY))
        .expect("photo is not empty");
    let settings: SharedSettings = Rc::new(RefCell::new(AppSettings::default()));
    let modifications = PhotoModifications {
        angle: 45,
        ..Default::default()
    };

    let mut editor = PhotoEditor::new(photo, modifications, settings);
    assert_eq!(editor.modifications().angle, 90);

    editor.handle_request(ControlRequest::Rotate);
    assert_eq!(editor.modifications().angle, 180);
}
