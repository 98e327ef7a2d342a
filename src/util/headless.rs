//! Runs egui frames without a window so widgets can be driven from tests.

use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, RawInput, Rect, Ui, pos2};

pub const SCREEN: Rect = Rect {
    min: pos2(0.0, 0.0),
    max: pos2(800.0, 600.0),
};

/// One frame with `events`, `add_contents` filling the whole screen.
pub fn run_frame(ctx: &Context, events: Vec<Event>, mut add_contents: impl FnMut(&mut Ui)) {
    let input = RawInput {
        screen_rect: Some(SCREEN),
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| add_contents(ui));
    });
}

/// Press and release of `key` within one frame.
pub fn key_press(key: Key) -> Vec<Event> {
    [true, false]
        .into_iter()
        .map(|pressed| Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers: Modifiers::NONE,
        })
        .collect()
}

pub fn pointer_button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

/// Frames of a primary click at `pos`: hover, press, release.
pub fn click_frames(pos: Pos2) -> Vec<Vec<Event>> {
    vec![
        vec![Event::PointerMoved(pos)],
        vec![pointer_button(pos, true)],
        vec![pointer_button(pos, false)],
    ]
}

/// Frames of a primary drag through `path`.
pub fn drag_frames(path: &[Pos2]) -> Vec<Vec<Event>> {
    let Some((first, rest)) = path.split_first() else {
        return Vec::new();
    };
    let mut frames = vec![vec![Event::PointerMoved(*first)], vec![pointer_button(*first, true)]];
    frames.extend(rest.iter().map(|pos| vec![Event::PointerMoved(*pos)]));
    let last = path.last().copied().unwrap_or(*first);
    frames.push(vec![pointer_button(last, false)]);
    frames
}
