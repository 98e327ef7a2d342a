#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Transform,
    Paint,
}

/// What the canvas should do with uncommitted paint when a mode is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    None,
    Save,
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorMode {
    pub mode: Mode,
    pub action: Action,
}

/// User gestures emitted by the controls bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Rotate,
    Flip,
    PaintMode,
    Done,
    Cancel,
}

/// Outcome of a control request, decided from the current mode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Switch to the given mode value.
    SetMode(EditorMode),
    /// Bake the modifications into the canvas and report them as done.
    Save,
    /// Ask the owner to close the editor without saving.
    Cancel,
    Rotate,
    Flip,
}

impl EditorMode {
    pub const fn new(mode: Mode, action: Action) -> Self {
        Self { mode, action }
    }

    pub fn is_paint(&self) -> bool {
        self.mode == Mode::Paint
    }

    pub fn transition(&self, request: ControlRequest) -> Transition {
        match (request, self.mode) {
            (ControlRequest::Rotate, _) => Transition::Rotate,
            (ControlRequest::Flip, _) => Transition::Flip,
            (ControlRequest::PaintMode, _) => {
                Transition::SetMode(Self::new(Mode::Paint, Action::None))
            }
            // Paint is committed by the canvas when it sees the Save action,
            // the actual save happens on the next Done in transform mode.
            (ControlRequest::Done, Mode::Paint) => {
                Transition::SetMode(Self::new(Mode::Transform, Action::Save))
            }
            (ControlRequest::Done, Mode::Transform) => Transition::Save,
            (ControlRequest::Cancel, Mode::Paint) => {
                Transition::SetMode(Self::new(Mode::Transform, Action::Discard))
            }
            (ControlRequest::Cancel, Mode::Transform) => Transition::Cancel,
        }
    }
}
