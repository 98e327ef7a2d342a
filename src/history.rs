use crate::modifications::PaintLayer;
use crate::stroke::StrokeRef;
use crate::undo::UndoCommand;

/// Stroke history of the paint layer.
///
/// Strokes drawn during a paint session stay pending, and undoable, until the
/// session is committed or discarded.
#[derive(Debug, Default)]
pub struct StrokeHistory {
    /// Strokes already baked into the photo
    committed: Vec<StrokeRef>,
    /// Strokes of the current session that can be undone
    undo_stack: Vec<StrokeRef>,
    /// Undone strokes that can be redone
    redo_stack: Vec<StrokeRef>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from strokes that were saved earlier.
    pub fn from_layer(layer: Option<&PaintLayer>) -> Self {
        Self {
            committed: layer.map(|layer| layer.strokes().to_vec()).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, stroke: StrokeRef) {
        self.undo_stack.push(stroke);
        self.redo_stack.clear(); // a new stroke invalidates the redo branch
    }

    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(stroke) => {
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                self.undo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, command: UndoCommand) -> bool {
        match command {
            UndoCommand::Undo => self.undo(),
            UndoCommand::Redo => self.redo(),
        }
    }

    /// Bakes the pending strokes; they can no longer be undone.
    pub fn commit(&mut self) {
        self.committed.append(&mut self.undo_stack);
        self.redo_stack.clear();
    }

    /// Drops everything drawn since the last commit.
    pub fn discard(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Committed strokes followed by pending ones, in drawing order.
    pub fn visible_strokes(&self) -> impl Iterator<Item = &StrokeRef> {
        self.committed.iter().chain(self.undo_stack.iter())
    }

    pub fn committed_layer(&self) -> Option<PaintLayer> {
        if self.committed.is_empty() {
            None
        } else {
            Some(PaintLayer::new(self.committed.clone()))
        }
    }
}
