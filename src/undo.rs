use crate::event::{EventReceiver, EventStream};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoCommand {
    Undo,
    Redo,
}

/// Handle shared by the controls bar and the canvas.
pub type SharedUndoController = Rc<UndoController>;

/// Relays undo/redo requests from the controls to the canvas and reports the
/// canvas history state back to the controls.
///
/// Only the command interface mutates it; neither side sees the other.
#[derive(Debug, Default)]
pub struct UndoController {
    commands: EventStream<UndoCommand>,
    can_undo: Cell<bool>,
    can_redo: Cell<bool>,
}

impl UndoController {
    pub fn new() -> SharedUndoController {
        Rc::new(Self::default())
    }

    /// Ask the history owner to undo or redo.
    pub fn request(&self, command: UndoCommand) {
        let allowed = match command {
            UndoCommand::Undo => self.can_undo.get(),
            UndoCommand::Redo => self.can_redo.get(),
        };
        if allowed {
            self.commands.fire(command);
        } else {
            log::debug!("Ignoring {:?} with nothing to apply", command);
        }
    }

    /// Stream of commands for the history owner.
    pub fn commands(&self) -> EventReceiver<UndoCommand> {
        self.commands.events()
    }

    pub fn set_state(&self, can_undo: bool, can_redo: bool) {
        self.can_undo.set(can_undo);
        self.can_redo.set(can_redo);
    }

    pub fn can_undo(&self) -> bool {
        self.can_undo.get()
    }

    pub fn can_redo(&self) -> bool {
        self.can_redo.get()
    }
}
