#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod components;
pub mod editor;
pub mod event;
pub mod file_handler;
pub mod history;
pub mod mode;
pub mod modifications;
pub mod photo;
pub mod settings;
pub mod stroke;
pub mod undo;
pub mod util;
pub mod widgets;

pub use app::PhotoEditorApp;
pub use brush::Brush;
pub use editor::{EditorLayout, PhotoEditor};
pub use event::EventStream;
pub use mode::{Action, ControlRequest, EditorMode, Mode};
pub use modifications::{PaintLayer, PhotoModifications};
pub use photo::{Photo, PhotoError};
pub use settings::{AppSettings, SettingsStore};
pub use stroke::Stroke;
pub use undo::{UndoCommand, UndoController};
