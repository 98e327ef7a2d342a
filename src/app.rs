use crate::editor::PhotoEditor;
use crate::event::EventReceiver;
use crate::file_handler::FileHandler;
use crate::modifications::PhotoModifications;
use crate::photo::Photo;
use crate::settings::{AppSettings, SETTINGS_KEY};
use crate::util::time;
use std::cell::RefCell;
use std::rc::Rc;

/// An open editor and the receivers for its outcome.
struct EditorSession {
    photo: Photo,
    editor: PhotoEditor,
    done: EventReceiver<PhotoModifications>,
    cancel: EventReceiver<()>,
}

impl EditorSession {
    fn open(photo: Photo, modifications: PhotoModifications, settings: Rc<RefCell<AppSettings>>) -> Self {
        log::info!("Opening photo editor for {}", photo.name());
        let editor = PhotoEditor::new(photo.clone(), modifications, settings);
        let done = editor.done_requests();
        let cancel = editor.cancel_requests();
        Self {
            photo,
            editor,
            done,
            cancel,
        }
    }
}

enum Screen {
    Empty,
    Editing(Box<EditorSession>),
    Edited {
        photo: Photo,
        modifications: PhotoModifications,
    },
}

/// Hosts a single photo editor and owns the persisted settings.
pub struct PhotoEditorApp {
    settings: Rc<RefCell<AppSettings>>,
    screen: Screen,
    file_handler: FileHandler,
    error: Option<String>,
}

impl PhotoEditorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, photo: Option<Photo>) -> Self {
        let settings: AppSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();

        let mut app = Self {
            settings: Rc::new(RefCell::new(settings)),
            screen: Screen::Empty,
            file_handler: FileHandler::new(),
            error: None,
        };
        if let Some(photo) = photo {
            app.open(photo, PhotoModifications::default());
        }
        app
    }

    fn open(&mut self, photo: Photo, modifications: PhotoModifications) {
        self.error = None;
        self.screen = Screen::Editing(Box::new(EditorSession::open(
            photo,
            modifications,
            self.settings.clone(),
        )));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.file_handler.preview_files_being_dropped(ctx);
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        match self.file_handler.take_dropped_photo() {
            Some(Ok(photo)) => self.open(photo, PhotoModifications::default()),
            Some(Err(err)) => {
                log::error!("{}", err);
                self.error = Some(err.to_string());
            }
            None => {}
        }
    }

    /// Closes the editor once it reported done or cancel.
    fn poll_session(&mut self) {
        let Screen::Editing(session) = &mut self.screen else {
            return;
        };

        let next = if let Ok(modifications) = session.done.try_recv() {
            Some(Screen::Edited {
                photo: session.photo.clone(),
                modifications,
            })
        } else if let Ok(()) = session.cancel.try_recv() {
            Some(Screen::Empty)
        } else {
            None
        };

        if let Some(next) = next {
            self.screen = next;
        }
    }

    fn flush_settings_if_due(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let now = time::current_time_secs();
        let due = self.settings.borrow_mut().take_due_save(now);
        if due {
            if let Some(storage) = frame.storage_mut() {
                eframe::set_value(storage, SETTINGS_KEY, &*self.settings.borrow());
                storage.flush();
                log::debug!("Settings saved");
            }
        } else if let Some(wait) = self.settings.borrow().save_due_in(now) {
            ctx.request_repaint_after(std::time::Duration::from_secs_f64(wait));
        }
    }
}

impl eframe::App for PhotoEditorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &*self.settings.borrow());
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        let mut reopen = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_gray(20)))
            .show(ctx, |ui| match &mut self.screen {
                Screen::Editing(session) => session.editor.ui(ui),
                Screen::Edited {
                    photo,
                    modifications,
                } => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(photo.name());
                        ui.label(format!(
                            "Rotation: {}°, flipped: {}, strokes: {}",
                            modifications.angle,
                            modifications.flipped,
                            modifications.paint.as_ref().map_or(0, |paint| paint.strokes().len()),
                        ));
                        if ui.button("Edit again").clicked() {
                            reopen = Some((photo.clone(), modifications.clone()));
                        }
                    });
                }
                Screen::Empty => {
                    ui.centered_and_justified(|ui| {
                        ui.label(self.error.as_deref().unwrap_or("Drop a photo here to edit it"));
                    });
                }
            });

        if let Some((photo, modifications)) = reopen {
            self.open(photo, modifications);
        }
        self.poll_session();
        self.flush_settings_if_due(ctx, frame);
    }
}
