use crate::photo::{Photo, PhotoError, PhotoResult};
use eframe::egui;

/// Turns files dropped onto the window into photos.
#[derive(Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process any newly dropped files from the UI context
    /// Returns true if any new files were collected
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;

        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });

        new_dropped_files
    }

    /// Load the first dropped image; other files are skipped with a warning.
    pub fn take_dropped_photo(&mut self) -> Option<PhotoResult<Photo>> {
        let files = std::mem::take(&mut self.dropped_files);
        let mut photo = None;

        for file in &files {
            let file_name = file_name(file);
            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }
            if photo.is_some() {
                log::warn!("Only one photo can be edited at a time, skipping {}", file_name);
                continue;
            }
            photo = Some(load_dropped_file(file, file_name));
        }

        photo
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop a photo to edit it",
            egui::FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(ext) = file.path.as_ref().and_then(|path| path.extension()) {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    } else {
        // Web drops carry neither mime nor path for some browsers
        file.bytes.is_some()
    }
}

fn load_dropped_file(file: &egui::DroppedFile, file_name: String) -> PhotoResult<Photo> {
    if let Some(bytes) = &file.bytes {
        log::info!("Loading photo from memory: {} ({} bytes)", file_name, bytes.len());
        return Photo::from_bytes(file_name, bytes);
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        log::info!("Loading photo from path: {}", path.display());
        return Photo::open(path);
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    Err(PhotoError::Read(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("no data for {}", file_name),
    )))
}
