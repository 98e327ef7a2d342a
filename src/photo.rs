use egui::{ColorImage, Vec2};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("Failed to read photo: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode photo: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Photo has no pixels")]
    Empty,
}

pub type PhotoResult<T> = Result<T, PhotoError>;

/// Decoded photo shown by the editor canvas.
#[derive(Clone)]
pub struct Photo {
    name: String,
    image: Arc<ColorImage>,
}

impl std::fmt::Debug for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Photo")
            .field("name", &self.name)
            .field("size", &self.image.size)
            .finish()
    }
}

impl Photo {
    pub fn from_color_image(name: impl Into<String>, image: ColorImage) -> PhotoResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PhotoError::Empty);
        }
        Ok(Self {
            name: name.into(),
            image: Arc::new(image),
        })
    }

    /// Decode any format the `image` crate understands.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> PhotoResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        log::debug!("Decoded photo: {}x{}", decoded.width(), decoded.height());

        let rgba = decoded.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, rgba.as_flat_samples().as_slice());
        Self::from_color_image(name, image)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open(path: &std::path::Path) -> PhotoResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(path.display().to_string(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn size(&self) -> Vec2 {
        let [width, height] = self.image.size;
        egui::vec2(width as f32, height as f32)
    }
}
