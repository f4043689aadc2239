//! Photo loading: decode an image file into an [`egui::ColorImage`] ready to
//! be uploaded as a GPU texture.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("failed to load photo {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decode the image at `path` (any format the `image` crate supports) into
/// RGBA pixels.
pub fn load_photo(path: &Path) -> Result<egui::ColorImage, PhotoError> {
    let img = image::open(path).map_err(|source| PhotoError::Load {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_raw(),
    ))
}
