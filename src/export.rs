use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};

use crate::error::{CropError, Result};

/// File name for the `index`-th result (1-based).
pub fn output_file_name(index: usize) -> String {
    format!("cropped_image_{index}.png")
}

/// Write `images` into `dir` as `cropped_image_1.png`, `cropped_image_2.png`, ...
///
/// Stops at the first failed write; files after it are not attempted.
pub fn save_pngs<'a, I>(dir: &Path, images: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = &'a DynamicImage>,
{
    if dir.as_os_str().is_empty() {
        return Err(CropError::NoDirectory);
    }

    let mut written = Vec::new();
    for (i, image) in images.into_iter().enumerate() {
        let index = i + 1;
        let path = dir.join(output_file_name(index));
        if let Err(source) = image.save_with_format(&path, ImageFormat::Png) {
            return Err(CropError::Save {
                index,
                path,
                source,
            });
        }
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
