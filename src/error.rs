use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropError {
    #[error("failed to open {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{} has no pixels", path.display())]
    EmptyImage { path: PathBuf },

    #[error("image index {index} is out of range ({len} loaded)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no crop gesture in progress for image {}", index + 1)]
    NoGesture { index: usize },

    #[error("no images loaded")]
    NothingLoaded,

    #[error("Please define a crop area for all images (missing: {}).", one_based(indices))]
    MissingCrop { indices: Vec<usize> },

    #[error("The crop area for image {} is empty.", index + 1)]
    EmptyCrop { index: usize },

    #[error("no output directory selected")]
    NoDirectory,

    #[error("nothing to save, crop the images first")]
    NothingToSave,

    /// `index` is 1-based and matches the file name that failed.
    #[error("Failed to save cropped image {index}. Error: {source}")]
    Save {
        index: usize,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, CropError>;

fn one_based(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_crop_lists_images_one_based() {
        let err = CropError::MissingCrop {
            indices: vec![0, 2],
        };
        assert_eq!(
            err.to_string(),
            "Please define a crop area for all images (missing: 1, 3)."
        );
    }

    #[test]
    fn no_gesture_reports_one_based_index() {
        let err = CropError::NoGesture { index: 4 };
        assert!(err.to_string().ends_with("image 5"));
    }
}
