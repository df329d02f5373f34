use std::path::PathBuf;

use clap::Parser;

use crate::mapper::ClampMode;

pub const DEFAULT_PREVIEW_WIDTH: u32 = 300;

/// Crop a batch of images, one rectangle per image, and export them as PNG.
#[derive(Parser, Debug, Clone)]
#[command(name = "BulkImageCropper", version, about)]
pub struct Config {
    /// Width of each preview canvas, in pixels.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_WIDTH, value_parser = clap::value_parser!(u32).range(16..=4096))]
    pub preview_width: u32,

    /// Bounds a drawn coordinate is clamped against before it is scaled.
    #[arg(long, value_enum, default_value_t = ClampMode::Source)]
    pub clamp: ClampMode,

    /// Images to load at startup.
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["BulkImageCropper"]).unwrap();
        assert_eq!(config.preview_width, 300);
        assert_eq!(config.clamp, ClampMode::Source);
        assert!(config.files.is_empty());
    }

    #[test]
    fn parses_options_and_files() {
        let config = Config::try_parse_from([
            "BulkImageCropper",
            "--preview-width",
            "240",
            "--clamp",
            "preview",
            "a.png",
            "b.jpg",
        ])
        .unwrap();
        assert_eq!(config.preview_width, 240);
        assert_eq!(config.clamp, ClampMode::Preview);
        assert_eq!(config.files, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
    }

    #[test]
    fn rejects_tiny_preview_width() {
        assert!(Config::try_parse_from(["BulkImageCropper", "--preview-width", "4"]).is_err());
    }
}
