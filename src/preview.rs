use eframe::egui;
use image::{DynamicImage, imageops::FilterType};

use crate::mapper;

/// Scaled-down copy of a source image, shown on its own canvas.
pub struct Preview {
    width: u32,
    height: u32,
    scale_factor: f64,
    color_image: egui::ColorImage,
    texture: Option<egui::TextureHandle>,
}

impl Preview {
    /// Resize `source` to `width` pixels wide, keeping its aspect ratio.
    /// `source` must have non-zero dimensions.
    pub fn build(source: &DynamicImage, width: u32) -> Self {
        let height = mapper::preview_height(source.width(), source.height(), width);
        let resized = source.resize_exact(width, height, FilterType::Triangle);
        Self {
            width,
            height,
            scale_factor: mapper::scale_factor(source.width(), width),
            color_image: to_color_image(&resized),
            texture: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn size_vec2(&self) -> egui::Vec2 {
        egui::vec2(self.width as f32, self.height as f32)
    }

    /// Upload the preview on first use.
    pub fn texture(&mut self, ctx: &egui::Context, name: &str) -> &egui::TextureHandle {
        self.texture.get_or_insert_with(|| {
            ctx.load_texture(
                name,
                self.color_image.clone(),
                egui::TextureOptions::LINEAR,
            )
        })
    }
}

fn to_color_image(image: &DynamicImage) -> egui::ColorImage {
    let size = [image.width() as _, image.height() as _];
    let image_buffer = image.to_rgba8();
    let pixels = image_buffer.as_flat_samples();
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn preview_keeps_aspect_ratio() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(900, 600));
        let preview = Preview::build(&source, 300);
        assert_eq!(preview.size(), (300, 200));
        assert_eq!(preview.scale_factor(), 3.0);
        assert_eq!(preview.color_image.size, [300, 200]);
    }

    #[test]
    fn small_sources_are_scaled_up() {
        let source = DynamicImage::ImageRgb8(RgbImage::new(150, 50));
        let preview = Preview::build(&source, 300);
        assert_eq!(preview.size(), (300, 100));
        assert_eq!(preview.scale_factor(), 0.5);
    }
}
