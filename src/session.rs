//! Batch state for one upload: the loaded images, their crop gestures and
//! the cropped results.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::config::DEFAULT_PREVIEW_WIDTH;
use crate::error::{CropError, Result};
use crate::export;
use crate::mapper::{self, ClampMode, CropRect, Point};
use crate::preview::Preview;

/// Crop rectangle lifecycle for a single image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    NoRectangle,
    /// Pointer is down; the rectangle is in preview space.
    Dragging(CropRect),
    /// Pointer was released. `preview` is what the user drew, `source` is
    /// the clamped and scaled rectangle used for cropping.
    Finalized { preview: CropRect, source: CropRect },
}

impl Gesture {
    /// Rectangle to paint over the preview, if any.
    pub fn overlay(&self) -> Option<CropRect> {
        match *self {
            Gesture::NoRectangle => None,
            Gesture::Dragging(rect) => Some(rect),
            Gesture::Finalized { preview, .. } => Some(preview),
        }
    }

    pub fn source_rect(&self) -> Option<CropRect> {
        match *self {
            Gesture::Finalized { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub struct ImageEntry {
    pub path: PathBuf,
    source: DynamicImage,
    preview: Preview,
    gesture: Gesture,
    result: Option<DynamicImage>,
    result_preview: Option<Preview>,
}

impl ImageEntry {
    fn new(path: PathBuf, source: DynamicImage, preview_width: u32) -> Self {
        let preview = Preview::build(&source, preview_width);
        Self {
            path,
            source,
            preview,
            gesture: Gesture::NoRectangle,
            result: None,
            result_preview: None,
        }
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut Preview {
        &mut self.preview
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn result(&self) -> Option<&DynamicImage> {
        self.result.as_ref()
    }

    /// Thumbnail of the cropped result, shown beside the preview.
    pub fn result_preview(&self) -> Option<&Preview> {
        self.result_preview.as_ref()
    }

    pub fn result_preview_mut(&mut self) -> Option<&mut Preview> {
        self.result_preview.as_mut()
    }

    fn set_result(&mut self, result: Option<DynamicImage>, thumb_width: u32) {
        self.result_preview = result
            .as_ref()
            .map(|r| Preview::build(r, thumb_width.min(r.width())));
        self.result = result;
    }

    fn source_size(&self) -> (u32, u32) {
        (self.source.width(), self.source.height())
    }
}

pub struct Session {
    entries: Vec<ImageEntry>,
    preview_width: u32,
    clamp_mode: ClampMode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_WIDTH, ClampMode::default())
    }
}

impl Session {
    pub fn new(preview_width: u32, clamp_mode: ClampMode) -> Self {
        Self {
            entries: Vec::new(),
            preview_width: preview_width.max(1),
            clamp_mode,
        }
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [ImageEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the current batch with the images at `paths`.
    ///
    /// An empty selection keeps the current batch. If any file fails to
    /// decode, nothing is replaced and the error names that file.
    pub fn load_images(&mut self, paths: &[PathBuf]) -> Result<usize> {
        if paths.is_empty() {
            return Ok(0);
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            sources.push((path.clone(), decode(path)?));
        }

        self.entries = sources
            .into_iter()
            .map(|(path, source)| ImageEntry::new(path, source, self.preview_width))
            .collect();

        log::info!("Loaded {} image(s)", self.entries.len());
        Ok(self.entries.len())
    }

    /// Start a new rectangle at `point`, discarding any previous one.
    pub fn begin_crop(&mut self, index: usize, point: Point) -> Result<()> {
        let entry = self.entry_mut(index)?;
        entry.gesture = Gesture::Dragging(CropRect::at(point));
        log::debug!("Image {}: crop started at {:?}", index + 1, point);
        Ok(())
    }

    /// Move the second corner of the rectangle being drawn.
    pub fn update_crop(&mut self, index: usize, point: Point) -> Result<()> {
        let entry = self.entry_mut(index)?;
        match entry.gesture {
            Gesture::Dragging(rect) => {
                entry.gesture = Gesture::Dragging(rect.with_end(point));
                Ok(())
            }
            _ => Err(CropError::NoGesture { index }),
        }
    }

    /// Set the last corner, then clamp and map the rectangle to source space.
    pub fn finalize_crop(&mut self, index: usize, point: Point) -> Result<CropRect> {
        let clamp_mode = self.clamp_mode;
        let entry = self.entry_mut(index)?;
        let Gesture::Dragging(rect) = entry.gesture else {
            return Err(CropError::NoGesture { index });
        };

        let preview = rect.with_end(point);
        let (clamp_w, clamp_h) = clamp_mode.bounds(entry.source_size(), entry.preview.size());
        let source = mapper::map_rect(preview, entry.preview.scale_factor(), clamp_w, clamp_h);
        entry.gesture = Gesture::Finalized { preview, source };

        log::debug!("Image {}: crop finalized at {:?}", index + 1, source);
        Ok(source)
    }

    /// Rectangle currently being dragged on image `index`.
    pub fn in_progress(&self, index: usize) -> Option<CropRect> {
        match self.entries.get(index)?.gesture {
            Gesture::Dragging(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn can_crop(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn can_save(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|e| e.result.is_some())
    }

    /// Crop every image with its finalized rectangle.
    ///
    /// Either all images get a result or none do: on error any results
    /// from an earlier pass are dropped as well.
    pub fn crop_all(&mut self) -> Result<usize> {
        match self.crop_regions() {
            Ok(results) => {
                let thumb_width = self.preview_width;
                for (entry, result) in self.entries.iter_mut().zip(results) {
                    entry.set_result(Some(result), thumb_width);
                }
                log::info!("Cropped {} image(s)", self.entries.len());
                Ok(self.entries.len())
            }
            Err(err) => {
                for entry in &mut self.entries {
                    entry.set_result(None, 0);
                }
                log::warn!("Crop pass aborted: {err}");
                Err(err)
            }
        }
    }

    fn crop_regions(&self) -> Result<Vec<DynamicImage>> {
        if self.entries.is_empty() {
            return Err(CropError::NothingLoaded);
        }

        let missing: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.gesture.source_rect().is_none())
            .map(|(i, _)| i)
            .collect();
        if !missing.is_empty() {
            return Err(CropError::MissingCrop { indices: missing });
        }

        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let rect = entry
                    .gesture
                    .source_rect()
                    .ok_or_else(|| CropError::MissingCrop {
                        indices: vec![index],
                    })?
                    .normalized();
                if rect.is_empty() {
                    return Err(CropError::EmptyCrop { index });
                }
                Ok(crop_region(&entry.source, rect))
            })
            .collect()
    }

    /// Write every cropped result into `dir`.
    pub fn save_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.can_save() {
            return Err(CropError::NothingToSave);
        }

        let written = export::save_pngs(dir, self.entries.iter().filter_map(|e| e.result.as_ref()))?;
        log::info!("Saved {} image(s) to {}", written.len(), dir.display());
        Ok(written)
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ImageEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(CropError::IndexOutOfRange { index, len })
    }
}

/// Cut `rect` (normalized, non-negative) out of `source`.
///
/// The result is always `rect.width() x rect.height()`. Any part of the
/// rectangle past the image edge is left zero-filled.
fn crop_region(source: &DynamicImage, rect: CropRect) -> DynamicImage {
    let (x, y) = (rect.x0 as u32, rect.y0 as u32);
    let (width, height) = (rect.width(), rect.height());
    if x + width <= source.width() && y + height <= source.height() {
        return source.crop_imm(x, y, width, height);
    }

    let mut out = DynamicImage::new(width, height, source.color());
    let overlap_w = source.width().saturating_sub(x).min(width);
    let overlap_h = source.height().saturating_sub(y).min(height);
    if overlap_w > 0 && overlap_h > 0 {
        let inside = source.crop_imm(x, y, overlap_w, overlap_h);
        image::imageops::replace(&mut out, &inside, 0, 0);
    }
    out
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| CropError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(CropError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    Ok(image)
}
