use std::path::PathBuf;

use eframe::egui;

use crate::config::Config;
use crate::error::CropError;
use crate::mapper::{CropRect, Point};
use crate::session::Session;

const CANVAS_SPACING: f32 = 10.0;

/// Pointer event on one preview canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PointerEvent {
    Press(Point),
    Drag(Point),
    Release(Option<Point>),
}

pub struct BulkImageCropper {
    session: Session,
    status: String,
}

impl BulkImageCropper {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut app = Self {
            session: Session::new(config.preview_width, config.clamp),
            status: String::from("Upload images to begin"),
        };
        if !config.files.is_empty() {
            app.load(&config.files);
        }
        app
    }

    fn upload_images(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Image Files", &["png", "jpg", "jpeg"])
            .pick_files()
        else {
            return;
        };
        self.load(&paths);
    }

    fn load(&mut self, paths: &[PathBuf]) {
        match self.session.load_images(paths) {
            Ok(0) => {}
            Ok(n) => self.status = format!("Loaded {n} image(s). Drag on each preview to select a crop area."),
            Err(err) => {
                log::warn!("Upload failed: {err}");
                show_error(&err);
            }
        }
    }

    fn crop_images(&mut self) {
        match self.session.crop_all() {
            Ok(n) => {
                self.status = format!("Cropped {n} image(s)");
                show_info("Success", "Images cropped successfully!");
            }
            Err(err) => {
                self.status = String::from("Crop failed");
                show_error(&err);
            }
        }
    }

    fn save_images(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        match self.session.save_all(&dir) {
            Ok(written) => {
                self.status = format!("Saved {} image(s)", written.len());
                show_info(
                    "Success",
                    &format!("Cropped images have been saved to {}.", dir.display()),
                );
            }
            Err(err) => {
                log::warn!("Save failed: {err}");
                self.status = String::from("Save failed");
                show_error(&err);
            }
        }
    }

    fn apply(&mut self, index: usize, event: PointerEvent) {
        let result = match event {
            PointerEvent::Press(p) => self.session.begin_crop(index, p),
            PointerEvent::Drag(p) => self.session.update_crop(index, p),
            PointerEvent::Release(p) => {
                // Fall back to the last dragged corner if the pointer is gone.
                let end = p.or_else(|| self.session.in_progress(index).map(|r| r.end()));
                match end {
                    Some(p) => self.session.finalize_crop(index, p).map(|_| ()),
                    None => Ok(()),
                }
            }
        };
        if let Err(err) = result {
            log::debug!("Ignored pointer event {event:?}: {err}");
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Upload Images").clicked() {
                self.upload_images();
            }
            if ui
                .add_enabled(self.session.can_crop(), egui::Button::new("Crop Images"))
                .clicked()
            {
                self.crop_images();
            }
            if ui
                .add_enabled(self.session.can_save(), egui::Button::new("Save Cropped Images"))
                .clicked()
            {
                self.save_images();
            }
        });
        ui.label(&self.status);
    }

    fn canvases(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let mut events = Vec::new();

        for (index, entry) in self.session.entries_mut().iter_mut().enumerate() {
            let overlay = entry.gesture().overlay();
            let label = entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let result = entry
                .result_preview_mut()
                .map(|thumb| (thumb.texture(&ctx, &format!("result-{index}")).id(), thumb.size_vec2()));
            let preview = entry.preview_mut();
            let size = preview.size_vec2();
            let texture_id = preview.texture(&ctx, &format!("preview-{index}")).id();

            ui.add_space(CANVAS_SPACING);
            ui.label(format!("{}. {label}", index + 1));
            let (image_rect, response) = ui
                .horizontal(|ui| {
                    let (image_rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());
                    if let Some((result_id, result_size)) = result {
                        ui.add_space(CANVAS_SPACING);
                        ui.image((result_id, result_size));
                    }
                    (image_rect, response)
                })
                .inner;

            let painter = ui.painter_at(image_rect);
            painter.image(
                texture_id,
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            if let Some(rect) = overlay {
                painter.rect_stroke(
                    to_screen(rect, image_rect),
                    0.0,
                    egui::Stroke::new(2.0, egui::Color32::RED),
                );
            }

            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .map(|pos| to_preview(pos, image_rect));
            let pointer = response
                .interact_pointer_pos()
                .map(|pos| to_preview(pos, image_rect));
            for event in pointer_events(
                response.drag_started(),
                response.dragged(),
                response.drag_stopped(),
                origin,
                pointer,
            ) {
                events.push((index, event));
            }
        }

        for (index, event) in events {
            self.apply(index, event);
        }
    }
}

/// Events for one canvas in one frame, in press, drag, release order.
/// A press uses the point where the button went down, not where the drag
/// was first recognised.
fn pointer_events(
    started: bool,
    dragging: bool,
    stopped: bool,
    origin: Option<Point>,
    pointer: Option<Point>,
) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    if started {
        if let Some(p) = origin.or(pointer) {
            events.push(PointerEvent::Press(p));
        }
    }
    if dragging {
        if let Some(p) = pointer {
            events.push(PointerEvent::Drag(p));
        }
    }
    if stopped {
        events.push(PointerEvent::Release(pointer));
    }
    events
}

impl eframe::App for BulkImageCropper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| self.canvases(ui));
                });
        });
    }
}

/// Screen position to whole preview pixels, relative to the canvas origin.
fn to_preview(pos: egui::Pos2, image_rect: egui::Rect) -> Point {
    let local = pos - image_rect.min;
    Point::new(local.x.round() as i32, local.y.round() as i32)
}

fn to_screen(rect: CropRect, image_rect: egui::Rect) -> egui::Rect {
    let origin = image_rect.min;
    egui::Rect::from_two_pos(
        origin + egui::vec2(rect.x0 as f32, rect.y0 as f32),
        origin + egui::vec2(rect.x1 as f32, rect.y1 as f32),
    )
}

fn show_info(title: &str, message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn show_error(err: &CropError) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(err.to_string())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_positions_are_relative_to_canvas() {
        let canvas = egui::Rect::from_min_size(egui::pos2(100.0, 40.0), egui::vec2(300.0, 200.0));
        assert_eq!(to_preview(egui::pos2(150.4, 90.6), canvas), Point::new(50, 51));
        assert_eq!(to_preview(egui::pos2(90.0, 30.0), canvas), Point::new(-10, -10));
    }

    #[test]
    fn press_uses_button_down_point() {
        let events = pointer_events(
            true,
            true,
            false,
            Some(Point::new(50, 50)),
            Some(Point::new(56, 53)),
        );
        assert_eq!(
            events,
            vec![
                PointerEvent::Press(Point::new(50, 50)),
                PointerEvent::Drag(Point::new(56, 53)),
            ]
        );
    }

    #[test]
    fn press_and_release_in_one_frame_are_both_kept() {
        let p = Some(Point::new(10, 20));
        let events = pointer_events(true, false, true, p, p);
        assert_eq!(
            events,
            vec![PointerEvent::Press(Point::new(10, 20)), PointerEvent::Release(p)]
        );
        assert!(pointer_events(false, false, false, p, p).is_empty());
    }

    #[test]
    fn overlay_maps_back_to_screen_in_any_drag_direction() {
        let canvas = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(300.0, 200.0));
        let r = to_screen(CropRect::new(150, 120, 50, 50), canvas);
        assert_eq!(r.min, egui::pos2(60.0, 60.0));
        assert_eq!(r.max, egui::pos2(160.0, 130.0));
    }
}
