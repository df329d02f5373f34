#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use bulk_image_cropper::app::BulkImageCropper;
use bulk_image_cropper::config::Config;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "Starting with preview width {} and {} clamping",
        config.preview_width,
        config.clamp
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bulk Image Cropper")
            .with_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Bulk Image Cropper",
        options,
        Box::new(|cc| Ok(Box::new(BulkImageCropper::new(cc, config)))),
    )
}
