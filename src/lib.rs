//! Batch image cropping: draw one rectangle per image on a scaled preview,
//! then crop every image at full resolution and export as PNG.

pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod mapper;
pub mod preview;
pub mod session;

pub use error::{CropError, Result};
pub use session::Session;
