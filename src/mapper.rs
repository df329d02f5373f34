//! Mapping between preview space and source space.
//!
//! A preview is the source image scaled to a fixed width, so a single
//! scalar (`source_width / preview_width`) converts in both directions.

/// Pixel position, in either preview or source space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Two corners of a rectangle. Corners are kept in gesture order, so `x1`
/// may be smaller than `x0` when the user dragged up or left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CropRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CropRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Zero-extent rectangle anchored at `p`.
    pub const fn at(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x0, self.y0)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn with_end(self, p: Point) -> Self {
        Self::new(self.x0, self.y0, p.x, p.y)
    }

    /// Same area with `(x0, y0)` as the top-left corner.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.x0.min(self.x1),
            self.y0.min(self.y1),
            self.x0.max(self.x1),
            self.y0.max(self.y1),
        )
    }

    pub fn width(&self) -> u32 {
        self.x0.abs_diff(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y0.abs_diff(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Which bounds a preview coordinate is clamped against before scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ClampMode {
    /// Clamp the raw preview coordinate against the source image size.
    #[default]
    Source,
    /// Clamp against the preview size.
    Preview,
}

impl ClampMode {
    /// `(width, height)` to clamp against.
    pub fn bounds(self, source: (u32, u32), preview: (u32, u32)) -> (u32, u32) {
        match self {
            ClampMode::Source => source,
            ClampMode::Preview => preview,
        }
    }
}

impl std::fmt::Display for ClampMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClampMode::Source => "source",
            ClampMode::Preview => "preview",
        };
        write!(f, "{}", s)
    }
}

pub fn scale_factor(source_width: u32, preview_width: u32) -> f64 {
    source_width as f64 / preview_width as f64
}

/// Preview height for a given preview width, keeping the aspect ratio.
pub fn preview_height(source_width: u32, source_height: u32, preview_width: u32) -> u32 {
    let h = source_height as f64 * preview_width as f64 / source_width as f64;
    h.round().max(1.0) as u32
}

/// Clamp `point` to `[0, clamp_width] x [0, clamp_height]`, scale it and
/// truncate.
pub fn to_source_space(
    point: Point,
    scale_factor: f64,
    clamp_width: u32,
    clamp_height: u32,
) -> Point {
    let x = point.x.clamp(0, clamp_width as i32);
    let y = point.y.clamp(0, clamp_height as i32);
    Point::new(
        (x as f64 * scale_factor) as i32,
        (y as f64 * scale_factor) as i32,
    )
}

/// Map both corners independently. Corner order is preserved.
pub fn map_rect(rect: CropRect, scale_factor: f64, clamp_width: u32, clamp_height: u32) -> CropRect {
    let start = to_source_space(rect.start(), scale_factor, clamp_width, clamp_height);
    let end = to_source_space(rect.end(), scale_factor, clamp_width, clamp_height);
    CropRect::new(start.x, start.y, end.x, end.y)
}
