// ABOUTME: Viewport metrics and rectangles shared across the workspace.
// ABOUTME: All values are in device-independent units.

use serde::{Deserialize, Serialize};

/// Which metrics snapshot a provider is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsKind {
    /// The application window
    Window,
    /// The physical screen hosting the window
    Screen,
}

/// Snapshot of a window's or screen's size and scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub width: f64,
    pub height: f64,
    /// Physical pixels per device-independent unit
    pub pixel_scale: f64,
    /// User font scaling preference
    pub font_scale: f64,
}

impl Metrics {
    /// Metrics at 1x pixel and font scale
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pixel_scale: 1.0,
            font_scale: 1.0,
        }
    }

    pub fn with_scale(mut self, pixel_scale: f64, font_scale: f64) -> Self {
        self.pixel_scale = pixel_scale;
        self.font_scale = font_scale;
        self
    }

    pub fn min_dimension(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Rectangle anchored at the origin covering these metrics
    pub fn to_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Rectangle in device-independent units.
///
/// Width and height are expected to be non-negative but nothing here
/// enforces it; consumers receive degenerate rectangles unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Caller-supplied bounds for a manual workspace update.
/// Missing offsets resolve to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundsUpdate {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl BoundsUpdate {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x: None,
            y: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.width,
            self.height,
        )
    }
}
