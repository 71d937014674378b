// ABOUTME: Device classification vocabulary and reference device presets.
// ABOUTME: Orientation, device class, recommended layout and pane header placement.

use serde::{Deserialize, Serialize};

use crate::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn rotated(&self) -> Orientation {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Coarse device bucket derived from the smaller window dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Phone,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceClass::Phone => "phone",
            DeviceClass::Tablet => "tablet",
            DeviceClass::Desktop => "desktop",
        }
    }
}

/// Pane arrangement suggested for a device class and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedLayout {
    /// Panes stacked vertically
    Stacked,
    /// Panes placed next to each other
    SideBySide,
    /// Free arrangement
    Flexible,
}

/// Which side of the pane title the control cluster sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControlsPosition {
    Left,
    #[default]
    Right,
}

/// Reference device used to try layouts at realistic sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePreset {
    pub name: &'static str,
    /// Natural size as listed by the manufacturer
    pub width: f64,
    pub height: f64,
    /// Orientations the device supports, preferred first
    pub orientations: &'static [Orientation],
}

const LANDSCAPE_ONLY: &[Orientation] = &[Orientation::Landscape];
const BOTH_ORIENTATIONS: &[Orientation] = &[Orientation::Portrait, Orientation::Landscape];

impl DevicePreset {
    pub const ULTRAWIDE: Self = Self {
        name: "Ultrawide",
        width: 2560.0,
        height: 1080.0,
        orientations: LANDSCAPE_ONLY,
    };

    pub const LAPTOP: Self = Self {
        name: "Laptop",
        width: 1440.0,
        height: 900.0,
        orientations: LANDSCAPE_ONLY,
    };

    pub const TABLET: Self = Self {
        name: "Tablet",
        width: 834.0,
        height: 1112.0,
        orientations: BOTH_ORIENTATIONS,
    };

    pub const PHONE: Self = Self {
        name: "Phone",
        width: 375.0,
        height: 812.0,
        orientations: BOTH_ORIENTATIONS,
    };

    pub fn all() -> &'static [DevicePreset] {
        &[Self::ULTRAWIDE, Self::LAPTOP, Self::TABLET, Self::PHONE]
    }

    pub fn preferred_orientation(&self) -> Orientation {
        self.orientations
            .first()
            .copied()
            .unwrap_or(Orientation::Landscape)
    }

    pub fn supports(&self, orientation: Orientation) -> bool {
        self.orientations.contains(&orientation)
    }

    /// Window metrics for this device held in the given orientation.
    /// Portrait puts the long edge vertically, landscape horizontally.
    pub fn metrics(&self, orientation: Orientation) -> Metrics {
        let long = self.width.max(self.height);
        let short = self.width.min(self.height);
        match orientation {
            Orientation::Portrait => Metrics::new(short, long),
            Orientation::Landscape => Metrics::new(long, short),
        }
    }
}
