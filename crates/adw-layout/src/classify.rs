// ABOUTME: Pure classification of viewport metrics into orientation and device class.
// ABOUTME: Also maps a classification to the recommended pane arrangement.

use adw_core::{DeviceClass, Metrics, Orientation, RecommendedLayout};
use serde::{Deserialize, Serialize};

/// Smallest window dimension classified as a tablet
pub const TABLET_MIN_DIMENSION: f64 = 600.0;

/// Smallest window dimension classified as a desktop
pub const DESKTOP_MIN_DIMENSION: f64 = 900.0;

/// The window and screen metrics a classification was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsPair {
    pub window: Metrics,
    pub screen: Metrics,
}

/// Committed classification of the current viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationState {
    pub orientation: Orientation,
    pub device_class: DeviceClass,
    pub metrics: MetricsPair,
}

impl OrientationState {
    pub fn recommended_layout(&self) -> RecommendedLayout {
        recommended_layout(self.device_class, self.orientation)
    }
}

/// Landscape only when strictly wider than tall
pub fn orientation_of(window: &Metrics) -> Orientation {
    if window.width > window.height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    }
}

pub fn device_class_of(window: &Metrics) -> DeviceClass {
    let min = window.min_dimension();
    if min < TABLET_MIN_DIMENSION {
        DeviceClass::Phone
    } else if min < DESKTOP_MIN_DIMENSION {
        DeviceClass::Tablet
    } else {
        DeviceClass::Desktop
    }
}

/// Classify a window/screen pair. Only the window metrics drive the result.
pub fn classify(window: Metrics, screen: Metrics) -> OrientationState {
    OrientationState {
        orientation: orientation_of(&window),
        device_class: device_class_of(&window),
        metrics: MetricsPair { window, screen },
    }
}

pub fn recommended_layout(
    device_class: DeviceClass,
    orientation: Orientation,
) -> RecommendedLayout {
    match (device_class, orientation) {
        (DeviceClass::Phone, Orientation::Portrait) => RecommendedLayout::Stacked,
        (DeviceClass::Phone, Orientation::Landscape) => RecommendedLayout::SideBySide,
        (DeviceClass::Tablet, Orientation::Landscape) => RecommendedLayout::SideBySide,
        (DeviceClass::Tablet, Orientation::Portrait) => RecommendedLayout::Flexible,
        (DeviceClass::Desktop, _) => RecommendedLayout::Flexible,
    }
}
