// ABOUTME: Shared types and configuration for adaptive-panes.
// ABOUTME: Defines viewport metrics, device vocabulary, presets, and config file handling.

pub mod config;
pub mod device;
pub mod geometry;

pub use config::{Config, ConfigError, PaneSettings, SyncSettings};
pub use device::{ControlsPosition, DeviceClass, DevicePreset, Orientation, RecommendedLayout};
pub use geometry::{BoundsUpdate, Metrics, MetricsKind, Rect};
