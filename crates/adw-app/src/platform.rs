// ABOUTME: Bridges winit window and monitor sizes into viewport metrics.
// ABOUTME: Also hosts the logging workspace the demo pushes bounds into.

use std::cell::Cell;

use adw_core::{Metrics, Rect};
use adw_layout::WorkspaceBoundsPort;
use winit::window::Window;

/// Logical size of the window's client area
pub fn window_metrics(window: &Window) -> Metrics {
    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f64>(scale);
    Metrics::new(size.width, size.height).with_scale(scale, 1.0)
}

/// Logical size of the monitor the window is on
pub fn screen_metrics(window: &Window) -> Metrics {
    match window.current_monitor() {
        Some(monitor) => {
            let scale = monitor.scale_factor();
            let size = monitor.size().to_logical::<f64>(scale);
            Metrics::new(size.width, size.height).with_scale(scale, 1.0)
        }
        None => {
            tracing::warn!("No monitor reported, using window metrics for screen");
            window_metrics(window)
        }
    }
}

/// Stands in for the geometry engine: remembers the last bounds it was given
#[derive(Debug, Default)]
pub struct LoggingWorkspace {
    bounds: Cell<Option<Rect>>,
    pushes: Cell<u32>,
}

impl LoggingWorkspace {
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    pub fn push_count(&self) -> u32 {
        self.pushes.get()
    }
}

impl WorkspaceBoundsPort for LoggingWorkspace {
    fn set_bounds(&self, rect: Rect) {
        if rect.is_degenerate() {
            tracing::warn!("Workspace received degenerate bounds {:?}", rect);
        }
        self.bounds.set(Some(rect));
        self.pushes.set(self.pushes.get() + 1);
        tracing::info!(
            "Workspace laid out into {}x{} at ({}, {}), push #{}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            self.pushes.get()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_workspace_keeps_latest_bounds() {
        let workspace = LoggingWorkspace::default();
        assert_eq!(workspace.bounds(), None);

        workspace.set_bounds(Rect::new(0.0, 0.0, 800.0, 600.0));
        workspace.set_bounds(Rect::new(0.0, 0.0, 0.0, 600.0));

        assert_eq!(workspace.bounds(), Some(Rect::new(0.0, 0.0, 0.0, 600.0)));
        assert_eq!(workspace.push_count(), 2);
    }
}
