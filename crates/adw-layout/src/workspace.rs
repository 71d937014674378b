// ABOUTME: Port to the external workspace geometry engine.
// ABOUTME: The engine owns pane geometry; this side only hands it root bounds.

use adw_core::Rect;

/// Accepts the root rectangle a workspace lays its panes into.
///
/// Implementations recompute pane geometry synchronously. Rectangles are
/// forwarded exactly as produced, including zero or negative sizes, so any
/// validation belongs to the implementation.
pub trait WorkspaceBoundsPort {
    fn set_bounds(&self, rect: Rect);
}

impl<F: Fn(Rect)> WorkspaceBoundsPort for F {
    fn set_bounds(&self, rect: Rect) {
        self(rect)
    }
}
