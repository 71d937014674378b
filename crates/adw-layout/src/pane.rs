// ABOUTME: Pane header controls: maps button presses plus minimized/maximized flags to intents.
// ABOUTME: Renders a pane into a header/content frame and dispatches intents to optional callbacks.

use adw_core::ControlsPosition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Caller-owned window state of a pane. Both flags may be set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaneControlState {
    pub minimized: bool,
    pub maximized: bool,
}

/// A button in the pane header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneControl {
    SplitDown,
    SplitRight,
    /// Minimize, or restore when already minimized
    MinimizeToggle,
    /// Maximize, or restore when already maximized
    MaximizeToggle,
    Close,
}

impl PaneControl {
    /// Controls in the order they appear in the header cluster
    pub const CLUSTER: [PaneControl; 5] = [
        PaneControl::SplitDown,
        PaneControl::SplitRight,
        PaneControl::MinimizeToggle,
        PaneControl::MaximizeToggle,
        PaneControl::Close,
    ];

    pub fn test_id(&self) -> &'static str {
        match self {
            PaneControl::SplitDown => "panel-split-down",
            PaneControl::SplitRight => "panel-split-right",
            PaneControl::MinimizeToggle => "panel-minimize",
            PaneControl::MaximizeToggle => "panel-maximize",
            PaneControl::Close => "panel-close",
        }
    }
}

/// What a control press asks the owner of the pane to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneIntent {
    Close,
    Minimize,
    Restore,
    Maximize,
    Split(SplitDirection),
}

/// Resolve a press against the current flags. Each toggle only looks at its own flag.
pub fn reconcile(control: PaneControl, state: PaneControlState) -> PaneIntent {
    match control {
        PaneControl::Close => PaneIntent::Close,
        PaneControl::MinimizeToggle if state.minimized => PaneIntent::Restore,
        PaneControl::MinimizeToggle => PaneIntent::Minimize,
        PaneControl::MaximizeToggle if state.maximized => PaneIntent::Restore,
        PaneControl::MaximizeToggle => PaneIntent::Maximize,
        PaneControl::SplitDown => PaneIntent::Split(SplitDirection::Down),
        PaneControl::SplitRight => PaneIntent::Split(SplitDirection::Right),
    }
}

/// How a control is presented in a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAffordance {
    pub control: PaneControl,
    pub glyph: &'static str,
    pub label: &'static str,
    pub test_id: &'static str,
    /// Intent a press would produce right now
    pub intent: PaneIntent,
}

pub fn affordance(control: PaneControl, state: PaneControlState) -> ControlAffordance {
    let (glyph, label) = match control {
        PaneControl::SplitDown => ("↓", "Split down"),
        PaneControl::SplitRight => ("→", "Split right"),
        PaneControl::MinimizeToggle if state.minimized => ("▢", "Restore panel"),
        PaneControl::MinimizeToggle => ("▁", "Minimize panel"),
        PaneControl::MaximizeToggle if state.maximized => ("🗗", "Restore panel"),
        PaneControl::MaximizeToggle => ("🗖", "Maximize panel"),
        PaneControl::Close => ("×", "Close panel"),
    };
    ControlAffordance {
        control,
        glyph,
        label,
        test_id: control.test_id(),
        intent: reconcile(control, state),
    }
}

/// The full header cluster for a state, in display order
pub fn control_cluster(state: PaneControlState) -> [ControlAffordance; 5] {
    PaneControl::CLUSTER.map(|control| affordance(control, state))
}

type Handler<'a> = Option<Box<dyn FnMut() + 'a>>;

/// Optional handlers for pane intents. A missing handler drops its intent.
#[derive(Default)]
pub struct PaneCallbacks<'a> {
    close: Handler<'a>,
    minimize: Handler<'a>,
    restore: Handler<'a>,
    maximize: Handler<'a>,
    split: Option<Box<dyn FnMut(SplitDirection) + 'a>>,
}

impl<'a> PaneCallbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_close(mut self, handler: impl FnMut() + 'a) -> Self {
        self.close = Some(Box::new(handler));
        self
    }

    pub fn on_minimize(mut self, handler: impl FnMut() + 'a) -> Self {
        self.minimize = Some(Box::new(handler));
        self
    }

    pub fn on_restore(mut self, handler: impl FnMut() + 'a) -> Self {
        self.restore = Some(Box::new(handler));
        self
    }

    pub fn on_maximize(mut self, handler: impl FnMut() + 'a) -> Self {
        self.maximize = Some(Box::new(handler));
        self
    }

    pub fn on_split(mut self, handler: impl FnMut(SplitDirection) + 'a) -> Self {
        self.split = Some(Box::new(handler));
        self
    }

    /// Invoke the handler for `intent`. Returns false when none is registered.
    pub fn dispatch(&mut self, intent: PaneIntent) -> bool {
        match intent {
            PaneIntent::Close => invoke(&mut self.close),
            PaneIntent::Minimize => invoke(&mut self.minimize),
            PaneIntent::Restore => invoke(&mut self.restore),
            PaneIntent::Maximize => invoke(&mut self.maximize),
            PaneIntent::Split(direction) => match self.split.as_mut() {
                Some(handler) => {
                    handler(direction);
                    true
                }
                None => false,
            },
        }
    }
}

fn invoke(handler: &mut Handler<'_>) -> bool {
    match handler {
        Some(handler) => {
            handler();
            true
        }
        None => false,
    }
}

/// One slot of the rendered header row
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderItem<'p> {
    Title(&'p str),
    Controls([ControlAffordance; 5]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFrame<'p> {
    /// Left to right
    pub items: [HeaderItem<'p>; 2],
}

impl<'p> HeaderFrame<'p> {
    pub fn title(&self) -> &'p str {
        self.items
            .iter()
            .find_map(|item| match item {
                HeaderItem::Title(title) => Some(*title),
                HeaderItem::Controls(_) => None,
            })
            .unwrap_or("")
    }

    pub fn controls(&self) -> &[ControlAffordance] {
        self.items
            .iter()
            .find_map(|item| match item {
                HeaderItem::Controls(controls) => Some(&controls[..]),
                HeaderItem::Title(_) => None,
            })
            .unwrap_or(&[])
    }
}

/// A pane as it should be drawn for its current flags
#[derive(Debug)]
pub struct PaneFrame<'p, C> {
    pub header: HeaderFrame<'p>,
    /// Absent while the pane is minimized
    pub content: Option<&'p C>,
}

/// A titled pane with a header control cluster and some content.
///
/// The flags in `state` belong to the caller: pressing a control never
/// changes them, it only reports the intent through the callbacks. When both
/// flags are set the content stays hidden and each toggle offers to restore.
pub struct Pane<'a, C> {
    pub title: Option<String>,
    pub state: PaneControlState,
    pub controls_position: ControlsPosition,
    pub content: C,
    callbacks: PaneCallbacks<'a>,
}

impl<'a, C> Pane<'a, C> {
    pub fn new(content: C) -> Self {
        Self {
            title: None,
            state: PaneControlState::default(),
            controls_position: ControlsPosition::default(),
            content,
            callbacks: PaneCallbacks::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_state(mut self, state: PaneControlState) -> Self {
        self.state = state;
        self
    }

    pub fn with_controls_position(mut self, position: ControlsPosition) -> Self {
        self.controls_position = position;
        self
    }

    pub fn with_callbacks(mut self, callbacks: PaneCallbacks<'a>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn render(&self) -> PaneFrame<'_, C> {
        let title = HeaderItem::Title(self.title.as_deref().unwrap_or(""));
        let controls = HeaderItem::Controls(control_cluster(self.state));
        let items = match self.controls_position {
            ControlsPosition::Left => [controls, title],
            ControlsPosition::Right => [title, controls],
        };
        PaneFrame {
            header: HeaderFrame { items },
            content: (!self.state.minimized).then_some(&self.content),
        }
    }

    /// Resolve a press against the current flags and hand it to the callbacks
    pub fn press(&mut self, control: PaneControl) -> PaneIntent {
        let intent = reconcile(control, self.state);
        if !self.callbacks.dispatch(intent) {
            tracing::debug!("No handler for {:?}, dropping", intent);
        }
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn state(minimized: bool, maximized: bool) -> PaneControlState {
        PaneControlState {
            minimized,
            maximized,
        }
    }

    #[test]
    fn reconcile_table() {
        let all = [
            state(false, false),
            state(true, false),
            state(false, true),
            state(true, true),
        ];
        for flags in all {
            assert_eq!(reconcile(PaneControl::Close, flags), PaneIntent::Close);
            assert_eq!(
                reconcile(PaneControl::SplitDown, flags),
                PaneIntent::Split(SplitDirection::Down)
            );
            assert_eq!(
                reconcile(PaneControl::SplitRight, flags),
                PaneIntent::Split(SplitDirection::Right)
            );
        }

        let minimize = |flags| reconcile(PaneControl::MinimizeToggle, flags);
        let maximize = |flags| reconcile(PaneControl::MaximizeToggle, flags);
        assert_eq!(minimize(state(false, true)), PaneIntent::Minimize);
        assert_eq!(minimize(state(true, false)), PaneIntent::Restore);
        assert_eq!(maximize(state(true, false)), PaneIntent::Maximize);
        assert_eq!(maximize(state(false, true)), PaneIntent::Restore);
    }

    #[test]
    fn both_flags_set_restores_from_either_toggle() {
        let both = state(true, true);
        assert_eq!(reconcile(PaneControl::MinimizeToggle, both), PaneIntent::Restore);
        assert_eq!(reconcile(PaneControl::MaximizeToggle, both), PaneIntent::Restore);

        let pane = Pane::new("body").with_state(both);
        assert!(pane.render().content.is_none());
    }

    #[test]
    fn minimize_then_restore_scenario() {
        let log = RefCell::new(Vec::new());
        let callbacks = PaneCallbacks::new()
            .on_minimize(|| log.borrow_mut().push("minimize"))
            .on_restore(|| log.borrow_mut().push("restore"));
        let mut pane = Pane::new(()).with_callbacks(callbacks);

        assert_eq!(pane.press(PaneControl::MinimizeToggle), PaneIntent::Minimize);
        assert_eq!(*log.borrow(), vec!["minimize"]);

        pane.state.minimized = true;
        assert_eq!(pane.press(PaneControl::MinimizeToggle), PaneIntent::Restore);
        assert_eq!(*log.borrow(), vec!["minimize", "restore"]);
    }

    #[test]
    fn split_presses_dispatch_in_order() {
        let splits = RefCell::new(Vec::new());
        let callbacks =
            PaneCallbacks::new().on_split(|direction| splits.borrow_mut().push(direction));
        let mut pane = Pane::new(()).with_callbacks(callbacks);

        pane.press(PaneControl::SplitDown);
        pane.press(PaneControl::SplitRight);

        assert_eq!(*splits.borrow(), vec![SplitDirection::Down, SplitDirection::Right]);
    }

    #[test]
    fn missing_handlers_are_silently_dropped() {
        let mut callbacks = PaneCallbacks::new();
        assert!(!callbacks.dispatch(PaneIntent::Close));
        assert!(!callbacks.dispatch(PaneIntent::Split(SplitDirection::Up)));

        let mut pane = Pane::new(());
        assert_eq!(pane.press(PaneControl::MaximizeToggle), PaneIntent::Maximize);
    }

    #[test]
    fn minimized_pane_renders_header_only() {
        let pane = Pane::new(vec!["line one", "line two"])
            .with_title("Logs")
            .with_state(state(true, false));
        let frame = pane.render();

        assert!(frame.content.is_none());
        assert_eq!(frame.header.title(), "Logs");
        assert_eq!(frame.header.controls().len(), 5);
    }

    #[test]
    fn visible_pane_renders_content() {
        let pane = Pane::new(42).with_state(state(false, true));
        assert_eq!(pane.render().content, Some(&42));
    }

    #[test]
    fn controls_position_only_changes_order() {
        let right = Pane::new(()).with_title("Editor");
        let left = Pane::new(())
            .with_title("Editor")
            .with_controls_position(ControlsPosition::Left);

        let right_frame = right.render();
        let left_frame = left.render();

        assert!(matches!(right_frame.header.items[0], HeaderItem::Title("Editor")));
        assert!(matches!(left_frame.header.items[1], HeaderItem::Title("Editor")));
        assert_eq!(right_frame.header.controls(), left_frame.header.controls());
    }

    #[test]
    fn missing_title_renders_empty() {
        let pane = Pane::new(());
        assert_eq!(pane.render().header.title(), "");
    }

    #[test]
    fn cluster_affordances_follow_flags() {
        let normal = control_cluster(state(false, false));
        let order: Vec<_> = normal.iter().map(|a| a.control).collect();
        assert_eq!(order, PaneControl::CLUSTER.to_vec());
        assert_eq!(normal[2].label, "Minimize panel");
        assert_eq!(normal[3].label, "Maximize panel");
        assert_eq!(normal[2].test_id, "panel-minimize");
        assert_eq!(normal[3].test_id, "panel-maximize");

        let toggled = control_cluster(state(true, true));
        assert_eq!(toggled[2].label, "Restore panel");
        assert_eq!(toggled[3].label, "Restore panel");
        assert_eq!(toggled[2].intent, PaneIntent::Restore);
        assert_eq!(toggled[3].glyph, "🗗");
        assert_eq!(toggled[4].test_id, "panel-close");
        assert_eq!(toggled[4].label, "Close panel");
    }
}
