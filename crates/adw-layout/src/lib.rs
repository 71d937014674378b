// ABOUTME: Layout synchronization for adaptive multi-pane workspaces.
// ABOUTME: Classifies viewport metrics, debounces changes, and reconciles pane header controls.

pub mod classify;
pub mod debounce;
pub mod metrics;
pub mod pane;
pub mod sync;
pub mod workspace;

pub use classify::{classify, recommended_layout, MetricsPair, OrientationState};
pub use debounce::{Clock, DebounceScheduler, ManualClock, SystemClock};
pub use metrics::{ChangeHandler, MetricsBroadcaster, MetricsProvider, Subscription};
pub use pane::{
    control_cluster, reconcile, ControlAffordance, Pane, PaneCallbacks, PaneControl,
    PaneControlState, PaneFrame, PaneIntent, SplitDirection,
};
pub use sync::{LayoutSynchronizer, SyncConfig, SyncPhase};
pub use workspace::WorkspaceBoundsPort;
