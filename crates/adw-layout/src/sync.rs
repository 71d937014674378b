// ABOUTME: Keeps raw metrics, the committed orientation state and workspace bounds in step.
// ABOUTME: Metrics bursts are debounced into a single commit per quiet period.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use adw_core::{BoundsUpdate, Metrics, MetricsKind, Rect, SyncSettings};

use crate::classify::{classify, OrientationState};
use crate::debounce::{Clock, DebounceScheduler, SystemClock};
use crate::metrics::{MetricsProvider, Subscription};
use crate::workspace::WorkspaceBoundsPort;

/// How a synchronizer is wired to its workspace
#[derive(Clone)]
pub struct SyncConfig {
    /// Workspace receiving bounds; without one every push is a no-op
    pub workspace_target: Option<Rc<dyn WorkspaceBoundsPort>>,
    /// Quiet period after the last metrics change before committing
    pub debounce_delay: Duration,
    /// Push bounds on start and on every commit
    pub auto_sync: bool,
}

impl SyncConfig {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            workspace_target: None,
            debounce_delay: settings.debounce_delay(),
            auto_sync: settings.auto_sync,
        }
    }

    pub fn with_workspace(mut self, target: Rc<dyn WorkspaceBoundsPort>) -> Self {
        self.workspace_target = Some(target);
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::from_settings(&SyncSettings::default())
    }
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("workspace_target", &self.workspace_target.is_some())
            .field("debounce_delay", &self.debounce_delay)
            .field("auto_sync", &self.auto_sync)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Committed state matches the raw metrics
    Stable,
    /// Raw metrics changed and a commit is waiting for the quiet period
    Pending,
}

/// Marker for the commit armed in the scheduler
struct PendingCommit;

type BoundsPush = (Rc<dyn WorkspaceBoundsPort>, Rect);

struct SyncState<C: Clock> {
    window: Metrics,
    screen: Metrics,
    committed: OrientationState,
    phase: SyncPhase,
    commits: DebounceScheduler<PendingCommit, C>,
    debounce_delay: Duration,
    auto_sync: bool,
    workspace: Option<Rc<dyn WorkspaceBoundsPort>>,
    stopped: bool,
}

impl<C: Clock> SyncState<C> {
    fn apply_change(&mut self, window: Metrics, screen: Metrics) {
        if self.stopped {
            return;
        }
        self.window = window;
        self.screen = screen;
        self.phase = SyncPhase::Pending;
        self.commits.schedule(self.debounce_delay, PendingCommit);
        tracing::debug!(
            "Raw metrics now {}x{}, commit in {:?}",
            window.width,
            window.height,
            self.debounce_delay
        );
    }

    /// Fire the armed commit if it is due
    fn commit_due(&mut self) -> Option<(OrientationState, Option<BoundsPush>)> {
        if self.stopped {
            return None;
        }
        self.commits.take_due()?;

        // Classify what is current now, not what was current when the commit was armed
        self.committed = classify(self.window, self.screen);
        self.phase = SyncPhase::Stable;
        tracing::info!(
            "Committed {} {} layout at {}x{}",
            self.committed.device_class.label(),
            self.committed.orientation.label(),
            self.window.width,
            self.window.height
        );

        let push = self.auto_push();
        Some((self.committed, push))
    }

    fn auto_push(&self) -> Option<BoundsPush> {
        if !self.auto_sync {
            return None;
        }
        self.workspace
            .as_ref()
            .map(|target| (Rc::clone(target), self.window.to_rect()))
    }
}

fn push_bounds((target, rect): BoundsPush) {
    tracing::info!(
        "Workspace bounds -> ({}, {}) {}x{}",
        rect.x,
        rect.y,
        rect.width,
        rect.height
    );
    target.set_bounds(rect);
}

/// Tracks a [`MetricsProvider`] and commits debounced orientation changes.
///
/// Raw metrics update as soon as the provider reports a change. The
/// committed [`OrientationState`] only moves once the provider has been
/// quiet for the configured delay; the owning event loop drives that by
/// calling [`poll`](Self::poll), sleeping until
/// [`next_deadline`](Self::next_deadline) in between.
///
/// Stopping (or dropping) releases the provider subscription and cancels
/// any armed commit.
pub struct LayoutSynchronizer<C: Clock + 'static = SystemClock> {
    state: Rc<RefCell<SyncState<C>>>,
    subscription: Option<Box<dyn Subscription>>,
}

impl LayoutSynchronizer<SystemClock> {
    pub fn start(provider: &dyn MetricsProvider, config: SyncConfig) -> Self {
        Self::start_with_clock(provider, config, SystemClock)
    }
}

impl<C: Clock + 'static> LayoutSynchronizer<C> {
    pub fn start_with_clock(provider: &dyn MetricsProvider, config: SyncConfig, clock: C) -> Self {
        let window = provider.current(MetricsKind::Window);
        let screen = provider.current(MetricsKind::Screen);

        let state = Rc::new(RefCell::new(SyncState {
            window,
            screen,
            committed: classify(window, screen),
            phase: SyncPhase::Stable,
            commits: DebounceScheduler::with_clock(clock),
            debounce_delay: config.debounce_delay,
            auto_sync: config.auto_sync,
            workspace: config.workspace_target,
            stopped: false,
        }));

        let weak = Rc::downgrade(&state);
        let subscription = provider.on_change(Box::new(move |window: Metrics, screen: Metrics| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().apply_change(window, screen);
            }
        }));
        if subscription.is_none() {
            tracing::debug!("Metrics provider returned no subscription handle");
        }

        // The initial push bypasses the debounce path entirely
        let initial = state.borrow().auto_push();
        if let Some(push) = initial {
            push_bounds(push);
        }

        Self {
            state,
            subscription,
        }
    }

    /// Commit the pending change if its quiet period has elapsed.
    /// Returns the newly committed state.
    pub fn poll(&self) -> Option<OrientationState> {
        let (committed, push) = self.state.borrow_mut().commit_due()?;
        // The workspace may re-enter the provider, so no borrow is held here
        if let Some(push) = push {
            push_bounds(push);
        }
        Some(committed)
    }

    /// Push bounds to the workspace right away, skipping the debounce.
    ///
    /// Without explicit bounds the current raw window rectangle is used.
    pub fn update_screen_bounds(&self, bounds: Option<BoundsUpdate>) {
        let push = {
            let state = self.state.borrow();
            let Some(target) = state.workspace.as_ref() else {
                tracing::debug!("No workspace attached, ignoring bounds update");
                return;
            };
            let rect = bounds
                .map(|bounds| bounds.to_rect())
                .unwrap_or_else(|| state.window.to_rect());
            (Rc::clone(target), rect)
        };
        push_bounds(push);
    }

    /// Release the provider subscription and cancel the armed commit.
    /// State read afterwards is frozen at the last commit and never pending.
    pub fn stop(&mut self) {
        {
            let mut state = self.state.borrow_mut();
            if !state.stopped {
                tracing::debug!("Stopping layout synchronizer");
            }
            state.stopped = true;
            state.commits.cancel();
            state.phase = SyncPhase::Stable;
        }
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state.borrow().stopped
    }

    pub fn window(&self) -> Metrics {
        self.state.borrow().window
    }

    pub fn screen(&self) -> Metrics {
        self.state.borrow().screen
    }

    /// State as of the last commit taken by [`poll`](Self::poll)
    pub fn orientation_state(&self) -> OrientationState {
        self.state.borrow().committed
    }

    /// Stays `Pending` past the deadline until [`poll`](Self::poll) takes the commit
    pub fn phase(&self) -> SyncPhase {
        self.state.borrow().phase
    }

    /// True between a raw metrics change and the poll that commits it
    pub fn is_changing(&self) -> bool {
        self.phase() == SyncPhase::Pending
    }

    /// When the armed commit becomes due, if one is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.borrow().commits.deadline()
    }
}

impl<C: Clock + 'static> Drop for LayoutSynchronizer<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
