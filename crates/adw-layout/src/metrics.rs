// ABOUTME: Port for reading viewport metrics and subscribing to their changes.
// ABOUTME: Includes an in-process broadcaster that platform glue and tests can drive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use adw_core::{Metrics, MetricsKind};

/// Receives the new window and screen metrics after a change
pub type ChangeHandler = Box<dyn FnMut(Metrics, Metrics)>;

/// Handle returned by [`MetricsProvider::on_change`]
pub trait Subscription {
    /// Stop delivering change events. Calling more than once has no effect.
    fn release(&mut self);
}

/// Source of the current window and screen metrics
pub trait MetricsProvider {
    fn current(&self, kind: MetricsKind) -> Metrics;

    /// Register a change handler. Providers that cannot hand out a
    /// subscription handle return `None`.
    fn on_change(&self, handler: ChangeHandler) -> Option<Box<dyn Subscription>>;
}

type SharedHandler = Rc<RefCell<ChangeHandler>>;

struct Registry {
    window: Metrics,
    screen: Metrics,
    next_id: u64,
    handlers: Vec<(u64, SharedHandler)>,
}

impl Registry {
    fn is_registered(&self, id: u64) -> bool {
        self.handlers.iter().any(|(handler_id, _)| *handler_id == id)
    }
}

/// Metrics provider fed by whoever owns the platform events.
///
/// Cloning yields another handle to the same metrics and handler list.
#[derive(Clone)]
pub struct MetricsBroadcaster {
    registry: Rc<RefCell<Registry>>,
}

impl MetricsBroadcaster {
    pub fn new(window: Metrics, screen: Metrics) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                window,
                screen,
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Replace both snapshots and notify every live handler in registration order
    pub fn emit(&self, window: Metrics, screen: Metrics) {
        let handlers: Vec<(u64, SharedHandler)> = {
            let mut registry = self.registry.borrow_mut();
            registry.window = window;
            registry.screen = screen;
            registry
                .handlers
                .iter()
                .map(|(id, handler)| (*id, Rc::clone(handler)))
                .collect()
        };

        for (id, handler) in handlers {
            // An earlier handler may have released this one
            if !self.registry.borrow().is_registered(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => (*handler)(window, screen),
                Err(_) => tracing::warn!(id, "Skipping metrics handler re-entered during emit"),
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl MetricsProvider for MetricsBroadcaster {
    fn current(&self, kind: MetricsKind) -> Metrics {
        let registry = self.registry.borrow();
        match kind {
            MetricsKind::Window => registry.window,
            MetricsKind::Screen => registry.screen,
        }
    }

    fn on_change(&self, handler: ChangeHandler) -> Option<Box<dyn Subscription>> {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Rc::new(RefCell::new(handler))));
        Some(Box::new(BroadcastSubscription {
            registry: Rc::downgrade(&self.registry),
            id,
            released: false,
        }))
    }
}

struct BroadcastSubscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
    released: bool,
}

impl Subscription for BroadcastSubscription {
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for BroadcastSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn recorder(log: &Rc<RefCell<Vec<(f64, f64)>>>) -> ChangeHandler {
        let log = Rc::clone(log);
        Box::new(move |window: Metrics, _screen: Metrics| {
            log.borrow_mut().push((window.width, window.height))
        })
    }

    #[test]
    fn current_reflects_last_emit() {
        let broadcaster =
            MetricsBroadcaster::new(Metrics::new(100.0, 200.0), Metrics::new(1000.0, 2000.0));
        assert_eq!(broadcaster.current(MetricsKind::Window).width, 100.0);

        broadcaster.emit(Metrics::new(300.0, 400.0), Metrics::new(3000.0, 4000.0));
        assert_eq!(broadcaster.current(MetricsKind::Window), Metrics::new(300.0, 400.0));
        assert_eq!(broadcaster.current(MetricsKind::Screen), Metrics::new(3000.0, 4000.0));
    }

    #[test]
    fn handlers_receive_changes_until_released() {
        let broadcaster = MetricsBroadcaster::new(Metrics::default(), Metrics::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subscription = broadcaster.on_change(recorder(&log)).unwrap();

        broadcaster.emit(Metrics::new(1.0, 2.0), Metrics::default());
        subscription.release();
        subscription.release();
        broadcaster.emit(Metrics::new(3.0, 4.0), Metrics::default());

        assert_eq!(*log.borrow(), vec![(1.0, 2.0)]);
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[test]
    fn dropping_subscription_releases_it() {
        let broadcaster = MetricsBroadcaster::new(Metrics::default(), Metrics::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        drop(broadcaster.on_change(recorder(&log)));

        broadcaster.emit(Metrics::new(1.0, 2.0), Metrics::default());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn handler_released_mid_dispatch_is_skipped() {
        let broadcaster = MetricsBroadcaster::new(Metrics::default(), Metrics::default());
        let second_calls = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Box<dyn Subscription>>>> = Rc::new(RefCell::new(None));

        let release_slot = Rc::clone(&slot);
        let _first = broadcaster.on_change(Box::new(move |_: Metrics, _: Metrics| {
            if let Some(mut subscription) = release_slot.borrow_mut().take() {
                subscription.release();
            }
        }));

        let counter = Rc::clone(&second_calls);
        *slot.borrow_mut() = broadcaster.on_change(Box::new(move |_: Metrics, _: Metrics| {
            counter.set(counter.get() + 1)
        }));

        broadcaster.emit(Metrics::new(1.0, 1.0), Metrics::default());
        broadcaster.emit(Metrics::new(2.0, 2.0), Metrics::default());
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn release_after_broadcaster_dropped_is_harmless() {
        let broadcaster = MetricsBroadcaster::new(Metrics::default(), Metrics::default());
        let mut subscription = broadcaster
            .on_change(Box::new(|_: Metrics, _: Metrics| {}))
            .unwrap();
        drop(broadcaster);
        subscription.release();
    }
}
