// ABOUTME: Cancellable single-shot delayed execution driven by a pluggable clock.
// ABOUTME: Rescheduling replaces the pending task so only the last one fires.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic time for schedulers
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by `Instant::now`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock that only moves when advanced. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

struct Pending<T> {
    deadline: Instant,
    task: T,
}

/// Holds at most one pending task and the instant it becomes due.
///
/// The scheduler never runs anything on its own. The owning event loop
/// calls [`take_due`](Self::take_due) or [`run_due`](Self::run_due), and can
/// sleep until [`deadline`](Self::deadline) in between.
pub struct DebounceScheduler<T, C: Clock = SystemClock> {
    clock: C,
    pending: Option<Pending<T>>,
}

impl<T> DebounceScheduler<T, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<T> Default for DebounceScheduler<T, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clock> DebounceScheduler<T, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: None,
        }
    }

    /// Arm `task` to become due `delay` from now.
    /// Returns the task it superseded, which will never fire.
    pub fn schedule(&mut self, delay: Duration, task: T) -> Option<T> {
        let deadline = self.clock.now() + delay;
        self.pending
            .replace(Pending { deadline, task })
            .map(|superseded| superseded.task)
    }

    /// Drop the pending task without firing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.task)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Remove and return the pending task if its deadline has been reached.
    /// The slot is empty by the time the caller runs the task.
    pub fn take_due(&mut self) -> Option<T> {
        let now = self.clock.now();
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if due {
            self.pending.take().map(|pending| pending.task)
        } else {
            None
        }
    }
}

impl<F: FnOnce(), C: Clock> DebounceScheduler<F, C> {
    /// Run the pending closure if it is due. Returns whether it ran.
    pub fn run_due(&mut self) -> bool {
        match self.take_due() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Task<'a> = Box<dyn FnOnce() + 'a>;

    #[test]
    fn only_last_scheduled_task_fires() {
        let clock = ManualClock::new();
        let fired = RefCell::new(Vec::new());
        let mut scheduler: DebounceScheduler<Task<'_>, _> =
            DebounceScheduler::with_clock(clock.clone());

        for i in 0..5 {
            let fired = &fired;
            let task: Task<'_> = Box::new(move || fired.borrow_mut().push(i));
            scheduler.schedule(Duration::from_millis(400), task);
            clock.advance_ms(100);
        }

        // 400ms after the last call is 300ms from now
        clock.advance_ms(299);
        assert!(!scheduler.run_due());
        clock.advance_ms(1);
        assert!(scheduler.run_due());
        assert!(!scheduler.run_due());

        clock.advance_ms(5000);
        assert!(!scheduler.run_due());
        assert_eq!(*fired.borrow(), vec![4]);
    }

    #[test]
    fn schedule_returns_superseded_task() {
        let mut scheduler = DebounceScheduler::with_clock(ManualClock::new());
        assert_eq!(scheduler.schedule(Duration::from_millis(10), "first"), None);
        assert_eq!(scheduler.schedule(Duration::from_millis(10), "second"), Some("first"));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let clock = ManualClock::new();
        let mut scheduler = DebounceScheduler::with_clock(clock.clone());
        scheduler.schedule(Duration::from_millis(50), 7u32);

        assert_eq!(scheduler.cancel(), Some(7));
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.deadline(), None);

        clock.advance_ms(1000);
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut scheduler = DebounceScheduler::with_clock(ManualClock::new());
        scheduler.schedule(Duration::ZERO, ());
        assert_eq!(scheduler.take_due(), Some(()));
    }

    #[test]
    fn deadline_tracks_last_schedule() {
        let clock = ManualClock::new();
        let mut scheduler = DebounceScheduler::with_clock(clock.clone());
        scheduler.schedule(Duration::from_millis(400), ());
        let first = scheduler.deadline().unwrap();

        clock.advance_ms(100);
        scheduler.schedule(Duration::from_millis(400), ());
        let second = scheduler.deadline().unwrap();

        assert_eq!(second - first, Duration::from_millis(100));
    }

    #[test]
    fn slot_is_free_once_task_is_taken() {
        let clock = ManualClock::new();
        let mut scheduler = DebounceScheduler::with_clock(clock.clone());
        scheduler.schedule(Duration::from_millis(10), 1);
        clock.advance_ms(10);

        assert_eq!(scheduler.take_due(), Some(1));
        assert!(!scheduler.is_pending());

        // A task armed after firing is independent of the one that fired
        scheduler.schedule(Duration::from_millis(10), 2);
        assert_eq!(scheduler.take_due(), None);
        clock.advance_ms(10);
        assert_eq!(scheduler.take_due(), Some(2));
    }

    #[test]
    fn system_clock_zero_delay_runs() {
        let ran = Cell::new(false);
        let mut scheduler: DebounceScheduler<Task<'_>> = DebounceScheduler::new();
        scheduler.schedule(Duration::ZERO, Box::new(|| ran.set(true)));
        assert!(scheduler.run_due());
        assert!(ran.get());
    }
}
