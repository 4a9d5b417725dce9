//! Deferred tasks with cancellable handles.

use std::{cell::Cell, cell::RefCell, rc::Rc, time::Duration};

/// Runs a task once after a delay, on the same thread that scheduled it.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

/// A handle to a scheduled task.
///
/// Cloning the handle shares the underlying state. Dropping it does not cancel the task.
#[derive(Clone, Debug)]
pub struct TimerHandle {
    state: Rc<Cell<TimerState>>,
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHandle {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(TimerState::Pending)),
        }
    }

    /// Prevent the task from running. No effect once it has fired.
    pub fn cancel(&self) {
        if self.state.get() == TimerState::Pending {
            self.state.set(TimerState::Cancelled);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.get() == TimerState::Pending
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.get() == TimerState::Cancelled
    }

    pub fn has_fired(&self) -> bool {
        self.state.get() == TimerState::Fired
    }

    /// Wrap `task` so it only runs while this handle is still pending.
    ///
    /// Schedulers hand the wrapped task to their timer backend.
    pub fn guard(&self, task: Box<dyn FnOnce()>) -> impl FnOnce() + 'static {
        let state = self.state.clone();
        move || {
            if state.get() != TimerState::Pending {
                return;
            }
            state.set(TimerState::Fired);
            task();
        }
    }
}

struct Scheduled {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<Scheduled>,
}

/// A [`Scheduler`] driven by a virtual clock.
///
/// Nothing runs until [`ManualScheduler::advance`] moves the clock past a task's deadline.
/// Tasks due at the same instant run in the order they were scheduled.
#[derive(Default)]
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks that are scheduled and neither fired nor cancelled.
    pub fn pending(&self) -> usize {
        self.state
            .borrow()
            .queue
            .iter()
            .filter(|task| task.handle.is_pending())
            .count()
    }

    /// Move the clock forward by `by`, running every task that comes due on the way.
    ///
    /// Tasks scheduled by a running task fire in the same call if their deadline is
    /// reached. The clock reads each task's deadline while that task runs.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);
        while let Some(task) = self.pop_due(target) {
            task();
        }
    }

    fn pop_due(&self, target: Duration) -> Option<Box<dyn FnOnce()>> {
        let mut state = self.state.borrow_mut();
        let next = state
            .queue
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= target)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(idx, _)| idx);

        match next {
            Some(idx) => {
                let scheduled = state.queue.swap_remove(idx);
                state.now = scheduled.due;
                Some(scheduled.task)
            }
            None => {
                state.now = target;
                None
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut state = self.state.borrow_mut();
        let due = state.now.saturating_add(delay);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push(Scheduled {
            due,
            seq,
            handle: handle.clone(),
            task: Box::new(handle.guard(task)),
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let make = {
            let log = log.clone();
            move |name: &'static str| -> Box<dyn FnOnce()> {
                let log = log.clone();
                Box::new(move || log.borrow_mut().push(name))
            }
        };
        (log, make)
    }

    #[test]
    fn tasks_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(300), task("late"));
        scheduler.schedule(Duration::from_millis(100), task("early"));
        scheduler.schedule(Duration::from_millis(100), task("early-second"));

        scheduler.advance(Duration::from_millis(99));
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.pending(), 3);

        scheduler.advance(Duration::from_millis(201));
        assert_eq!(*log.borrow(), ["early", "early-second", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(300));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_tasks_never_run() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let handle = scheduler.schedule(Duration::from_millis(10), task("cancelled"));
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(scheduler.pending(), 0);

        scheduler.advance(Duration::from_millis(50));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn cancel_after_fire_is_ignored() {
        let scheduler = ManualScheduler::new();
        let (_log, task) = recorder();

        let handle = scheduler.schedule(Duration::ZERO, task("now"));
        scheduler.advance(Duration::ZERO);
        handle.cancel();

        assert!(handle.has_fired());
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn huge_delays_saturate_instead_of_overflowing() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.advance(Duration::from_millis(10));
        scheduler.schedule(Duration::MAX, task("never"));
        scheduler.advance(Duration::from_secs(3600));

        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn nested_tasks_fire_within_one_advance() {
        let scheduler = Rc::new(ManualScheduler::new());
        let fired_at = Rc::new(Cell::new(None));

        let inner = scheduler.clone();
        let slot = fired_at.clone();
        scheduler.schedule(
            Duration::from_millis(5000),
            Box::new(move || {
                let clock = inner.clone();
                inner.schedule(
                    Duration::from_millis(500),
                    Box::new(move || slot.set(Some(clock.now()))),
                );
            }),
        );

        scheduler.advance(Duration::from_millis(6000));
        assert_eq!(fired_at.get(), Some(Duration::from_millis(5500)));
        assert_eq!(scheduler.now(), Duration::from_millis(6000));
    }
}
