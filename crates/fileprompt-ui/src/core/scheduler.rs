//! Deferred callbacks for feedback reverts.
//!
//! # Design
//! - The browser scheduler lives in the wasm app; this module only defines the seam.
//! - Cancellation is a shared flag checked when the timer fires, so dropping a
//!   handle never tears down a closure that is currently running.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Schedules one-shot callbacks on the UI event loop.
pub trait Scheduler {
    /// Run `callback` once after `delay_ms`, unless the returned handle is cancelled.
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Cancellation side of a scheduled callback. Dropping the handle cancels it.
#[derive(Debug)]
pub struct TimerHandle {
    cancelled: Rc<Cell<bool>>,
}

/// Firing side of a scheduled callback.
#[derive(Clone, Debug)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
    /// Create a linked handle and token.
    #[must_use]
    pub fn pair() -> (Self, CancelToken) {
        let cancelled = Rc::new(Cell::new(false));
        (
            Self {
                cancelled: Rc::clone(&cancelled),
            },
            CancelToken { cancelled },
        )
    }

    /// Cancel the pending callback.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl CancelToken {
    /// Whether the handle was cancelled or dropped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct PendingTimer {
    due_ms: u64,
    seq: u64,
    token: CancelToken,
    callback: Box<dyn FnOnce()>,
}

/// Deterministic scheduler driven by an explicit clock.
///
/// Used by headless runs and tests: time only moves when [`ManualScheduler::advance`]
/// is called, and due callbacks fire in deadline order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    now_ms: Rc<Cell<u64>>,
    next_seq: Rc<Cell<u64>>,
    pending: Rc<RefCell<Vec<PendingTimer>>>,
}

impl ManualScheduler {
    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of callbacks still waiting (cancelled ones excluded).
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
            .borrow()
            .iter()
            .filter(|timer| !timer.token.is_cancelled())
            .count()
    }

    /// Move the clock forward, firing every callback that becomes due.
    ///
    /// Returns how many callbacks ran.
    pub fn advance(&self, delta_ms: u64) -> usize {
        let target = self.now_ms.get().saturating_add(delta_ms);
        let mut fired = 0;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                pending.retain(|timer| !timer.token.is_cancelled());
                let due = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due_ms <= target)
                    .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
                    .map(|(index, _)| index);
                due.map(|index| pending.remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            self.now_ms.set(timer.due_ms);
            (timer.callback)();
            fired += 1;
        }
        self.now_ms.set(target);
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let (handle, token) = TimerHandle::pair();
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending.borrow_mut().push(PendingTimer {
            due_ms: self.now_ms.get().saturating_add(u64::from(delay_ms)),
            seq,
            token,
            callback,
        });
        handle
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now_ms", &self.now_ms.get())
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_fire_once_when_due() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _handle = scheduler.schedule(100, Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(scheduler.advance(99), 0);
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(scheduler.advance(1_000), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dropped_handles_cancel() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let handle = scheduler.schedule(10, Box::new(move || counter.set(counter.get() + 1)));
        handle.cancel();
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.advance(50), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn due_callbacks_run_in_deadline_order() {
        let scheduler = ManualScheduler::default();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handles = Vec::new();
        for (delay, label) in [(30, "late"), (10, "early"), (20, "middle")] {
            let order = Rc::clone(&order);
            handles.push(scheduler.schedule(delay, Box::new(move || order.borrow_mut().push(label))));
        }
        scheduler.advance(30);
        assert_eq!(*order.borrow(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn callbacks_may_schedule_more_work() {
        let scheduler = ManualScheduler::default();
        let hits = Rc::new(Cell::new(0));
        let inner_scheduler = scheduler.clone();
        let counter = Rc::clone(&hits);
        let keep = Rc::new(RefCell::new(None));
        let keep_inner = Rc::clone(&keep);
        let _outer = scheduler.schedule(
            5,
            Box::new(move || {
                let counter = Rc::clone(&counter);
                *keep_inner.borrow_mut() = Some(
                    inner_scheduler.schedule(5, Box::new(move || counter.set(counter.get() + 1))),
                );
            }),
        );
        assert_eq!(scheduler.advance(10), 2);
        assert_eq!(hits.get(), 1);
    }
}
