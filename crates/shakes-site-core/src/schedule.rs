//! Scheduled tasks and the clocks that run them.
//!
//! Components never talk to timers directly. They go through a `Scheduler`,
//! which hands back a `TaskHandle` tied to the component's lifetime: dropping
//! the handle cancels a task that hasn't run yet. The browser layer backs this
//! with `setTimeout`/`setInterval`; tests use `VirtualClock` and step time by
//! hand.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

/// Something that can run tasks later.
pub trait Scheduler {
    /// Run `task` once, `delay_ms` from now.
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle;

    /// Run `task` every `interval_ms`, starting one interval from now, until
    /// the handle is dropped.
    fn schedule_repeating(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle;
}

/// Owning handle to a scheduled task.
///
/// Dropping it cancels the task unless it already ran to completion.
pub struct TaskHandle {
    finished: Rc<Cell<bool>>,
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TaskHandle {
    /// Create a handle from a shared completion flag and a cancel action.
    ///
    /// The scheduler sets `finished` once a one-shot task has run.
    pub fn new(finished: Rc<Cell<bool>>, cancel: impl FnOnce() + 'static) -> Self {
        Self {
            finished,
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Whether a one-shot task has already run. Repeating tasks never finish.
    pub fn is_finished(&self) -> bool {
        self.finished.get()
    }

    /// Cancel explicitly. Same as dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("finished", &self.finished.get())
            .finish()
    }
}

/// Wrap a one-shot task so it flips a shared flag after running.
pub fn track_completion(task: Box<dyn FnOnce()>) -> (Rc<Cell<bool>>, impl FnOnce() + 'static) {
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();
    let wrapped = move || {
        task();
        flag.set(true);
    };
    (finished, wrapped)
}

enum ScheduledTask {
    Once(Box<dyn FnOnce()>),
    Repeating {
        interval: u64,
        task: Box<dyn FnMut()>,
    },
}

#[derive(Default)]
struct ClockInner {
    now: u64,
    next_id: u64,
    // (due, id) so equal due times run in scheduling order
    queue: BTreeSet<(u64, u64)>,
    tasks: HashMap<u64, ScheduledTask>,
    // ids cancelled while their task was running
    cancelled: HashSet<u64>,
}

/// Deterministic scheduler for tests.
///
/// Time only moves when `advance` is called. Tasks due within the advanced
/// window run in due-time order, and tasks they schedule run too if they fall
/// inside the window.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the clock was created.
    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Move time forward by `ms`, running everything that comes due.
    pub fn advance(&self, ms: u64) {
        let target = self.inner.borrow().now + ms;

        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                match inner.queue.first().copied() {
                    Some((due, id)) if due <= target => {
                        inner.queue.remove(&(due, id));
                        inner.now = due;
                        inner.tasks.remove(&id).map(|task| (due, id, task))
                    }
                    _ => break,
                }
            };

            // cancelled tasks leave their queue entry behind
            let Some((due, id, task)) = next else {
                continue;
            };

            match task {
                ScheduledTask::Once(task) => task(),
                ScheduledTask::Repeating { interval, mut task } => {
                    task();
                    let mut inner = self.inner.borrow_mut();
                    if !inner.cancelled.remove(&id) {
                        inner.queue.insert((due + interval, id));
                        inner
                            .tasks
                            .insert(id, ScheduledTask::Repeating { interval, task });
                    }
                }
            }
        }

        self.inner.borrow_mut().now = target;
    }

    fn insert(&self, delay: u64, task: ScheduledTask) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.queue.insert((due, id));
        inner.tasks.insert(id, task);
        id
    }

    fn cancel_fn(&self, id: u64) -> impl FnOnce() + 'static {
        let inner = Rc::downgrade(&self.inner);
        move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let removed = {
                let Ok(mut inner) = inner.try_borrow_mut() else {
                    return;
                };
                // the task may be mid-run, in which case it's not in the map
                let removed = inner.tasks.remove(&id);
                if removed.is_none() {
                    inner.cancelled.insert(id);
                }
                removed
            };
            // dropped outside the borrow, the task may own handles of its own
            drop(removed);
        }
    }
}

impl Scheduler for VirtualClock {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let (finished, task) = track_completion(task);
        let id = self.insert(delay_ms as u64, ScheduledTask::Once(Box::new(task)));
        let cancel = self.cancel_fn(id);
        let done = finished.clone();
        TaskHandle::new(finished, move || {
            if !done.get() {
                cancel();
            }
        })
    }

    fn schedule_repeating(&self, interval_ms: u32, task: Box<dyn FnMut()>) -> TaskHandle {
        // a zero interval would never let time advance
        let interval = (interval_ms as u64).max(1);
        let id = self.insert(interval, ScheduledTask::Repeating { interval, task });
        TaskHandle::new(Rc::new(Cell::new(false)), self.cancel_fn(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn FnOnce()>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |name: &'static str| {
            let sink = sink.clone();
            Box::new(move || sink.borrow_mut().push(name)) as Box<dyn FnOnce()>
        };
        (log, make)
    }

    #[test]
    fn test_once_runs_when_due() {
        let clock = VirtualClock::new();
        let (log, make) = recorder();

        let handle = clock.schedule_once(300, make("fade"));
        clock.advance(299);
        assert!(log.borrow().is_empty());
        assert!(!handle.is_finished());

        clock.advance(1);
        assert_eq!(*log.borrow(), vec!["fade"]);
        assert!(handle.is_finished());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_due_order_and_fifo_ties() {
        let clock = VirtualClock::new();
        let (log, make) = recorder();

        let _a = clock.schedule_once(300, make("late"));
        let _b = clock.schedule_once(10, make("early-1"));
        let _c = clock.schedule_once(10, make("early-2"));
        clock.advance(1000);

        assert_eq!(*log.borrow(), vec!["early-1", "early-2", "late"]);
    }

    #[test]
    fn test_drop_cancels_pending() {
        let clock = VirtualClock::new();
        let (log, make) = recorder();

        let handle = clock.schedule_once(10, make("never"));
        drop(handle);
        clock.advance(100);

        assert!(log.borrow().is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let clock = VirtualClock::new();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();

        let handle = clock.schedule_repeating(5000, Box::new(move || c.set(c.get() + 1)));
        clock.advance(4999);
        assert_eq!(count.get(), 0);
        clock.advance(1);
        assert_eq!(count.get(), 1);
        clock.advance(15_000);
        assert_eq!(count.get(), 4);
        assert_eq!(clock.now(), 20_000);

        handle.cancel();
        clock.advance(50_000);
        assert_eq!(count.get(), 4);
    }

    #[test]
    fn test_task_scheduled_from_task_runs_in_window() {
        let clock = VirtualClock::new();
        let (log, make) = recorder();

        let inner_clock = clock.clone();
        let held: Rc<RefCell<Vec<TaskHandle>>> = Rc::default();
        let holder = held.clone();
        let _outer = clock.schedule_once(
            10,
            Box::new(move || {
                let handle = inner_clock.schedule_once(20, make("nested"));
                holder.borrow_mut().push(handle);
            }),
        );

        clock.advance(29);
        assert!(log.borrow().is_empty());
        clock.advance(1);
        assert_eq!(*log.borrow(), vec!["nested"]);
    }
}
