//! `Scheduler` backed by the browser's timers.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use shakes_site_core::{Scheduler, TaskHandle, track_completion};

/// Dropping a handle clears the underlying `setTimeout`/`setInterval`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule_once(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TaskHandle {
        let (finished, task) = track_completion(task);
        let timeout = Timeout::new(delay_ms, task);
        TaskHandle::new(finished, move || drop(timeout))
    }

    fn schedule_repeating(&self, interval_ms: u32, mut task: Box<dyn FnMut()>) -> TaskHandle {
        let interval = Interval::new(interval_ms, move || task());
        TaskHandle::new(Rc::new(Cell::new(false)), move || drop(interval))
    }
}
