//! Ownership of everything a mounted component registered with the page.

use std::any::Any;

use gloo_events::EventListener;
use shakes_site_core::TaskHandle;

/// Listeners, timers and other JS-side resources of one component.
///
/// Dropping it detaches the listeners and cancels pending timers.
pub struct Mounted {
    name: &'static str,
    listeners: Vec<EventListener>,
    tasks: Vec<TaskHandle>,
    keep_alive: Vec<Box<dyn Any>>,
}

impl Mounted {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: Vec::new(),
            tasks: Vec::new(),
            keep_alive: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn listen(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn hold_task(&mut self, task: TaskHandle) {
        self.tasks.push(task);
    }

    /// Keep `value` alive for as long as the component is mounted.
    pub fn hold(&mut self, value: impl Any) {
        self.keep_alive.push(Box::new(value));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// `None` when the component ended up with nothing to own.
    pub fn into_option(self) -> Option<Self> {
        if self.listeners.is_empty() && self.tasks.is_empty() && self.keep_alive.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl std::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("name", &self.name)
            .field("listeners", &self.listeners.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
