//! Mobile menu toggling and scroll-driven header styling.

use tracing::trace;

pub trait MenuView {
    fn set_open(&mut self, open: bool);
}

pub trait HeaderView {
    fn set_scrolled(&mut self, scrolled: bool);
}

/// The collapsible navigation menu.
pub struct MenuToggle<V> {
    open: bool,
    view: V,
}

impl<V: MenuView> MenuToggle<V> {
    /// `open` is whatever the markup shipped with.
    pub fn new(open: bool, view: V) -> Self {
        Self { open, view }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        trace!(open = self.open, "menu toggled");
        self.view.set_open(self.open);
    }

    /// Close on link click, whether or not the menu was open.
    pub fn close(&mut self) {
        self.open = false;
        self.view.set_open(false);
    }
}

/// Header style derived from the page's vertical scroll offset.
pub struct ScrollStyler<V> {
    threshold: f64,
    scrolled: bool,
    // recorded on every scroll but nothing reads it back for behaviour
    last_scroll: f64,
    view: V,
}

impl<V: HeaderView> ScrollStyler<V> {
    pub fn new(threshold: f64, view: V) -> Self {
        Self {
            threshold,
            scrolled: false,
            last_scroll: 0.0,
            view,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn last_scroll(&self) -> f64 {
        self.last_scroll
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Recompute the style from the absolute offset, so any drift between
    /// the view and this state corrects itself on the next scroll.
    pub fn on_scroll(&mut self, offset_y: f64) {
        self.scrolled = offset_y > self.threshold;
        self.view.set_scrolled(self.scrolled);
        self.last_scroll = offset_y;
    }
}
