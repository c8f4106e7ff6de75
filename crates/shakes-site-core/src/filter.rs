//! Category filter for the menu listing.
//!
//! # How it works
//!
//! 1. Clicking a filter button makes it the single active button
//! 2. Every item carrying the button's category (or every item, for `all`)
//!    is put back into layout, then faded in a moment later
//! 3. Every other item fades out first and leaves layout once the fade is done
//!
//! The delayed half of each step goes through a `Scheduler`, so the ordering
//! (display before fade-in, fade-out before display:none) can be checked
//! against a `VirtualClock`.

use std::cell::RefCell;
use std::rc::Rc;

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::config::FilterConfig;
use crate::schedule::{Scheduler, TaskHandle};

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCategory {
    All,
    Tag(SmolStr),
}

impl FilterCategory {
    /// Read a button's filter attribute. A button without one matches nothing.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some(ALL) => FilterCategory::All,
            Some(tag) => FilterCategory::Tag(SmolStr::new(tag)),
            None => FilterCategory::Tag(SmolStr::default()),
        }
    }

    pub fn matches(&self, tags: &[SmolStr]) -> bool {
        match self {
            FilterCategory::All => true,
            FilterCategory::Tag(tag) => !tag.is_empty() && tags.iter().any(|t| t == tag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

/// One style mutation on a menu item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemStyle {
    Transition(SmolStr),
    Display(Display),
    /// Full opacity, natural size.
    Shown,
    /// Transparent, shrunk to 80%.
    Faded,
}

impl ItemStyle {
    /// The CSS property assignments this change consists of.
    pub fn properties(&self) -> Vec<(&'static str, SmolStr)> {
        match self {
            ItemStyle::Transition(value) => vec![("transition", value.clone())],
            ItemStyle::Display(Display::Block) => vec![("display", "block".into())],
            ItemStyle::Display(Display::None) => vec![("display", "none".into())],
            ItemStyle::Shown => vec![("opacity", "1".into()), ("transform", "scale(1)".into())],
            ItemStyle::Faded => vec![("opacity", "0".into()), ("transform", "scale(0.8)".into())],
        }
    }
}

/// Presentation side of the filter.
pub trait MenuFilterView {
    fn set_button_active(&mut self, button: usize, active: bool);

    fn apply_item_style(&mut self, item: usize, style: &ItemStyle);
}

pub struct MenuFilter<V, S> {
    buttons: Vec<FilterCategory>,
    items: Vec<Vec<SmolStr>>,
    active: Option<usize>,
    view: Rc<RefCell<V>>,
    scheduler: S,
    config: FilterConfig,
    // delayed phases still waiting to run; never cancelled early
    pending: Vec<TaskHandle>,
}

impl<V, S> MenuFilter<V, S>
where
    V: MenuFilterView + 'static,
    S: Scheduler,
{
    pub fn new(
        buttons: Vec<FilterCategory>,
        items: Vec<Vec<SmolStr>>,
        active: Option<usize>,
        view: V,
        scheduler: S,
        config: FilterConfig,
    ) -> Self {
        Self {
            buttons,
            items,
            active,
            view: Rc::new(RefCell::new(view)),
            scheduler,
            config,
            pending: Vec::new(),
        }
    }

    pub fn active_button(&self) -> Option<usize> {
        self.active
    }

    pub fn view(&self) -> &Rc<RefCell<V>> {
        &self.view
    }

    /// Give every item its standing transition. Safe to call repeatedly.
    pub fn init_transitions(&mut self) {
        let style = ItemStyle::Transition(SmolStr::new(&self.config.transition));
        let mut view = self.view.borrow_mut();
        for item in 0..self.items.len() {
            view.apply_item_style(item, &style);
        }
    }

    /// Handle a click on filter button `button`.
    pub fn select(&mut self, button: usize) {
        let Some(category) = self.buttons.get(button).cloned() else {
            return;
        };

        {
            let mut view = self.view.borrow_mut();
            for index in 0..self.buttons.len() {
                view.set_button_active(index, index == button);
            }
        }
        self.active = Some(button);

        debug!(?category, "applying menu filter");
        self.apply(&category);
    }

    /// Show items matching `category` and hide the rest.
    pub fn apply(&mut self, category: &FilterCategory) {
        self.pending.retain(|task| !task.is_finished());

        for (index, tags) in self.items.iter().enumerate() {
            let view = self.view.clone();
            if category.matches(tags) {
                trace!(item = index, "showing menu item");
                self.view
                    .borrow_mut()
                    .apply_item_style(index, &ItemStyle::Display(Display::Block));
                self.pending.push(self.scheduler.schedule_once(
                    self.config.fade_in_delay_ms,
                    Box::new(move || view.borrow_mut().apply_item_style(index, &ItemStyle::Shown)),
                ));
            } else {
                trace!(item = index, "hiding menu item");
                self.view
                    .borrow_mut()
                    .apply_item_style(index, &ItemStyle::Faded);
                self.pending.push(self.scheduler.schedule_once(
                    self.config.fade_out_ms,
                    Box::new(move || {
                        view.borrow_mut()
                            .apply_item_style(index, &ItemStyle::Display(Display::None))
                    }),
                ));
            }
        }
    }
}
