//! Menu filter bindings.
//!
//! Buttons carry their category in a data attribute; items carry theirs as
//! classes. Style changes land on the items' inline style.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use shakes_site_core::{
    FilterCategory, FilterConfig, ItemStyle, MenuFilter, MenuFilterView, Result, SmolStr,
};

use crate::dom::{describe, query_all, set_class};
use crate::mount::Mounted;
use crate::timers::BrowserScheduler;

pub struct FilterDom {
    buttons: Vec<Element>,
    items: Vec<HtmlElement>,
    active_class: String,
}

impl MenuFilterView for FilterDom {
    fn set_button_active(&mut self, button: usize, active: bool) {
        if let Some(button) = self.buttons.get(button) {
            set_class(button, &self.active_class, active);
        }
    }

    fn apply_item_style(&mut self, item: usize, style: &ItemStyle) {
        let Some(item) = self.items.get(item) else {
            return;
        };
        let css = item.style();
        for (property, value) in style.properties() {
            if let Err(err) = css.set_property(property, &value) {
                warn!(property, error = %describe(&err), "failed to style menu item");
            }
        }
    }
}

fn item_tags(item: &Element) -> Vec<SmolStr> {
    item.class_name()
        .split_whitespace()
        .map(SmolStr::new)
        .collect()
}

pub fn mount(
    document: &Document,
    config: &FilterConfig,
    scheduler: &BrowserScheduler,
) -> Result<Option<Mounted>> {
    let items: Vec<HtmlElement> = query_all(document, &config.item_selector)?
        .into_iter()
        .filter_map(|item| item.dyn_into::<HtmlElement>().ok())
        .collect();
    if items.is_empty() {
        debug!("no menu items on this page");
        return Ok(None);
    }

    let buttons = query_all(document, &config.button_selector)?;
    let categories = buttons
        .iter()
        .map(|b| FilterCategory::from_attribute(b.get_attribute(&config.filter_attribute).as_deref()))
        .collect();
    let active = buttons
        .iter()
        .position(|b| b.class_list().contains(&config.active_class));
    let tags = items.iter().map(|item| item_tags(item)).collect();

    let filter = Rc::new(RefCell::new(MenuFilter::new(
        categories,
        tags,
        active,
        FilterDom {
            buttons: buttons.clone(),
            items,
            active_class: config.active_class.clone(),
        },
        *scheduler,
        config.clone(),
    )));
    filter.borrow_mut().init_transitions();

    let mut mounted = Mounted::new("menu-filter");
    for (index, button) in buttons.iter().enumerate() {
        let filter = filter.clone();
        mounted.listen(EventListener::new(button, "click", move |_| {
            filter.borrow_mut().select(index);
        }));
    }
    if mounted.listener_count() == 0 {
        debug!("menu items without filter buttons, transitions only");
    }

    Ok(mounted.into_option())
}
