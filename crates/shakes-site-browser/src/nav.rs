//! Mobile menu and header bindings.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use tracing::{debug, warn};
use web_sys::{Document, Element, Window};

use shakes_site_core::{HeaderView, MenuToggle, MenuView, NavConfig, Result, ScrollStyler};

use crate::dom::{describe, query_all, set_class};
use crate::mount::Mounted;

/// A single class switched on and off on one element.
pub struct ClassSwitch {
    element: Element,
    class: String,
}

impl ClassSwitch {
    pub fn new(element: Element, class: &str) -> Self {
        Self {
            element,
            class: class.to_string(),
        }
    }
}

impl MenuView for ClassSwitch {
    fn set_open(&mut self, open: bool) {
        set_class(&self.element, &self.class, open);
    }
}

impl HeaderView for ClassSwitch {
    fn set_scrolled(&mut self, scrolled: bool) {
        set_class(&self.element, &self.class, scrolled);
    }
}

pub fn mount(window: &Window, document: &Document, config: &NavConfig) -> Result<Option<Mounted>> {
    let mut mounted = Mounted::new("navigation");

    match document.get_element_by_id(&config.menu_id) {
        Some(menu_el) => {
            let open = menu_el.class_list().contains(&config.open_class);
            let menu = Rc::new(RefCell::new(MenuToggle::new(
                open,
                ClassSwitch::new(menu_el, &config.open_class),
            )));

            if let Some(toggle) = document.get_element_by_id(&config.toggle_id) {
                let menu = menu.clone();
                mounted.listen(EventListener::new(&toggle, "click", move |_| {
                    menu.borrow_mut().toggle();
                }));
            }

            for link in query_all(document, &config.link_selector)? {
                let menu = menu.clone();
                mounted.listen(EventListener::new(&link, "click", move |_| {
                    menu.borrow_mut().close();
                }));
            }
        }
        None => debug!(id = %config.menu_id, "no navigation menu on this page"),
    }

    match document.get_element_by_id(&config.header_id) {
        Some(header) => {
            let styler = Rc::new(RefCell::new(ScrollStyler::new(
                config.scroll_threshold_px,
                ClassSwitch::new(header, &config.scrolled_class),
            )));
            let win = window.clone();
            mounted.listen(EventListener::new(window, "scroll", move |_| {
                match win.scroll_y() {
                    Ok(offset) => styler.borrow_mut().on_scroll(offset),
                    Err(err) => warn!(error = %describe(&err), "could not read scroll offset"),
                }
            }));
        }
        None => debug!(id = %config.header_id, "no header on this page"),
    }

    Ok(mounted.into_option())
}
