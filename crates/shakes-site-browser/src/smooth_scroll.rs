use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use shakes_site_core::{Result, ScrollConfig, ScrollView, SmoothScroller};

use crate::dom::query_all;
use crate::mount::Mounted;

pub struct WindowScroll {
    window: Window,
    document: Document,
}

impl ScrollView for WindowScroll {
    fn element_top(&self, id: &str) -> Option<f64> {
        let element = self.document.get_element_by_id(id)?;
        let element = element.dyn_ref::<HtmlElement>()?;
        Some(element.offset_top() as f64)
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn mount(window: &Window, document: &Document, config: &ScrollConfig) -> Result<Option<Mounted>> {
    let anchors = query_all(document, &config.anchor_selector)?;
    if anchors.is_empty() {
        debug!("no same-page anchors on this page");
        return Ok(None);
    }

    let scroller = Rc::new(RefCell::new(SmoothScroller::new(
        config.header_offset_px,
        WindowScroll {
            window: window.clone(),
            document: document.clone(),
        },
    )));

    let mut mounted = Mounted::new("smooth-scroll");
    for anchor in anchors {
        let scroller = scroller.clone();
        let link = anchor.clone();
        mounted.listen(EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let href = link.get_attribute("href").unwrap_or_default();
                if scroller.borrow_mut().on_click(&href) {
                    event.prevent_default();
                }
            },
        ));
    }

    Ok(Some(mounted))
}
