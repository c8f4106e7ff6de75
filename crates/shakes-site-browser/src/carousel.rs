//! Carousel bindings: buttons, autoplay and touch swipes on the track.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, TouchEvent, TouchList};

use shakes_site_core::{
    Carousel, CarouselConfig, CarouselState, CarouselView, Result, SiteError, start_autoplay,
};

use crate::dom::{describe, query_all_in};
use crate::mount::Mounted;
use crate::timers::BrowserScheduler;

/// Positions the track element with a CSS transform.
pub struct TrackView {
    track: HtmlElement,
}

impl CarouselView for TrackView {
    fn render(&mut self, state: &CarouselState) {
        let transform = state.track_transform();
        if let Err(err) = self.track.style().set_property("transform", &transform) {
            warn!(error = %describe(&err), "failed to move carousel track");
        }
    }
}

fn first_touch_x(event: &Event, list: fn(&TouchEvent) -> TouchList) -> Option<f64> {
    let touch = list(event.dyn_ref::<TouchEvent>()?).get(0)?;
    Some(touch.client_x() as f64)
}

pub fn mount(
    document: &Document,
    config: &CarouselConfig,
    scheduler: &BrowserScheduler,
) -> Result<Option<Mounted>> {
    let (Some(track), Some(prev), Some(next)) = (
        document.get_element_by_id(&config.track_id),
        document.get_element_by_id(&config.prev_id),
        document.get_element_by_id(&config.next_id),
    ) else {
        debug!("no carousel on this page");
        return Ok(None);
    };

    let track: HtmlElement = track.dyn_into().map_err(|_| SiteError::Js {
        context: "carousel track",
        message: "not an HTML element".into(),
    })?;

    let slides = query_all_in(&track, &config.slide_selector)?;
    let slide_width = slides
        .first()
        .and_then(|slide| slide.dyn_ref::<HtmlElement>())
        .map(|slide| slide.offset_width() as f64);
    let state = CarouselState::new(slides.len(), slide_width, config);
    debug!(
        slides = state.total_slides(),
        advance = state.slide_advance(),
        "mounting carousel"
    );

    let carousel = Rc::new(RefCell::new(Carousel::new(
        state,
        config.swipe_threshold_px,
        TrackView {
            track: track.clone(),
        },
    )));

    let mut mounted = Mounted::new("carousel");

    let c = carousel.clone();
    mounted.listen(EventListener::new(&next, "click", move |_| {
        c.borrow_mut().next();
    }));

    let c = carousel.clone();
    mounted.listen(EventListener::new(&prev, "click", move |_| {
        c.borrow_mut().prev();
    }));

    let c = carousel.clone();
    mounted.listen(EventListener::new(&track, "touchstart", move |event| {
        if let Some(x) = first_touch_x(event, TouchEvent::touches) {
            c.borrow_mut().touch_start(x);
        }
    }));

    let c = carousel.clone();
    mounted.listen(EventListener::new_with_options(
        &track,
        "touchmove",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            if c.borrow().touch_move() {
                event.prevent_default();
            }
        },
    ));

    let c = carousel.clone();
    mounted.listen(EventListener::new(&track, "touchend", move |event| {
        if let Some(x) = first_touch_x(event, TouchEvent::changed_touches) {
            c.borrow_mut().touch_end(x);
        }
    }));

    mounted.hold_task(start_autoplay(
        &carousel,
        scheduler,
        config.autoplay_interval_ms,
    ));

    Ok(Some(mounted))
}
