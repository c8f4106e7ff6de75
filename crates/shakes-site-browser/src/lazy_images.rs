//! IntersectionObserver-driven image loading.

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, Window};

use shakes_site_core::lazy::{on_intersection, reveal};
use shakes_site_core::{LazyConfig, LazyImage, LazyStrategy, Result};

use crate::dom::{JsResultExt, describe, query_all};
use crate::mount::Mounted;

pub struct DeferredImage<'a> {
    element: &'a Element,
    attribute: &'a str,
}

impl LazyImage for DeferredImage<'_> {
    fn deferred_source(&self) -> Option<String> {
        self.element.get_attribute(self.attribute)
    }

    fn load(&self, source: &str) {
        if let Err(err) = self.element.set_attribute("src", source) {
            warn!(error = %describe(&err), "failed to set image source");
        }
        if let Err(err) = self.element.remove_attribute(self.attribute) {
            warn!(error = %describe(&err), "failed to clear deferred source");
        }
    }
}

/// Disconnects the observer before its callback is freed.
struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observer_available(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

pub fn mount(window: &Window, document: &Document, config: &LazyConfig) -> Result<Option<Mounted>> {
    let images = query_all(document, &config.image_selector)?;
    if images.is_empty() {
        return Ok(None);
    }

    match LazyStrategy::choose(observer_available(window), config.fallback) {
        LazyStrategy::Disabled => {
            debug!(count = images.len(), "no IntersectionObserver, images stay deferred");
            Ok(None)
        }
        LazyStrategy::LoadNow => {
            debug!(count = images.len(), "no IntersectionObserver, loading images eagerly");
            for element in &images {
                reveal(&DeferredImage {
                    element,
                    attribute: &config.source_attribute,
                });
            }
            Ok(None)
        }
        LazyStrategy::Observe => {
            let attribute = config.source_attribute.clone();
            let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        let target = entry.target();
                        let image = DeferredImage {
                            element: &target,
                            attribute: &attribute,
                        };
                        if on_intersection(entry.is_intersecting(), &image) {
                            observer.unobserve(&target);
                        }
                    }
                },
            );

            let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
                .js_context("creating IntersectionObserver")?;
            for image in &images {
                observer.observe(image);
            }
            debug!(count = images.len(), "observing deferred images");

            let mut mounted = Mounted::new("lazy-images");
            mounted.hold(ObserverGuard {
                observer,
                _callback: callback,
            });
            Ok(Some(mounted))
        }
    }
}
