//! Browser DOM layer for the 100K Shakes site.
//!
//! This crate binds the components of `shakes-site-core` to the page markup.
//! It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: element queries and JS error conversion
//! - `timers`: `Scheduler` over `setTimeout`/`setInterval`
//! - `mount`: per-component ownership of listeners and timers
//! - `nav`, `carousel`, `forms`, `smooth_scroll`, `menu_filter`,
//!   `lazy_images`, `active_link`: one binding per component
//!
//! Each binding looks for its markup and mounts nothing when it's absent.
//! The mounted `Site` lives in a thread-local for the rest of the page's life.
//!
//! # Re-exports
//!
//! This crate re-exports `shakes-site-core` for convenience.

use std::cell::RefCell;

use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;

pub use shakes_site_core;
pub use shakes_site_core::*;

pub mod active_link;
pub mod carousel;
pub mod dom;
pub mod forms;
pub mod lazy_images;
pub mod logging;
pub mod menu_filter;
pub mod mount;
pub mod nav;
pub mod smooth_scroll;
pub mod timers;

pub use mount::Mounted;
pub use timers::BrowserScheduler;

thread_local! {
    static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
}

/// Every component mounted on the current page.
#[derive(Debug)]
pub struct Site {
    components: Vec<Mounted>,
}

impl Site {
    /// Bind every component whose markup is present.
    ///
    /// A component that fails to mount is logged and skipped; only a missing
    /// window/document or a bad config fails the whole site.
    pub fn mount(config: &SiteConfig) -> Result<Self> {
        config.validate()?;
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let scheduler = BrowserScheduler;

        let attempts = [
            ("navigation", nav::mount(&window, &document, &config.nav)),
            ("carousel", carousel::mount(&document, &config.carousel, &scheduler)),
            (
                "newsletter-form",
                forms::mount_newsletter(&window, &document, &config.forms),
            ),
            (
                "contact-form",
                forms::mount_contact(&window, &document, &config.forms),
            ),
            (
                "smooth-scroll",
                smooth_scroll::mount(&window, &document, &config.scroll),
            ),
            (
                "menu-filter",
                menu_filter::mount(&document, &config.filter, &scheduler),
            ),
            (
                "lazy-images",
                lazy_images::mount(&window, &document, &config.lazy),
            ),
        ];

        let mut components = Vec::new();
        for (name, attempt) in attempts {
            match attempt {
                Ok(Some(mounted)) => {
                    debug!(component = name, ?mounted, "mounted");
                    components.push(mounted);
                }
                Ok(None) => debug!(component = name, "skipped"),
                Err(err) => error!(component = name, %err, "failed to mount"),
            }
        }

        if let Err(err) = active_link::highlight(&window, &document, &config.links) {
            error!(component = "active-link", %err, "failed to mount");
        }

        Ok(Self { components })
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(Mounted::name).collect()
    }
}

/// Replace whatever is mounted with a fresh `Site` built from `config`.
/// A config that fails validation leaves the current site in place.
pub fn install(config: &SiteConfig) -> Result<()> {
    config.validate()?;
    // detach the old listeners before binding new ones
    SITE.with(|site| site.borrow_mut().take());
    let site = Site::mount(config)?;
    info!(components = ?site.component_names(), "site behaviours ready");
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

/// Names of the components currently mounted.
pub fn mounted_components() -> Vec<&'static str> {
    SITE.with(|site| {
        site.borrow()
            .as_ref()
            .map(Site::component_names)
            .unwrap_or_default()
    })
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    if let Err(err) = install(&SiteConfig::default()) {
        error!(%err, "could not start site behaviours");
    }
}

/// Remount every component with a (possibly partial) config object.
#[wasm_bindgen(js_name = mountWithConfig)]
pub fn mount_with_config(config: JsValue) -> std::result::Result<(), JsError> {
    logging::init();
    let config = parse_config(config).map_err(|err| JsError::new(&err.to_string()))?;
    install(&config).map_err(|err| JsError::new(&err.to_string()))
}

fn parse_config(value: JsValue) -> Result<SiteConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(SiteConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|err| SiteError::Config(err.to_string()))
}
