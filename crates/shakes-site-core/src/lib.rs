//! shakes-site-core: the 100K Shakes site behaviours without a browser.
//!
//! Each component owns its state and talks to the page only through a small
//! view trait, so the whole behaviour layer runs and tests natively:
//! - `nav`: mobile menu toggle and scroll-styled header
//! - `carousel`: wrapping slide index, swipe detection, autoplay
//! - `forms`: newsletter/contact submission stubs
//! - `scroll`: smooth scrolling to same-page anchors
//! - `filter`: menu category filter with staged fade in/out
//! - `lazy`: deferred image loading
//! - `links`: active navigation link
//!
//! Delays go through the `Scheduler` trait; `VirtualClock` drives them in
//! tests.

pub mod carousel;
pub mod config;
pub mod error;
pub mod filter;
pub mod forms;
pub mod lazy;
pub mod links;
pub mod nav;
pub mod schedule;
pub mod scroll;

pub use carousel::{
    Carousel, CarouselState, CarouselView, SwipeDirection, SwipeGesture, start_autoplay,
};
pub use config::{
    CarouselConfig, FilterConfig, FormConfig, LazyConfig, LinkConfig, NavConfig, ScrollConfig,
    SiteConfig,
};
pub use error::{Result, SiteError};
pub use filter::{Display, FilterCategory, ItemStyle, MenuFilter, MenuFilterView};
pub use forms::{ContactForm, ContactSubmission, FormView, NewsletterForm, NewsletterSubmission};
pub use lazy::{LazyFallback, LazyImage, LazyStrategy};
pub use links::{active_links, current_page};
pub use nav::{HeaderView, MenuToggle, MenuView, ScrollStyler};
pub use schedule::{Scheduler, TaskHandle, VirtualClock, track_completion};
pub use scroll::{AnchorAction, ScrollView, SmoothScroller, anchor_action};
pub use smol_str::SmolStr;
