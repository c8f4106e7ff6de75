//! Deferred image loading.
//!
//! Images ship with their real URL in a deferred-source attribute. Once an
//! image first intersects the viewport the URL moves into `src` and the image
//! is no longer observed.

use serde::{Deserialize, Serialize};

/// What to do when the browser has no IntersectionObserver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LazyFallback {
    /// Leave deferred images unloaded.
    #[default]
    Skip,
    /// Load every deferred image immediately.
    Eager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyStrategy {
    Observe,
    LoadNow,
    Disabled,
}

impl LazyStrategy {
    pub fn choose(observer_available: bool, fallback: LazyFallback) -> Self {
        match (observer_available, fallback) {
            (true, _) => LazyStrategy::Observe,
            (false, LazyFallback::Eager) => LazyStrategy::LoadNow,
            (false, LazyFallback::Skip) => LazyStrategy::Disabled,
        }
    }
}

pub trait LazyImage {
    fn deferred_source(&self) -> Option<String>;

    /// Set the real source and drop the deferred attribute.
    fn load(&self, source: &str);
}

/// Load the image's deferred source, if it still has one.
pub fn reveal(image: &impl LazyImage) -> bool {
    match image.deferred_source() {
        Some(source) => {
            image.load(&source);
            true
        }
        None => false,
    }
}

/// Handle one intersection entry. Returns true when the image should stop
/// being observed.
pub fn on_intersection(is_intersecting: bool, image: &impl LazyImage) -> bool {
    if !is_intersecting {
        return false;
    }
    reveal(image);
    true
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct Img {
        deferred: RefCell<Option<String>>,
        src: RefCell<Option<String>>,
    }

    impl Img {
        fn new(deferred: Option<&str>) -> Self {
            Self {
                deferred: RefCell::new(deferred.map(String::from)),
                src: RefCell::new(None),
            }
        }
    }

    impl LazyImage for Img {
        fn deferred_source(&self) -> Option<String> {
            self.deferred.borrow().clone()
        }

        fn load(&self, source: &str) {
            *self.src.borrow_mut() = Some(source.to_string());
            *self.deferred.borrow_mut() = None;
        }
    }

    #[test]
    fn test_strategy() {
        assert_eq!(LazyStrategy::choose(true, LazyFallback::Skip), LazyStrategy::Observe);
        assert_eq!(LazyStrategy::choose(true, LazyFallback::Eager), LazyStrategy::Observe);
        assert_eq!(LazyStrategy::choose(false, LazyFallback::Eager), LazyStrategy::LoadNow);
        assert_eq!(LazyStrategy::choose(false, LazyFallback::Skip), LazyStrategy::Disabled);
    }

    #[test]
    fn test_intersection_loads_once() {
        let img = Img::new(Some("/images/shake.webp"));

        assert!(!on_intersection(false, &img));
        assert_eq!(*img.src.borrow(), None);

        assert!(on_intersection(true, &img));
        assert_eq!(img.src.borrow().as_deref(), Some("/images/shake.webp"));
        assert_eq!(img.deferred_source(), None);

        // a second entry finds nothing left to load
        assert!(!reveal(&img));
    }

    #[test]
    fn test_unobserve_even_without_source() {
        let img = Img::new(None);
        assert!(on_intersection(true, &img));
        assert_eq!(*img.src.borrow(), None);
    }
}
