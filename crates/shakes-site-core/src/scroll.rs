//! Smooth scrolling for same-page anchor links.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Leave the click alone (`href="#"` and friends).
    PassThrough,
    /// Take over the click and scroll to the element with this id.
    ScrollTo(&'a str),
}

/// Decide what a click on an anchor with this `href` should do.
pub fn anchor_action(href: &str) -> AnchorAction<'_> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => AnchorAction::ScrollTo(id),
        _ => AnchorAction::PassThrough,
    }
}

pub trait ScrollView {
    /// Document-relative top of the element with `id`, if there is one.
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Smoothly scroll the page so `top` is at the viewport top.
    fn scroll_to(&mut self, top: f64);
}

pub struct SmoothScroller<V> {
    header_offset: f64,
    view: V,
}

impl<V: ScrollView> SmoothScroller<V> {
    pub fn new(header_offset: f64, view: V) -> Self {
        Self {
            header_offset,
            view,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle a click. Returns true when the default navigation should be
    /// prevented; a missing target still prevents it but scrolls nowhere.
    pub fn on_click(&mut self, href: &str) -> bool {
        let AnchorAction::ScrollTo(id) = anchor_action(href) else {
            return false;
        };

        if let Some(top) = self.view.element_top(id) {
            self.view.scroll_to(top - self.header_offset);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Page {
        tops: HashMap<&'static str, f64>,
        scrolls: Vec<f64>,
    }

    impl ScrollView for Page {
        fn element_top(&self, id: &str) -> Option<f64> {
            self.tops.get(id).copied()
        }

        fn scroll_to(&mut self, top: f64) {
            self.scrolls.push(top);
        }
    }

    fn scroller() -> SmoothScroller<Page> {
        let mut page = Page::default();
        page.tops.insert("about", 900.0);
        SmoothScroller::new(70.0, page)
    }

    #[test]
    fn test_anchor_action() {
        assert_eq!(anchor_action("#"), AnchorAction::PassThrough);
        assert_eq!(anchor_action(""), AnchorAction::PassThrough);
        assert_eq!(anchor_action("#about"), AnchorAction::ScrollTo("about"));
        assert_eq!(anchor_action("menu.html"), AnchorAction::PassThrough);
    }

    #[test]
    fn test_scrolls_to_target_minus_header() {
        let mut s = scroller();
        assert!(s.on_click("#about"));
        assert_eq!(s.view().scrolls, vec![830.0]);
    }

    #[test]
    fn test_bare_hash_not_intercepted() {
        let mut s = scroller();
        assert!(!s.on_click("#"));
        assert!(s.view().scrolls.is_empty());
    }

    #[test]
    fn test_missing_target_is_silent() {
        let mut s = scroller();
        assert!(s.on_click("#nowhere"));
        assert!(s.view().scrolls.is_empty());
    }
}
