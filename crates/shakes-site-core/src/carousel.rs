//! Carousel index arithmetic, swipe detection, and the carousel component.
//!
//! The index wraps in both directions over a slide count fixed at mount time.
//! A carousel with no slides ignores every navigation request.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::config::CarouselConfig;
use crate::schedule::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    current_index: usize,
    total_slides: usize,
    /// Distance between slide origins: slide width plus the track gap.
    slide_advance: f64,
}

impl CarouselState {
    /// Build the state for `total_slides` slides.
    ///
    /// `slide_width` is the measured width of the first slide; a missing or
    /// zero measurement falls back to the configured width.
    pub fn new(total_slides: usize, slide_width: Option<f64>, config: &CarouselConfig) -> Self {
        let width = slide_width
            .filter(|w| *w > 0.0)
            .unwrap_or(config.fallback_slide_width_px);
        Self {
            current_index: 0,
            total_slides,
            slide_advance: width + config.gap_px,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn slide_advance(&self) -> f64 {
        self.slide_advance
    }

    /// Step forward one slide, wrapping to the first. Returns false when
    /// there are no slides.
    pub fn advance(&mut self) -> bool {
        if self.total_slides == 0 {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.total_slides;
        true
    }

    /// Step back one slide, wrapping to the last.
    pub fn retreat(&mut self) -> bool {
        if self.total_slides == 0 {
            return false;
        }
        self.current_index = (self.current_index + self.total_slides - 1) % self.total_slides;
        true
    }

    /// Horizontal track offset for the current slide, in pixels.
    pub fn offset_px(&self) -> f64 {
        -(self.current_index as f64 * self.slide_advance)
    }

    /// CSS transform placing the current slide at the track origin.
    pub fn track_transform(&self) -> String {
        format!(
            "translateX(-{}px)",
            self.current_index as f64 * self.slide_advance
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next slide.
    Next,
    /// Finger moved right: show the previous slide.
    Previous,
}

/// Tracks a single horizontal touch gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeGesture {
    start_x: f64,
    dragging: bool,
    threshold: f64,
}

impl SwipeGesture {
    pub fn new(threshold: f64) -> Self {
        Self {
            start_x: 0.0,
            dragging: false,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = x;
        self.dragging = true;
    }

    /// Whether page scrolling should be suppressed for a touchmove now.
    pub fn in_progress(&self) -> bool {
        self.dragging
    }

    /// Finish the gesture at `x`. Travel must strictly exceed the threshold.
    pub fn end(&mut self, x: f64) -> Option<SwipeDirection> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let diff = self.start_x - x;
        if diff.abs() > self.threshold {
            if diff > 0.0 {
                Some(SwipeDirection::Next)
            } else {
                Some(SwipeDirection::Previous)
            }
        } else {
            None
        }
    }
}

/// Presentation side of the carousel.
pub trait CarouselView {
    /// Show the slide `state` points at.
    fn render(&mut self, state: &CarouselState);
}

pub struct Carousel<V> {
    state: CarouselState,
    swipe: SwipeGesture,
    view: V,
}

impl<V: CarouselView> Carousel<V> {
    /// The track isn't rendered until the first move.
    pub fn new(state: CarouselState, swipe_threshold: f64, view: V) -> Self {
        Self {
            state,
            swipe: SwipeGesture::new(swipe_threshold),
            view,
        }
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn next(&mut self) {
        if self.state.advance() {
            trace!(index = self.state.current_index, "carousel next");
            self.view.render(&self.state);
        }
    }

    pub fn prev(&mut self) {
        if self.state.retreat() {
            trace!(index = self.state.current_index, "carousel prev");
            self.view.render(&self.state);
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.swipe.begin(x);
    }

    /// Returns true when the touchmove's default scrolling should be prevented.
    pub fn touch_move(&self) -> bool {
        self.swipe.in_progress()
    }

    pub fn touch_end(&mut self, x: f64) {
        match self.swipe.end(x) {
            Some(SwipeDirection::Next) => self.next(),
            Some(SwipeDirection::Previous) => self.prev(),
            None => {}
        }
    }
}

/// Advance `carousel` every `interval_ms` until the returned handle drops.
pub fn start_autoplay<V, S>(
    carousel: &Rc<RefCell<Carousel<V>>>,
    scheduler: &S,
    interval_ms: u32,
) -> TaskHandle
where
    V: CarouselView + 'static,
    S: Scheduler,
{
    let carousel = Rc::downgrade(carousel);
    scheduler.schedule_repeating(
        interval_ms,
        Box::new(move || {
            if let Some(carousel) = carousel.upgrade() {
                carousel.borrow_mut().next();
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::VirtualClock;

    #[derive(Default)]
    struct RecordingView {
        transforms: Vec<String>,
    }

    impl CarouselView for RecordingView {
        fn render(&mut self, state: &CarouselState) {
            self.transforms.push(state.track_transform());
        }
    }

    fn carousel(total: usize) -> Carousel<RecordingView> {
        let config = CarouselConfig::default();
        let state = CarouselState::new(total, None, &config);
        Carousel::new(state, config.swipe_threshold_px, RecordingView::default())
    }

    #[test]
    fn test_fallback_width_plus_gap() {
        let config = CarouselConfig::default();
        assert_eq!(CarouselState::new(5, None, &config).slide_advance(), 312.0);
        assert_eq!(CarouselState::new(5, Some(0.0), &config).slide_advance(), 312.0);
        assert_eq!(CarouselState::new(5, Some(300.0), &config).slide_advance(), 332.0);
    }

    #[test]
    fn test_advance_and_retreat_positions() {
        let mut c = carousel(5);
        c.next();
        c.next();
        c.next();
        assert_eq!(c.state().current_index(), 3);
        assert_eq!(c.state().offset_px(), -936.0);

        c.prev();
        assert_eq!(c.state().current_index(), 2);
        assert_eq!(c.state().offset_px(), -624.0);

        insta::assert_snapshot!(c.view().transforms.join(" | "), @"translateX(-312px) | translateX(-624px) | translateX(-936px) | translateX(-624px)");
    }

    #[test]
    fn test_wraps_both_ways() {
        let mut state = CarouselState::new(3, None, &CarouselConfig::default());
        assert!(state.retreat());
        assert_eq!(state.current_index(), 2);
        assert!(state.advance());
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_index_stays_in_range_for_any_sequence() {
        for total in 1..=7usize {
            let mut state = CarouselState::new(total, None, &CarouselConfig::default());
            let mut net: i64 = 0;
            // deterministic pseudo-random walk
            let mut seed: u32 = 0x9e37_79b9 ^ total as u32;
            for _ in 0..200 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                if seed % 3 == 0 {
                    state.retreat();
                    net -= 1;
                } else {
                    state.advance();
                    net += 1;
                }
                assert!(state.current_index() < total);
                assert_eq!(
                    state.current_index() as i64,
                    net.rem_euclid(total as i64)
                );
            }
        }
    }

    #[test]
    fn test_advance_retreat_inverse() {
        for total in 1..=6 {
            let mut state = CarouselState::new(total, None, &CarouselConfig::default());
            for _ in 0..total {
                let before = state.current_index();
                state.advance();
                state.retreat();
                assert_eq!(state.current_index(), before);
                state.retreat();
                state.advance();
                assert_eq!(state.current_index(), before);
                state.advance();
            }
        }
    }

    #[test]
    fn test_empty_carousel_is_noop() {
        let mut c = carousel(0);
        c.next();
        c.prev();
        c.touch_start(300.0);
        c.touch_end(100.0);
        assert_eq!(c.state().current_index(), 0);
        assert!(c.view().transforms.is_empty());
    }

    #[test]
    fn test_swipe_over_threshold_advances() {
        let mut c = carousel(5);
        c.touch_start(300.0);
        assert!(c.touch_move());
        c.touch_end(230.0);
        assert_eq!(c.state().current_index(), 1);
        assert!(!c.touch_move());
    }

    #[test]
    fn test_short_swipe_ignored() {
        let mut c = carousel(5);
        c.touch_start(300.0);
        c.touch_end(280.0);
        assert_eq!(c.state().current_index(), 0);
        assert!(c.view().transforms.is_empty());
    }

    #[test]
    fn test_swipe_right_retreats() {
        let mut c = carousel(5);
        c.touch_start(100.0);
        c.touch_end(151.0);
        assert_eq!(c.state().current_index(), 4);
    }

    #[test]
    fn test_exact_threshold_does_not_swipe() {
        let mut gesture = SwipeGesture::new(50.0);
        gesture.begin(300.0);
        assert_eq!(gesture.end(250.0), None);
    }

    #[test]
    fn test_touch_end_without_start_ignored() {
        let mut gesture = SwipeGesture::new(50.0);
        assert!(!gesture.in_progress());
        assert_eq!(gesture.end(0.0), None);
    }

    #[test]
    fn test_autoplay_advances_every_interval() {
        let clock = VirtualClock::new();
        let c = Rc::new(RefCell::new(carousel(5)));
        let _autoplay = start_autoplay(&c, &clock, 5000);

        clock.advance(4999);
        assert_eq!(c.borrow().state().current_index(), 0);
        clock.advance(1);
        assert_eq!(c.borrow().state().current_index(), 1);
        clock.advance(25_000);
        // six ticks in total, wrapped past the end once
        assert_eq!(c.borrow().state().current_index(), 1);
    }

    #[test]
    fn test_autoplay_stops_with_handle() {
        let clock = VirtualClock::new();
        let c = Rc::new(RefCell::new(carousel(5)));
        let autoplay = start_autoplay(&c, &clock, 5000);

        clock.advance(10_000);
        drop(autoplay);
        clock.advance(10_000);
        assert_eq!(c.borrow().state().current_index(), 2);
    }
}
