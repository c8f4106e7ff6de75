//! Site configuration: the selectors each component binds to and its timing
//! constants.
//!
//! Every field has a default matching the stock site markup, so a page only
//! has to pass the fields it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};
use crate::lazy::LazyFallback;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub nav: NavConfig,
    pub carousel: CarouselConfig,
    pub forms: FormConfig,
    pub scroll: ScrollConfig,
    pub filter: FilterConfig,
    pub lazy: LazyConfig,
    pub links: LinkConfig,
}

impl SiteConfig {
    /// Rejects values that would make a component spin or never fire.
    pub fn validate(&self) -> Result<()> {
        if self.carousel.autoplay_interval_ms == 0 {
            return Err(SiteError::Config(
                "carousel.autoplay_interval_ms must be positive".into(),
            ));
        }
        let threshold = self.carousel.swipe_threshold_px;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(SiteError::Config(
                "carousel.swipe_threshold_px must be a non-negative number".into(),
            ));
        }
        let width = self.carousel.fallback_slide_width_px;
        if width.is_nan() || width <= 0.0 {
            return Err(SiteError::Config(
                "carousel.fallback_slide_width_px must be positive".into(),
            ));
        }
        if self.links.home_page.is_empty() {
            return Err(SiteError::Config("links.home_page must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_id: String,
    pub menu_id: String,
    pub link_selector: String,
    pub header_id: String,
    /// Class set on the menu while it is open.
    pub open_class: String,
    pub scrolled_class: String,
    /// Header becomes "scrolled" strictly above this vertical offset.
    pub scroll_threshold_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "mobileMenuToggle".into(),
            menu_id: "navMenu".into(),
            link_selector: ".nav-menu a".into(),
            header_id: "navbar".into(),
            open_class: "active".into(),
            scrolled_class: "scrolled".into(),
            scroll_threshold_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub track_id: String,
    pub prev_id: String,
    pub next_id: String,
    pub slide_selector: String,
    pub gap_px: f64,
    /// Used when the first slide has no measurable width.
    pub fallback_slide_width_px: f64,
    pub autoplay_interval_ms: u32,
    pub swipe_threshold_px: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            track_id: "carouselTrack".into(),
            prev_id: "prevBtn".into(),
            next_id: "nextBtn".into(),
            slide_selector: ".carousel-slide".into(),
            gap_px: 32.0,
            fallback_slide_width_px: 280.0,
            autoplay_interval_ms: 5000,
            swipe_threshold_px: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub newsletter_id: String,
    pub newsletter_email_selector: String,
    pub contact_selector: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            newsletter_id: "newsletterForm".into(),
            newsletter_email_selector: r#"input[type="email"]"#.into(),
            contact_selector: ".contact-form form".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
    /// Height of the fixed header; targets land this far below the viewport top.
    pub header_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: r##"a[href^="#"]"##.into(),
            header_offset_px: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub button_selector: String,
    pub item_selector: String,
    pub filter_attribute: String,
    pub active_class: String,
    pub fade_in_delay_ms: u32,
    pub fade_out_ms: u32,
    pub transition: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            button_selector: ".filter-btn".into(),
            item_selector: ".menu-item".into(),
            filter_attribute: "data-filter".into(),
            active_class: "active".into(),
            fade_in_delay_ms: 10,
            fade_out_ms: 300,
            transition: "opacity 0.3s ease, transform 0.3s ease".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub image_selector: String,
    pub source_attribute: String,
    pub fallback: LazyFallback,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            image_selector: "img[data-src]".into(),
            source_attribute: "data-src".into(),
            fallback: LazyFallback::Skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub link_selector: String,
    pub active_class: String,
    pub home_page: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            link_selector: ".nav-menu a".into(),
            active_class: "active".into(),
            home_page: "index.html".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SiteConfig =
            serde_json::from_str(r#"{ "carousel": { "autoplay_interval_ms": 8000 } }"#).unwrap();

        assert_eq!(config.carousel.autoplay_interval_ms, 8000);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.carousel.track_id, "carouselTrack");
        assert_eq!(config.nav, NavConfig::default());
        assert_eq!(config.lazy.fallback, LazyFallback::Skip);
    }

    #[test]
    fn test_lazy_fallback_parses() {
        let config: SiteConfig =
            serde_json::from_str(r#"{ "lazy": { "fallback": "eager" } }"#).unwrap();
        assert_eq!(config.lazy.fallback, LazyFallback::Eager);
    }

    #[test]
    fn test_zero_autoplay_rejected() {
        let mut config = SiteConfig::default();
        config.carousel.autoplay_interval_ms = 0;
        assert!(matches!(config.validate(), Err(SiteError::Config(_))));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = SiteConfig::default();
        config.carousel.swipe_threshold_px = f64::NAN;
        assert!(config.validate().is_err());
    }
}
