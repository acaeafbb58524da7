use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("at least one section id is required")]
    NoSections,
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidNumber { name: &'static str, value: f64 },
}

/// Everything the page behaviour depends on: which elements to look for and
/// the handful of timing and geometry constants.
///
/// Every field has a default matching the shipped site markup, so a config
/// block only needs to name what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Section ids in page order. The last one wins at the bottom of the page.
    pub sections: Vec<String>,
    pub selectors: Selectors,

    /// CSS custom property holding the header height in pixels.
    pub header_var: String,
    /// Used when neither the live header nor `header_var` yields a height.
    pub header_fallback_px: f64,
    /// Extra gap left above an anchor target after scrolling to it.
    pub scroll_padding_px: f64,
    /// How close to the maximum scroll offset counts as "at the bottom".
    pub bottom_tolerance_px: f64,

    pub resize_debounce_ms: u32,
    /// Delay after `load` before the pill is re-measured.
    pub load_settle_ms: u32,
    /// Quiet period after which `is-scrolling` is dropped.
    pub scroll_idle_ms: u32,

    pub swipe_threshold_px: f64,
    pub parallax: ParallaxConfig,
    pub reveal: RevealConfig,
    pub pill: PillTheme,
    pub ripple_lifetime_ms: u32,
    pub counter_duration_ms: f64,
}

/// CSS selectors for every element the driver binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub hamburger: String,
    pub mobile_overlay: String,
    pub mobile_links: String,
    pub nav: String,
    /// Resolved inside `nav`.
    pub pill: String,
    pub header: String,
    pub in_page_links: String,
    pub cards: String,
    /// Clicks inside this (within a card) skip the ripple.
    pub card_link: String,
    pub contact_items: String,
    pub parallax_section: String,
    pub footer_name: String,
    pub parallax_grid: String,
    pub counters: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub name_factor: f64,
    pub grid_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub card_threshold: f64,
    pub card_root_margin: String,
    /// Transition delay added per card, in seconds.
    pub card_stagger_s: f64,
    pub contact_threshold: f64,
    /// Reveal delay added per entry in an observer batch.
    pub contact_stagger_ms: u32,
}

/// Visual treatment of the pill. Decorative only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillTheme {
    pub active_background: String,
    pub hover_background: String,
    pub hover_border: String,
    pub hover_opacity: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            sections: vec!["home".into(), "projects".into(), "contact".into()],
            selectors: Selectors::default(),
            header_var: "--nav-height".into(),
            header_fallback_px: 80.0,
            scroll_padding_px: 20.0,
            bottom_tolerance_px: 10.0,
            resize_debounce_ms: 150,
            load_settle_ms: 100,
            scroll_idle_ms: 150,
            swipe_threshold_px: 50.0,
            parallax: ParallaxConfig::default(),
            reveal: RevealConfig::default(),
            pill: PillTheme::default(),
            ripple_lifetime_ms: 600,
            counter_duration_ms: 2000.0,
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            hamburger: ".hamburger-menu".into(),
            mobile_overlay: ".mobile-menu-overlay".into(),
            mobile_links: ".mobile-menu-nav a".into(),
            nav: ".top-nav".into(),
            pill: ".nav-pill".into(),
            header: ".site-header-inner".into(),
            in_page_links: "a[href^=\"#\"]".into(),
            cards: ".project-card".into(),
            card_link: ".project-link".into(),
            contact_items: ".contact-item, .social-link".into(),
            parallax_section: "#contact".into(),
            footer_name: ".footer-name".into(),
            parallax_grid: ".parallax-grid".into(),
            counters: ".stat-number".into(),
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            name_factor: 0.15,
            grid_factor: 0.1,
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            card_threshold: 0.1,
            card_root_margin: "0px 0px -50px 0px".into(),
            card_stagger_s: 0.1,
            contact_threshold: 0.2,
            contact_stagger_ms: 100,
        }
    }
}

impl Default for PillTheme {
    fn default() -> Self {
        Self {
            active_background:
                "linear-gradient(135deg, rgba(59, 130, 255, 0.35), rgba(0, 255, 153, 0.25))"
                    .into(),
            hover_background:
                "linear-gradient(135deg, rgba(59, 130, 255, 0.2), rgba(0, 255, 153, 0.15))"
                    .into(),
            hover_border: "1px solid rgba(255, 255, 255, 0.3)".into(),
            hover_opacity: 0.5,
        }
    }
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep their
    /// defaults. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        let mut seen = HashSet::new();
        for id in &self.sections {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateSection(id.clone()));
            }
        }

        let numbers = [
            ("header_fallback_px", self.header_fallback_px),
            ("scroll_padding_px", self.scroll_padding_px),
            ("bottom_tolerance_px", self.bottom_tolerance_px),
            ("swipe_threshold_px", self.swipe_threshold_px),
            ("parallax.name_factor", self.parallax.name_factor),
            ("parallax.grid_factor", self.parallax.grid_factor),
            ("reveal.card_threshold", self.reveal.card_threshold),
            ("reveal.card_stagger_s", self.reveal.card_stagger_s),
            ("reveal.contact_threshold", self.reveal.contact_threshold),
            ("pill.hover_opacity", self.pill.hover_opacity),
            ("counter_duration_ms", self.counter_duration_ms),
        ];
        for (name, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNumber { name, value });
            }
        }
        Ok(())
    }
}
