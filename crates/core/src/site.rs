use folio_protocol::DomPatch;
use serde::{Deserialize, Serialize};

use crate::anchor;
use crate::config::SiteConfig;
use crate::effects::parallax::{self, ParallaxTargets};
use crate::effects::{Swipe, SwipeTracker, page_state};
use crate::layout::{NavLayout, PageLayout, SectionBox};
use crate::menu::{self, MobileMenu};
use crate::nav::ScrollSpy;
use crate::schedule::Once;

/// Point-in-time view of the in-memory UI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshot {
    pub active_section: Option<String>,
    pub hovering: bool,
    pub menu_open: bool,
    pub initialized: bool,
}

/// All per-page UI state behind one owner.
///
/// Each method is the reaction to one kind of event and returns the patches
/// to apply. The caller measures the page beforehand; nothing here reads the
/// DOM.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    spy: ScrollSpy,
    menu: MobileMenu,
    swipe: SwipeTracker,
    init: Once,
}

impl Site {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            spy: ScrollSpy::new(),
            menu: MobileMenu::new(),
            swipe: SwipeTracker::new(),
            init: Once::new(),
        }
    }

    pub fn active_section(&self) -> Option<&str> {
        self.spy.active()
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        SiteSnapshot {
            active_section: self.spy.active().map(str::to_owned),
            hovering: self.spy.is_hovering(),
            menu_open: self.menu.is_open(),
            initialized: self.init.is_done(),
        }
    }

    /// First scroll-spy pass plus pill placement. Later calls do nothing.
    pub fn initialize<S: AsRef<str>>(
        &mut self,
        page: &PageLayout,
        nav: &NavLayout,
        mobile_hrefs: &[S],
    ) -> Vec<DomPatch> {
        if !self.init.first() {
            return Vec::new();
        }
        let mut patches = self.on_scroll(page, nav, mobile_hrefs);
        patches.extend(self.spy.pill_to_active(nav));
        patches
    }

    /// One rate-limited scroll-spy pass. When the active section changes the
    /// mobile menu is brought in line with the desktop navigation.
    pub fn on_scroll<S: AsRef<str>>(
        &mut self,
        page: &PageLayout,
        nav: &NavLayout,
        mobile_hrefs: &[S],
    ) -> Vec<DomPatch> {
        let Some(update) = self
            .spy
            .update(page, nav, self.config.bottom_tolerance_px)
        else {
            return Vec::new();
        };
        let mut patches = update.patches;
        patches.extend(menu::sync_active(
            update.active_href.as_deref(),
            mobile_hrefs,
        ));
        patches
    }

    /// Move the pill onto the active link as it is laid out now.
    pub fn refresh_pill(&self, nav: &NavLayout) -> Vec<DomPatch> {
        self.spy.pill_to_active(nav)
    }

    /// Resize or a late layout shift (images, fonts). Sections may have
    /// moved under the viewport centre, so the active section is chosen
    /// again before the pill is re-measured.
    pub fn on_layout_change<S: AsRef<str>>(
        &mut self,
        page: &PageLayout,
        nav: &NavLayout,
        mobile_hrefs: &[S],
    ) -> Vec<DomPatch> {
        let changed = self.on_scroll(page, nav, mobile_hrefs);
        if changed.is_empty() {
            self.refresh_pill(nav)
        } else {
            changed
        }
    }

    pub fn hover_enter(&mut self, index: usize, nav: &NavLayout) -> Vec<DomPatch> {
        self.spy.hover_enter(index, nav, &self.config.pill)
    }

    pub fn hover_leave(&mut self, nav: &NavLayout) -> Vec<DomPatch> {
        self.spy.hover_leave(nav, &self.config.pill)
    }

    pub fn link_touch(&mut self, nav: &NavLayout) -> Vec<DomPatch> {
        self.spy.touch_start(nav, &self.config.pill)
    }

    pub fn toggle_menu(&mut self) -> Vec<DomPatch> {
        self.menu.toggle()
    }

    pub fn close_menu(&mut self) -> Vec<DomPatch> {
        self.menu.close()
    }

    pub fn on_overlay_click(&mut self, hit_background: bool) -> Vec<DomPatch> {
        self.menu.on_overlay_click(hit_background)
    }

    /// Document-level keydown: Escape for the menu, Tab for focus styling.
    pub fn on_key(&mut self, key: &str) -> Vec<DomPatch> {
        let mut patches = self.menu.on_key(key);
        patches.extend(page_state::on_key(key));
        patches
    }

    pub fn header_height(&self, live: Option<f64>, css_var: Option<&str>) -> f64 {
        anchor::header_height(live, css_var, self.config.header_fallback_px)
    }

    /// Click on an in-page anchor. `None` means let the browser handle it.
    pub fn anchor_click(
        &self,
        href: &str,
        target_top: Option<f64>,
        scroll_y: f64,
        header_height: f64,
    ) -> Option<Vec<DomPatch>> {
        anchor::plan_scroll(
            href,
            target_top,
            scroll_y,
            header_height,
            self.config.scroll_padding_px,
        )
    }

    pub fn parallax(
        &self,
        section: &SectionBox,
        scroll_y: f64,
        viewport_height: f64,
        targets: ParallaxTargets,
    ) -> Vec<DomPatch> {
        parallax::parallax(
            section,
            scroll_y,
            viewport_height,
            targets,
            &self.config.parallax,
        )
    }

    pub fn touch_start(&mut self, screen_y: f64) {
        self.swipe.start(screen_y);
    }

    pub fn touch_end(&self, screen_y: f64) -> Option<Swipe> {
        self.swipe.end(screen_y, self.config.swipe_threshold_px)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new(SiteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NavLink;
    use folio_protocol::{Rect, Target};

    fn page(scroll_y: f64) -> PageLayout {
        PageLayout {
            scroll_y,
            viewport_height: 600.0,
            document_height: 2600.0,
            sections: vec![
                SectionBox::new("home", 0.0, 800.0),
                SectionBox::new("projects", 800.0, 1200.0),
                SectionBox::new("contact", 2000.0, 600.0),
            ],
        }
    }

    fn nav() -> NavLayout {
        NavLayout {
            container: Rect::new(0.0, 0.0, 300.0, 50.0),
            links: vec![
                NavLink::new("#home", Rect::new(0.0, 5.0, 100.0, 40.0)),
                NavLink::new("#projects", Rect::new(100.0, 5.0, 100.0, 40.0)),
                NavLink::new("#contact", Rect::new(200.0, 5.0, 100.0, 40.0)),
            ],
        }
    }

    const MOBILE: [&str; 3] = ["#home", "#projects", "#contact"];

    #[test]
    fn initialize_runs_once() {
        let mut site = Site::default();
        let first = site.initialize(&page(0.0), &nav(), &MOBILE);
        assert!(!first.is_empty());
        assert!(site.snapshot().initialized);
        assert!(site.initialize(&page(1300.0), &nav(), &MOBILE).is_empty());
        assert_eq!(site.active_section(), Some("home"));
    }

    #[test]
    fn scroll_change_syncs_mobile_menu() {
        let mut site = Site::default();
        site.initialize(&page(0.0), &nav(), &MOBILE);
        let patches = site.on_scroll(&page(2550.0), &nav(), &MOBILE);
        assert!(patches.contains(&DomPatch::class(Target::MobileLink(2), "active", true)));
        assert!(patches.contains(&DomPatch::class(Target::MobileLink(0), "active", false)));
        assert_eq!(site.active_section(), Some("contact"));
    }

    #[test]
    fn escape_and_tab_share_keydown() {
        let mut site = Site::default();
        site.toggle_menu();
        assert!(site.snapshot().menu_open);
        site.on_key("Escape");
        assert!(!site.snapshot().menu_open);
        assert_eq!(
            site.on_key("Tab"),
            vec![DomPatch::class(Target::Body, "keyboard-nav", true)]
        );
    }

    #[test]
    fn anchor_click_uses_configured_padding() {
        let mut config = SiteConfig::default();
        config.scroll_padding_px = 0.0;
        let site = Site::new(config);
        let patches = site.anchor_click("#contact", Some(100.0), 0.0, 50.0).unwrap();
        assert_eq!(
            patches[0],
            DomPatch::ScrollTo {
                top: 50.0,
                smooth: true
            }
        );
    }

    #[test]
    fn snapshot_serializes() {
        let site = Site::default();
        let json = serde_json::to_string(&site.snapshot()).unwrap();
        assert!(json.contains("\"active_section\":null"));
    }
}
