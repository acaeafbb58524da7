//! Integration test: drive a `Site` through a scroll session over a
//! three-section page and check navigation, pill, and mobile-menu state.

use folio_core::layout::{NavLayout, NavLink, PageLayout, SectionBox};
use folio_core::{Site, SiteConfig};
use folio_protocol::{DomPatch, Rect, Target};

const VIEWPORT: f64 = 600.0;
const DOCUMENT: f64 = 2600.0;
const MOBILE: [&str; 3] = ["#home", "#projects", "#contact"];

fn page(scroll_y: f64) -> PageLayout {
    PageLayout {
        scroll_y,
        viewport_height: VIEWPORT,
        document_height: DOCUMENT,
        sections: vec![
            SectionBox::new("home", 0.0, 800.0),
            SectionBox::new("projects", 800.0, 1200.0),
            SectionBox::new("contact", 2000.0, 600.0),
        ],
    }
}

fn nav() -> NavLayout {
    NavLayout {
        container: Rect::new(24.0, 16.0, 420.0, 56.0),
        links: vec![
            NavLink::new("#home", Rect::new(32.0, 24.0, 90.0, 40.0)),
            NavLink::new("#projects", Rect::new(130.0, 24.0, 120.0, 40.0)),
            NavLink::new("#contact", Rect::new(258.0, 24.0, 110.0, 40.0)),
        ],
    }
}

/// Replays patches onto a tiny model of the elements we care about.
#[derive(Default)]
struct Dom {
    nav_active: [bool; 3],
    mobile_active: [bool; 3],
    pill: Pill,
}

#[derive(Default, Debug, PartialEq)]
struct Pill {
    width: String,
    height: String,
    transform: String,
    opacity: String,
}

impl Dom {
    fn apply(&mut self, patches: &[DomPatch]) {
        for patch in patches {
            match patch {
                DomPatch::SetClass {
                    target: Target::NavLink(i),
                    class,
                    on,
                } if class == "active" => self.nav_active[*i] = *on,
                DomPatch::SetClass {
                    target: Target::MobileLink(i),
                    class,
                    on,
                } if class == "active" => self.mobile_active[*i] = *on,
                DomPatch::SetStyle {
                    target: Target::Pill,
                    property,
                    value,
                } => match property.as_str() {
                    "width" => self.pill.width = value.clone(),
                    "height" => self.pill.height = value.clone(),
                    "transform" => self.pill.transform = value.clone(),
                    "opacity" => self.pill.opacity = value.clone(),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn active_count(&self) -> usize {
        self.nav_active.iter().filter(|a| **a).count()
    }

    fn pill_over(&self, link: &Rect, nav: &Rect) -> bool {
        self.pill.width == format!("{}px", link.w)
            && self.pill.height == format!("{}px", link.h)
            && self.pill.transform == format!("translate({}px, {}px)", link.x - nav.x, link.y - nav.y)
    }
}

#[test]
fn scroll_session_tracks_sections() {
    let mut site = Site::new(SiteConfig::default());
    let mut dom = Dom::default();
    let nav = nav();

    dom.apply(&site.initialize(&page(0.0), &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("home"));
    assert_eq!(dom.nav_active, [true, false, false]);
    assert!(dom.pill_over(&nav.links[0].rect, &nav.container));
    assert_eq!(dom.pill.opacity, "1");

    // Every scroll position strictly inside `projects` keeps exactly one link active.
    for scroll in [500.0, 900.0, 1300.0, 1650.0] {
        dom.apply(&site.on_scroll(&page(scroll), &nav, &MOBILE));
        assert_eq!(site.active_section(), Some("projects"), "scroll {scroll}");
        assert_eq!(dom.active_count(), 1);
        assert!(dom.nav_active[1]);
        assert!(dom.pill_over(&nav.links[1].rect, &nav.container));
        assert_eq!(dom.mobile_active, [false, true, false]);
    }

    // Within 10px of the maximum scroll (2000) the last section wins.
    dom.apply(&site.on_scroll(&page(1991.0), &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("contact"));
    assert_eq!(dom.nav_active, [false, false, true]);
    assert_eq!(dom.mobile_active, [false, false, true]);
    assert!(dom.pill_over(&nav.links[2].rect, &nav.container));
}

#[test]
fn hover_preview_does_not_corrupt_active_state() {
    let mut site = Site::new(SiteConfig::default());
    let mut dom = Dom::default();
    let nav = nav();

    dom.apply(&site.initialize(&page(1300.0), &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("projects"));

    dom.apply(&site.hover_enter(0, &nav));
    assert!(dom.pill_over(&nav.links[0].rect, &nav.container));
    assert_eq!(dom.pill.opacity, "0.5");
    assert_eq!(site.active_section(), Some("projects"));

    // Resize and scroll updates while hovering leave the preview alone.
    dom.apply(&site.refresh_pill(&nav));
    dom.apply(&site.on_scroll(&page(2550.0), &nav, &MOBILE));
    assert!(dom.pill_over(&nav.links[0].rect, &nav.container));
    assert_eq!(site.active_section(), Some("contact"));
    assert_eq!(dom.nav_active, [false, false, true]);

    dom.apply(&site.hover_leave(&nav));
    assert!(dom.pill_over(&nav.links[2].rect, &nav.container));
    assert_eq!(dom.pill.opacity, "1");
}

#[test]
fn resized_nav_moves_pill_with_active_link() {
    let mut site = Site::new(SiteConfig::default());
    let mut dom = Dom::default();
    let mut nav = nav();

    dom.apply(&site.initialize(&page(1300.0), &nav, &MOBILE));
    nav.links[1].rect = Rect::new(140.0, 30.0, 100.0, 36.0);
    dom.apply(&site.on_layout_change(&page(1300.0), &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("projects"));
    assert!(dom.pill_over(&nav.links[1].rect, &nav.container));
}

#[test]
fn reflow_reselects_section_under_viewport_center() {
    let mut site = Site::new(SiteConfig::default());
    let mut dom = Dom::default();
    let nav = nav();

    dom.apply(&site.initialize(&page(1300.0), &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("projects"));

    // Late content above shrinks home and projects; the centre (1600) now
    // falls inside contact without any scroll event.
    let reflowed = PageLayout {
        scroll_y: 1300.0,
        viewport_height: VIEWPORT,
        document_height: DOCUMENT,
        sections: vec![
            SectionBox::new("home", 0.0, 400.0),
            SectionBox::new("projects", 400.0, 600.0),
            SectionBox::new("contact", 1000.0, 1600.0),
        ],
    };
    dom.apply(&site.on_layout_change(&reflowed, &nav, &MOBILE));
    assert_eq!(site.active_section(), Some("contact"));
    assert_eq!(dom.nav_active, [false, false, true]);
    assert_eq!(dom.mobile_active, [false, false, true]);
    assert!(dom.pill_over(&nav.links[2].rect, &nav.container));
}

#[test]
fn menu_lock_released_by_every_close_path() {
    let mut site = Site::new(SiteConfig::default());
    let locked = DomPatch::style(Target::Body, "overflow", "hidden");
    let released = DomPatch::style(Target::Body, "overflow", "");

    assert!(site.toggle_menu().contains(&locked));
    assert!(site.close_menu().contains(&released));

    assert!(site.toggle_menu().contains(&locked));
    assert!(site.on_key("Escape").contains(&released));

    assert!(site.toggle_menu().contains(&locked));
    assert!(site.on_overlay_click(false).is_empty());
    assert!(site.on_overlay_click(true).contains(&released));

    assert!(site.toggle_menu().contains(&locked));
    assert!(site.toggle_menu().contains(&released));

    assert!(site.close_menu().contains(&released));
    assert!(!site.snapshot().menu_open);
}

#[test]
fn anchor_clicks() {
    let site = Site::new(SiteConfig::default());
    let header = site.header_height(None, Some("64px"));
    assert_eq!(header, 64.0);

    // Target 420px below the viewport top while scrolled to 1000.
    let patches = site
        .anchor_click("#contact", Some(420.0), 1000.0, header)
        .unwrap();
    assert_eq!(
        patches,
        vec![
            DomPatch::ScrollTo {
                top: 1336.0,
                smooth: true
            },
            DomPatch::PushFragment {
                fragment: "#contact".into()
            },
        ]
    );

    assert!(site.anchor_click("#", Some(0.0), 0.0, header).is_none());
    assert!(site.anchor_click("#missing", None, 0.0, header).is_none());
}
