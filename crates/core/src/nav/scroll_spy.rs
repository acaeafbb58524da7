use folio_protocol::{DomPatch, Target};

use crate::config::PillTheme;
use crate::layout::{NavLayout, PageLayout};
use crate::nav::pill::{self, PillPlacement};

/// Result of a scroll-spy pass that changed the active section.
#[derive(Debug, Clone, PartialEq)]
pub struct SpyUpdate {
    pub section: String,
    /// Link classes, then the pill move (unless a hover preview is showing).
    pub patches: Vec<DomPatch>,
    /// `href` of the navigation link now marked active, if one targets the
    /// section. This is what the mobile menu mirrors.
    pub active_href: Option<String>,
}

/// Tracks which section is in view and keeps the pill on its link.
///
/// The hover flag only gates pill movement. It never changes which section
/// is recorded as active.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    current: Option<String>,
    hovering: bool,
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Pick the section that should be active for `page`.
    ///
    /// Near the bottom of the document the last section always wins, even
    /// when the viewport centre sits in an earlier one. Otherwise the section
    /// containing the viewport centre wins (the later one if sections
    /// overlap). With no containing section the current choice is kept, or
    /// the first section before anything was chosen. `None` only when the
    /// page has no sections at all.
    pub fn select(&self, page: &PageLayout, bottom_tolerance: f64) -> Option<String> {
        let first = page.sections.first()?;

        if page.at_bottom(bottom_tolerance) {
            return page.sections.last().map(|s| s.id.clone());
        }

        let center = page.viewport_center();
        let hit = page.sections.iter().rev().find(|s| s.contains(center));

        Some(match hit {
            Some(section) => section.id.clone(),
            None => self.current.clone().unwrap_or_else(|| first.id.clone()),
        })
    }

    /// Re-evaluate the active section. Returns `None` when nothing changed.
    pub fn update(
        &mut self,
        page: &PageLayout,
        nav: &NavLayout,
        bottom_tolerance: f64,
    ) -> Option<SpyUpdate> {
        let next = self.select(page, bottom_tolerance)?;
        if self.current.as_deref() == Some(next.as_str()) {
            return None;
        }

        let mut patches: Vec<DomPatch> = nav
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| DomPatch::class(Target::NavLink(i), "active", link.targets(&next)))
            .collect();

        self.current = Some(next.clone());
        patches.extend(self.pill_to_active(nav));

        let active_href = nav.link_for(&next).map(|(_, link)| link.href.clone());
        Some(SpyUpdate {
            section: next,
            patches,
            active_href,
        })
    }

    /// Move the pill onto the active link. Does nothing while hovering or
    /// when no link targets the active section.
    pub fn pill_to_active(&self, nav: &NavLayout) -> Vec<DomPatch> {
        if self.hovering {
            return Vec::new();
        }
        let Some(section) = self.current.as_deref() else {
            return Vec::new();
        };
        let Some((_, link)) = nav.link_for(section) else {
            return Vec::new();
        };
        PillPlacement::covering(&link.rect, &nav.container).settle()
    }

    /// Pointer entered link `index`: preview the pill there.
    pub fn hover_enter(&mut self, index: usize, nav: &NavLayout, theme: &PillTheme) -> Vec<DomPatch> {
        self.hovering = true;
        match nav.links.get(index) {
            Some(link) => PillPlacement::covering(&link.rect, &nav.container).preview(theme),
            None => Vec::new(),
        }
    }

    /// Pointer left a link: drop the preview and snap back to the active link.
    pub fn hover_leave(&mut self, nav: &NavLayout, theme: &PillTheme) -> Vec<DomPatch> {
        self.hovering = false;
        let mut patches = pill::restore(theme);
        patches.extend(self.pill_to_active(nav));
        patches
    }

    /// Touch on a link. Clears any sticky hover left behind by emulated
    /// mouse events.
    pub fn touch_start(&mut self, nav: &NavLayout, theme: &PillTheme) -> Vec<DomPatch> {
        self.hovering = false;
        let mut patches = pill::restore(theme);
        patches.extend(self.pill_to_active(nav));
        patches
    }
}
