use folio_protocol::Rect;
use serde::{Deserialize, Serialize};

/// Document-space extent of one page section (`offsetTop`/`offsetHeight`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBox {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Scroll state of the window plus the sections that exist on the page, in
/// configured order. Sections missing from the document are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub sections: Vec<SectionBox>,
}

impl PageLayout {
    pub fn viewport_center(&self) -> f64 {
        self.scroll_y + self.viewport_height / 2.0
    }

    /// Whether the viewport bottom is within `tolerance` of the document end.
    pub fn at_bottom(&self, tolerance: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.document_height - tolerance
    }
}

/// One navigation anchor: its raw `href` and viewport-relative box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub rect: Rect,
}

impl NavLink {
    pub fn new(href: impl Into<String>, rect: Rect) -> Self {
        Self {
            href: href.into(),
            rect,
        }
    }

    /// True if this link points at `#section`.
    pub fn targets(&self, section: &str) -> bool {
        self.href
            .strip_prefix('#')
            .is_some_and(|fragment| fragment == section)
    }
}

/// The navigation container and its links, measured in viewport space.
/// Link order matches `Target::NavLink` indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLayout {
    pub container: Rect,
    pub links: Vec<NavLink>,
}

impl NavLayout {
    pub fn link_for(&self, section: &str) -> Option<(usize, &NavLink)> {
        self.links
            .iter()
            .enumerate()
            .find(|(_, link)| link.targets(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_detection_uses_tolerance() {
        let page = PageLayout {
            scroll_y: 1990.0,
            viewport_height: 600.0,
            document_height: 2600.0,
            sections: vec![],
        };
        assert!(page.at_bottom(10.0));
        assert!(!page.at_bottom(0.0));
    }

    #[test]
    fn link_matches_exact_fragment_only() {
        let link = NavLink::new("#projects", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(link.targets("projects"));
        assert!(!link.targets("project"));
        assert!(!NavLink::new("/projects", link.rect).targets("projects"));
    }
}
