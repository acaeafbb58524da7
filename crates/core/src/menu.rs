use folio_protocol::{DomPatch, Target};

/// Full-screen mobile navigation overlay.
///
/// Open state is mirrored into the `active` class on both the toggle and
/// the overlay, `aria-expanded` on the toggle, and a scroll lock on `<body>`.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> Vec<DomPatch> {
        self.set_open(!self.open)
    }

    /// Close the menu. Safe to call when already closed.
    pub fn close(&mut self) -> Vec<DomPatch> {
        self.set_open(false)
    }

    /// Escape closes an open menu; other keys and a closed menu are ignored.
    pub fn on_key(&mut self, key: &str) -> Vec<DomPatch> {
        if key == "Escape" && self.open {
            self.close()
        } else {
            Vec::new()
        }
    }

    /// A click on the overlay closes it only when it landed on the overlay
    /// background itself, not on anything inside it.
    pub fn on_overlay_click(&mut self, hit_background: bool) -> Vec<DomPatch> {
        if hit_background {
            self.close()
        } else {
            Vec::new()
        }
    }

    fn set_open(&mut self, open: bool) -> Vec<DomPatch> {
        self.open = open;
        vec![
            DomPatch::class(Target::Hamburger, "active", open),
            DomPatch::class(Target::MobileOverlay, "active", open),
            DomPatch::style(Target::Body, "overflow", if open { "hidden" } else { "" }),
            DomPatch::attribute(Target::Hamburger, "aria-expanded", open.to_string()),
        ]
    }
}

/// Mirror the desktop navigation's active link onto the mobile links.
///
/// With no active desktop link the mobile links are left as they are.
pub fn sync_active<S: AsRef<str>>(desktop_href: Option<&str>, mobile_hrefs: &[S]) -> Vec<DomPatch> {
    let Some(href) = desktop_href else {
        return Vec::new();
    };
    mobile_hrefs
        .iter()
        .enumerate()
        .map(|(i, h)| DomPatch::class(Target::MobileLink(i), "active", h.as_ref() == href))
        .collect()
}
