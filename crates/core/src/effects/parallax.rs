use folio_protocol::{DomPatch, Target};

use crate::config::ParallaxConfig;
use crate::layout::SectionBox;

/// Which decorations exist on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallaxTargets {
    pub footer_name: bool,
    pub grid: bool,
}

/// Offset the decorations inside `section` in proportion to how far the
/// window has scrolled past its top. Nothing happens while the section is
/// outside the viewport, so the last applied offsets stay in place.
pub fn parallax(
    section: &SectionBox,
    scroll_y: f64,
    viewport_height: f64,
    targets: ParallaxTargets,
    config: &ParallaxConfig,
) -> Vec<DomPatch> {
    let in_view =
        scroll_y + viewport_height > section.top && scroll_y < section.top + section.height;
    if !in_view {
        return Vec::new();
    }

    let delta = scroll_y - section.top;
    let mut patches = Vec::with_capacity(2);
    if targets.footer_name {
        patches.push(DomPatch::style(
            Target::FooterName,
            "transform",
            format!("translateX(-50%) translateY({}px)", delta * config.name_factor),
        ));
    }
    if targets.grid {
        patches.push(DomPatch::style(
            Target::ParallaxGrid,
            "transform",
            format!("translateY({}px)", delta * config.grid_factor),
        ));
    }
    patches
}
