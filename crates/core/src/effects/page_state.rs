//! Page-wide classes and CSS variables.

use folio_protocol::{DomPatch, Target};

/// `--vh` holds one percent of the real viewport height, for mobile browsers
/// whose `100vh` includes the collapsing toolbar.
pub fn viewport_height_var(inner_height: f64) -> DomPatch {
    DomPatch::style(Target::Root, "--vh", format!("{}px", inner_height * 0.01))
}

pub fn scrolling(on: bool) -> DomPatch {
    DomPatch::class(Target::Body, "is-scrolling", on)
}

/// Tab switches on keyboard focus styling.
pub fn on_key(key: &str) -> Option<DomPatch> {
    (key == "Tab").then(|| DomPatch::class(Target::Body, "keyboard-nav", true))
}

/// Any mouse press switches keyboard focus styling back off.
pub fn on_mouse_down() -> DomPatch {
    DomPatch::class(Target::Body, "keyboard-nav", false)
}
