use serde::{Deserialize, Serialize};

use crate::target::Target;

/// A single, stateless DOM mutation.
///
/// The core emits a `Vec<DomPatch>` for each reaction to an event. Drivers
/// apply the list sequentially; every patch carries all the data it needs.
/// Patches addressed to an element the driver never found are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomPatch {
    /// Set an inline style property. An empty `value` removes the property,
    /// matching `element.style.foo = ''`. Custom properties (`--vh`) are
    /// set the same way.
    SetStyle {
        target: Target,
        property: String,
        value: String,
    },

    /// Add (`on == true`) or remove a class.
    SetClass {
        target: Target,
        class: String,
        on: bool,
    },

    /// Set an attribute (ARIA state, `src`, ...).
    SetAttribute {
        target: Target,
        name: String,
        value: String,
    },

    /// Replace the element's text content.
    SetText { target: Target, text: String },

    /// Scroll the window to an absolute vertical offset.
    ScrollTo { top: f64, smooth: bool },

    /// Push a new history entry for `#fragment` without navigating.
    PushFragment { fragment: String },

    /// Append a decorative element to `parent` and remove it again after
    /// `lifetime_ms`. The only structural change the core ever asks for.
    SpawnTransient {
        parent: Target,
        tag: String,
        css_text: String,
        lifetime_ms: u32,
    },
}

impl DomPatch {
    pub fn style(target: Target, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetStyle {
            target,
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn class(target: Target, class: impl Into<String>, on: bool) -> Self {
        Self::SetClass {
            target,
            class: class.into(),
            on,
        }
    }

    pub fn attribute(target: Target, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            target,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn text(target: Target, text: impl Into<String>) -> Self {
        Self::SetText {
            target,
            text: text.into(),
        }
    }

    /// The element this patch mutates, if it addresses one.
    pub fn target(&self) -> Option<Target> {
        match self {
            Self::SetStyle { target, .. }
            | Self::SetClass { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::SetText { target, .. } => Some(*target),
            Self::SpawnTransient { parent, .. } => Some(*parent),
            Self::ScrollTo { .. } | Self::PushFragment { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_serialize_with_variant_tags() {
        let patch = DomPatch::class(Target::NavLink(1), "active", true);
        let json = serde_json::to_string(&patch).unwrap();
        assert!(json.contains("SetClass"));
        assert!(json.contains("NavLink"));
        let back: DomPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }

    #[test]
    fn window_level_patches_have_no_target() {
        assert_eq!(
            DomPatch::ScrollTo {
                top: 0.0,
                smooth: true
            }
            .target(),
            None
        );
        assert_eq!(
            DomPatch::style(Target::Pill, "opacity", "1").target(),
            Some(Target::Pill)
        );
    }
}
