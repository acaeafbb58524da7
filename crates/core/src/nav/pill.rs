use folio_protocol::{DomPatch, Point, Rect, Target};

use crate::config::PillTheme;

/// Where the pill has to go to cover one navigation link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillPlacement {
    pub width: f64,
    pub height: f64,
    /// Translation relative to the navigation container's origin.
    pub offset: Point,
}

impl PillPlacement {
    pub fn covering(link: &Rect, container: &Rect) -> Self {
        Self {
            width: link.w,
            height: link.h,
            offset: link.offset_from(container),
        }
    }

    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.offset.x, self.offset.y)
    }

    fn geometry(&self) -> [DomPatch; 3] {
        [
            DomPatch::style(Target::Pill, "width", format!("{}px", self.width)),
            DomPatch::style(Target::Pill, "height", format!("{}px", self.height)),
            DomPatch::style(Target::Pill, "transform", self.transform()),
        ]
    }

    /// Settle on the active link at full opacity.
    pub fn settle(&self) -> Vec<DomPatch> {
        let mut patches = self.geometry().to_vec();
        patches.push(DomPatch::style(Target::Pill, "opacity", "1"));
        patches
    }

    /// Translucent, outlined preview over a hovered link.
    pub fn preview(&self, theme: &PillTheme) -> Vec<DomPatch> {
        let mut patches = vec![
            DomPatch::style(Target::Pill, "opacity", theme.hover_opacity.to_string()),
            DomPatch::style(Target::Pill, "background", theme.hover_background.as_str()),
            DomPatch::style(Target::Pill, "border", theme.hover_border.as_str()),
        ];
        patches.extend(self.geometry());
        patches
    }
}

/// Undo the hover treatment at full opacity. Geometry is left to the caller.
pub fn restore(theme: &PillTheme) -> Vec<DomPatch> {
    vec![
        DomPatch::style(Target::Pill, "opacity", "1"),
        DomPatch::style(Target::Pill, "background", theme.active_background.as_str()),
        DomPatch::style(Target::Pill, "border", "none"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_of<'a>(patches: &'a [DomPatch], name: &str) -> Option<&'a str> {
        patches.iter().rev().find_map(|p| match p {
            DomPatch::SetStyle {
                property, value, ..
            } if property == name => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn placement_covers_link_relative_to_nav() {
        let nav = Rect::new(40.0, 12.0, 400.0, 56.0);
        let link = Rect::new(152.5, 20.0, 96.0, 40.0);
        let placement = PillPlacement::covering(&link, &nav);
        let patches = placement.settle();
        assert_eq!(style_of(&patches, "width"), Some("96px"));
        assert_eq!(style_of(&patches, "height"), Some("40px"));
        assert_eq!(
            style_of(&patches, "transform"),
            Some("translate(112.5px, 8px)")
        );
        assert_eq!(style_of(&patches, "opacity"), Some("1"));
    }

    #[test]
    fn preview_is_translucent() {
        let nav = Rect::new(0.0, 0.0, 400.0, 56.0);
        let link = Rect::new(10.0, 8.0, 80.0, 40.0);
        let theme = PillTheme::default();
        let patches = PillPlacement::covering(&link, &nav).preview(&theme);
        assert_eq!(style_of(&patches, "opacity"), Some("0.5"));
        assert_eq!(style_of(&patches, "border"), Some(theme.hover_border.as_str()));
    }

    #[test]
    fn restore_removes_border_at_full_opacity() {
        let theme = PillTheme::default();
        let patches = restore(&theme);
        assert_eq!(style_of(&patches, "border"), Some("none"));
        assert_eq!(style_of(&patches, "opacity"), Some("1"));
    }
}
