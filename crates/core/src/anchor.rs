//! Same-page anchor navigation with a header-aware offset.

use folio_protocol::DomPatch;

/// The element id an in-page `href` points at, or `None` for a bare `#` or
/// anything that is not a fragment link.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Integer-prefix parse of a CSS length such as `"80px"` or `" 72"`.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit. Returns `None` when no digit is found.
pub fn parse_css_int(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: f64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Header height to keep clear when scrolling to an anchor.
///
/// Prefers the live rendered height, then the CSS variable, then
/// `fallback`. A zero (or missing) value at either step falls through.
pub fn header_height(live: Option<f64>, css_var: Option<&str>, fallback: f64) -> f64 {
    let nonzero = |v: f64| (v != 0.0 && v.is_finite()).then_some(v);
    live.and_then(nonzero)
        .or_else(|| css_var.and_then(parse_css_int).and_then(nonzero))
        .unwrap_or(fallback)
}

/// Absolute scroll offset that puts a target just under the header.
///
/// `target_top` is viewport-relative (`getBoundingClientRect().top`).
pub fn scroll_offset(target_top: f64, scroll_y: f64, header_height: f64, padding: f64) -> f64 {
    target_top + scroll_y - (header_height + padding)
}

/// Patches for a click on `href` whose target was found at `target_top`.
///
/// Returns `None` when the click should be left alone: a bare `#`, a non
/// fragment link, or a target that does not exist.
pub fn plan_scroll(
    href: &str,
    target_top: Option<f64>,
    scroll_y: f64,
    header_height: f64,
    padding: f64,
) -> Option<Vec<DomPatch>> {
    fragment_id(href)?;
    let top = target_top?;
    Some(vec![
        DomPatch::ScrollTo {
            top: scroll_offset(top, scroll_y, header_height, padding),
            smooth: true,
        },
        DomPatch::PushFragment {
            fragment: href.to_string(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_ignored() {
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about"), None);
        assert_eq!(fragment_id("#contact"), Some("contact"));
        assert!(plan_scroll("#", Some(10.0), 0.0, 80.0, 20.0).is_none());
    }

    #[test]
    fn missing_target_is_ignored() {
        assert!(plan_scroll("#nowhere", None, 0.0, 80.0, 20.0).is_none());
    }

    #[test]
    fn offset_leaves_room_for_header() {
        let patches = plan_scroll("#projects", Some(350.0), 450.0, 64.0, 20.0).unwrap();
        assert_eq!(
            patches,
            vec![
                DomPatch::ScrollTo {
                    top: 716.0,
                    smooth: true
                },
                DomPatch::PushFragment {
                    fragment: "#projects".into()
                },
            ]
        );
    }

    #[test]
    fn css_int_parsing() {
        assert_eq!(parse_css_int("80px"), Some(80.0));
        assert_eq!(parse_css_int("  72"), Some(72.0));
        assert_eq!(parse_css_int("-5rem"), Some(-5.0));
        assert_eq!(parse_css_int("px"), None);
        assert_eq!(parse_css_int(""), None);
        assert_eq!(parse_css_int("12.9px"), Some(12.0));
    }

    #[test]
    fn header_height_fallback_chain() {
        assert_eq!(header_height(Some(64.0), Some("72px"), 80.0), 64.0);
        assert_eq!(header_height(Some(0.0), Some("72px"), 80.0), 72.0);
        assert_eq!(header_height(None, Some("0"), 80.0), 80.0);
        assert_eq!(header_height(None, Some("auto"), 80.0), 80.0);
        assert_eq!(header_height(None, None, 80.0), 80.0);
    }
}
