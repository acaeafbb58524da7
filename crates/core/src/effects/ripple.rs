use folio_protocol::{DomPatch, Point, Rect, Target};

/// Installed once into `<head>` so spawned ripples can animate.
pub const RIPPLE_KEYFRAMES: &str = "
  @keyframes ripple {
    to {
      transform: translate(-50%, -50%) scale(4);
      opacity: 0;
    }
  }
";

/// Ripple for a click at `click` (viewport coordinates) on card `index`.
pub fn ripple(index: usize, card: &Rect, click: Point, lifetime_ms: u32) -> Vec<DomPatch> {
    let x = click.x - card.x;
    let y = click.y - card.y;
    let seconds = f64::from(lifetime_ms) / 1000.0;
    let css_text = format!(
        "position: absolute; border-radius: 50%; background: rgba(255, 255, 255, 0.3); \
         width: 20px; height: 20px; left: {x}px; top: {y}px; \
         transform: translate(-50%, -50%) scale(0); animation: ripple {seconds}s ease-out; \
         pointer-events: none;"
    );
    vec![
        DomPatch::style(Target::Card(index), "position", "relative"),
        DomPatch::SpawnTransient {
            parent: Target::Card(index),
            tag: "span".into(),
            css_text,
            lifetime_ms,
        },
    ]
}
