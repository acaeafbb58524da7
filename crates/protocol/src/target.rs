use serde::{Deserialize, Serialize};

/// Logical page element a patch is addressed to.
///
/// Indexed variants refer to positions in the element lists the driver
/// collected at start-up (document order), so the same index means the same
/// element for both measurement and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// `document.documentElement`, home of page-wide CSS variables.
    Root,
    Body,

    // Mobile menu
    Hamburger,
    MobileOverlay,
    MobileLink(usize),

    // Primary navigation
    NavLink(usize),
    Pill,

    // Parallax decorations
    FooterName,
    ParallaxGrid,

    // Entrance / misc effects
    Card(usize),
    ContactItem(usize),
    Counter(usize),
    Image(usize),
}
