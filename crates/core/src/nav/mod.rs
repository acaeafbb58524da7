pub mod pill;
pub mod scroll_spy;

pub use pill::PillPlacement;
pub use scroll_spy::{ScrollSpy, SpyUpdate};
