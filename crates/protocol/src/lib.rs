pub mod commands;
pub mod target;
pub mod types;

pub use commands::DomPatch;
pub use target::Target;
pub use types::{Point, Rect};
