//! Small one-shot effects layered on top of the navigation.

pub mod counter;
pub mod lazy;
pub mod page_state;
pub mod parallax;
pub mod reveal;
pub mod ripple;
pub mod swipe;

pub use counter::CounterAnimation;
pub use swipe::{Swipe, SwipeTracker};
