//! Behaviour for the portfolio page, independent of any browser binding.
//!
//! Every reaction takes a measurement snapshot of the page and returns the
//! [`DomPatch`](folio_protocol::DomPatch) list that realises it. The wasm
//! driver measures, calls in, and applies what comes back.

pub mod anchor;
pub mod config;
pub mod diagnostics;
pub mod effects;
pub mod layout;
pub mod menu;
pub mod nav;
pub mod schedule;
pub mod site;

pub use config::{ConfigError, SiteConfig};
pub use layout::{NavLayout, NavLink, PageLayout, SectionBox};
pub use site::{Site, SiteSnapshot};
