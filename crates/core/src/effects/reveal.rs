//! Entrance animations driven by visibility observation.

use folio_protocol::{DomPatch, Target};

use crate::config::RevealConfig;

/// Hide card `index` and give it a transition staggered by its position.
pub fn card_hidden(index: usize, config: &RevealConfig) -> Vec<DomPatch> {
    let delay = index as f64 * config.card_stagger_s;
    vec![
        DomPatch::style(Target::Card(index), "opacity", "0"),
        DomPatch::style(Target::Card(index), "transform", "translateY(20px)"),
        DomPatch::style(
            Target::Card(index),
            "transition",
            format!("opacity 0.6s ease {delay}s, transform 0.6s ease {delay}s"),
        ),
    ]
}

pub fn card_shown(index: usize) -> Vec<DomPatch> {
    vec![
        DomPatch::style(Target::Card(index), "opacity", "1"),
        DomPatch::style(Target::Card(index), "transform", "translateY(0)"),
    ]
}

pub fn contact_hidden(index: usize) -> Vec<DomPatch> {
    vec![
        DomPatch::style(Target::ContactItem(index), "opacity", "0"),
        DomPatch::style(Target::ContactItem(index), "transform", "translateX(-30px)"),
        DomPatch::style(
            Target::ContactItem(index),
            "transition",
            "opacity 0.6s ease, transform 0.6s ease",
        ),
    ]
}

pub fn contact_shown(index: usize) -> Vec<DomPatch> {
    vec![
        DomPatch::style(Target::ContactItem(index), "opacity", "1"),
        DomPatch::style(Target::ContactItem(index), "transform", "translateX(0)"),
    ]
}

/// Delay before revealing the `position`-th entry of one observer batch.
pub fn contact_delay_ms(position: usize, config: &RevealConfig) -> u32 {
    u32::try_from(position)
        .unwrap_or(u32::MAX)
        .saturating_mul(config.contact_stagger_ms)
}
