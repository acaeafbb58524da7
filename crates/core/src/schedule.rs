//! Rate-limiting state for event handlers.
//!
//! These types only hold the bookkeeping. Whoever owns them pairs them with
//! the host's animation-frame and timer callbacks.

/// At most one pending animation-frame update per component.
///
/// `request()` answers whether a frame must be scheduled; the frame callback
/// calls `complete()` once its work is done. Bursts of events in between are
/// coalesced into that single update.
#[derive(Debug, Default)]
pub struct FrameGate {
    ticking: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the caller should schedule a frame now.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn complete(&mut self) {
        self.ticking = false;
    }
}

/// Trailing-edge debounce bookkeeping.
///
/// Each `trigger()` hands out a ticket and supersedes every earlier one.
/// When a delayed callback wakes up it calls `fire(ticket)`; only the latest
/// ticket fires, and only once.
#[derive(Debug, Default)]
pub struct Debounce {
    latest: u64,
    fired: bool,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.fired = false;
        self.latest
    }

    pub fn fire(&mut self, ticket: u64) -> bool {
        if ticket != self.latest || self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Run-once guard for initialisation paths reachable from several events.
#[derive(Debug, Default)]
pub struct Once {
    done: bool,
}

impl Once {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time only.
    pub fn first(&mut self) -> bool {
        !std::mem::replace(&mut self.done, true)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
