//! Development-only measurements.

/// Hosts on which page-load timing is reported.
pub fn is_dev_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

/// Milliseconds from navigation start to the end of the load event, if the
/// timing entries are populated.
pub fn page_load_ms(navigation_start: f64, load_event_end: f64) -> Option<f64> {
    (navigation_start > 0.0 && load_event_end >= navigation_start)
        .then(|| load_event_end - navigation_start)
}
