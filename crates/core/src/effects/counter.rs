/// Per-frame count-up from zero to a target value.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: f64,
    step: f64,
    current: f64,
}

/// What to show after one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

/// Nominal frame length the step size is derived from.
const FRAME_MS: f64 = 16.0;

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: f64) -> Self {
        let frames = duration_ms / FRAME_MS;
        let step = if frames > 0.0 { target / frames } else { target };
        Self {
            target,
            step,
            current: 0.0,
        }
    }

    /// Parse a `data-target` attribute. A missing attribute counts as zero,
    /// anything non-numeric disables the counter.
    pub fn from_attribute(raw: Option<&str>, duration_ms: f64) -> Option<Self> {
        let target = match raw.map(str::trim) {
            None | Some("") => 0.0,
            Some(s) => s.parse::<f64>().ok().filter(|v| v.is_finite())?,
        };
        Some(Self::new(target, duration_ms))
    }

    /// Advance by one frame. Intermediate values are floored; the final
    /// frame shows the exact target.
    pub fn tick(&mut self) -> CounterFrame {
        self.current += self.step;
        if self.current < self.target {
            CounterFrame {
                text: format!("{}", self.current.floor()),
                done: false,
            }
        } else {
            CounterFrame {
                text: format!("{}", self.target),
                done: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_and_lands_on_target() {
        let mut counter = CounterAnimation::new(250.0, 2000.0);
        let first = counter.tick();
        assert_eq!(first.text, "2");
        assert!(!first.done);

        let mut frames = 1;
        let last = loop {
            let frame = counter.tick();
            frames += 1;
            if frame.done {
                break frame;
            }
        };
        assert_eq!(last.text, "250");
        assert_eq!(frames, 125);
    }

    #[test]
    fn zero_target_finishes_immediately() {
        let mut counter = CounterAnimation::from_attribute(None, 2000.0).unwrap();
        assert_eq!(
            counter.tick(),
            CounterFrame {
                text: "0".into(),
                done: true
            }
        );
    }

    #[test]
    fn non_numeric_target_is_rejected() {
        assert!(CounterAnimation::from_attribute(Some("lots"), 2000.0).is_none());
        assert!(CounterAnimation::from_attribute(Some(" 42 "), 2000.0).is_some());
    }
}
