use std::time::{Duration, Instant};

/// Debounced text value: rapid edits within the delay window collapse into a
/// single settled value. Time is injected so the state machine is testable
/// without timers or a UI runtime.
#[derive(Debug, Clone)]
pub struct Debounced {
    settled: String,
    pending: Option<(String, Instant)>,
    delay: Duration,
}

impl Debounced {
    pub fn new(delay: Duration) -> Self {
        Self {
            settled: String::new(),
            pending: None,
            delay,
        }
    }

    /// Record a keystroke. Restarts the settle window; typing back to the
    /// already-settled value cancels the pending change.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if text == self.settled {
            self.pending = None;
        } else {
            self.pending = Some((text, now + self.delay));
        }
    }

    /// Promote the pending value once its window has elapsed. Returns the
    /// newly settled value at most once per settle.
    pub fn poll(&mut self, now: Instant) -> Option<&str> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            if let Some((value, _)) = self.pending.take() {
                self.settled = value;
                return Some(&self.settled);
            }
        }
        None
    }

    /// The settled value used as the actual query parameter.
    pub fn value(&self) -> &str {
        &self.settled
    }

    /// What the input box currently shows: the in-flight text if any.
    pub fn raw(&self) -> &str {
        self.pending
            .as_ref()
            .map(|(text, _)| text.as_str())
            .unwrap_or(&self.settled)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    #[test]
    fn rapid_keystrokes_settle_once_with_final_value() {
        let t0 = Instant::now();
        let mut d = Debounced::new(DELAY);

        d.input("j", t0);
        d.input("ju", t0 + Duration::from_millis(50));
        d.input("juan", t0 + Duration::from_millis(100));

        // Still inside the window of the last keystroke.
        assert_eq!(d.poll(t0 + Duration::from_millis(350)), None);
        assert_eq!(d.value(), "");

        // Settles exactly once with only the final text.
        assert_eq!(d.poll(t0 + Duration::from_millis(400)), Some("juan"));
        assert_eq!(d.poll(t0 + Duration::from_millis(500)), None);
        assert_eq!(d.value(), "juan");
    }

    #[test]
    fn typing_back_to_settled_value_cancels_pending() {
        let t0 = Instant::now();
        let mut d = Debounced::new(DELAY);

        d.input("abc", t0);
        assert_eq!(d.poll(t0 + DELAY), Some("abc"));

        d.input("abcd", t0 + Duration::from_millis(400));
        d.input("abc", t0 + Duration::from_millis(450));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + Duration::from_secs(2)), None);
    }

    #[test]
    fn raw_tracks_inflight_text() {
        let t0 = Instant::now();
        let mut d = Debounced::new(DELAY);
        d.input("pend", t0);
        assert_eq!(d.raw(), "pend");
        assert_eq!(d.value(), "");
    }
}
