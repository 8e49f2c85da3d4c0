use std::time::Duration;

/// How long the search input must be quiet before a request fires.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum trimmed query length before searching at all.
pub const MIN_QUERY_LEN: usize = 2;

/// Cancel-on-supersede debounce handle.
///
/// Each keystroke arms a new generation; the timer that eventually
/// elapses carries the generation it was armed with, and only the
/// current one is allowed to fire. The same counter doubles as the
/// request guard: a response tagged with a stale generation is dropped.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a new timer, superseding any pending one. Returns the
    /// generation the timer must present when it elapses.
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Invalidate any pending timer without arming a new one.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Whether a timer or response with this generation is still current.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_generation_fires() {
        let mut debounce = Debouncer::new();
        // Three keystrokes inside the window: two superseded timers.
        let g1 = debounce.arm();
        let g2 = debounce.arm();
        let g3 = debounce.arm();

        assert!(!debounce.is_current(g1));
        assert!(!debounce.is_current(g2));
        assert!(debounce.is_current(g3));
    }

    #[test]
    fn test_cancel_invalidates_pending_timer() {
        let mut debounce = Debouncer::new();
        let g = debounce.arm();
        debounce.cancel();
        assert!(!debounce.is_current(g));
    }

    #[test]
    fn test_stale_response_is_not_current() {
        let mut debounce = Debouncer::new();
        let first_request = debounce.arm();
        // A new query dispatched before the first response arrives.
        let second_request = debounce.arm();

        assert!(!debounce.is_current(first_request));
        assert!(debounce.is_current(second_request));
    }
}
