use std::time::Duration;

/// Interval of the repeat tick while a control is held.
pub const REPEAT_TICK: Duration = Duration::from_millis(100);

/// Ticks of [`REPEAT_TICK`] before a held press starts repeating (500 ms).
const REPEAT_DELAY_TICKS: u8 = 5;

/// Direction of an episode-count update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldAction {
    Increment,
    Decrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Pressed { ticks: u8 },
    Repeating,
}

/// Press-and-hold state machine for the episode stepper controls.
///
/// A press fires one action immediately. If the press is still held
/// after 500 ms the machine starts firing the same action on every
/// 100 ms tick until release. The GUI drives `tick()` from its timer
/// subscription only while `is_active()` holds, and calls `release()`
/// on pointer-up or when the pointer leaves the list region.
#[derive(Debug)]
pub struct HoldController {
    phase: Phase,
    target: Option<(i64, HoldAction)>,
}

impl Default for HoldController {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            target: None,
        }
    }
}

impl HoldController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a hold on `id`. Returns the action to fire immediately.
    pub fn press(&mut self, id: i64, action: HoldAction) -> (i64, HoldAction) {
        self.phase = Phase::Pressed { ticks: 0 };
        self.target = Some((id, action));
        (id, action)
    }

    /// Advance one repeat tick. Returns the action to fire, if any.
    pub fn tick(&mut self) -> Option<(i64, HoldAction)> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { ticks } => {
                let ticks = ticks + 1;
                if ticks >= REPEAT_DELAY_TICKS {
                    self.phase = Phase::Repeating;
                } else {
                    self.phase = Phase::Pressed { ticks };
                }
                None
            }
            Phase::Repeating => self.target,
        }
    }

    /// Pointer released or left the list region: cancel the hold.
    pub fn release(&mut self) {
        self.phase = Phase::Idle;
        self.target = None;
    }

    /// True while a press is held; gates the repeat-tick subscription.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_fires_exactly_once() {
        let mut hold = HoldController::new();
        let fired = hold.press(7, HoldAction::Increment);
        assert_eq!(fired, (7, HoldAction::Increment));

        // Released before the 500 ms mark: ticks produce nothing.
        assert_eq!(hold.tick(), None);
        assert_eq!(hold.tick(), None);
        hold.release();
        assert!(!hold.is_active());
        assert_eq!(hold.tick(), None);
    }

    #[test]
    fn test_long_press_repeats_every_tick_after_delay() {
        let mut hold = HoldController::new();
        hold.press(3, HoldAction::Decrement);

        // 100..500 ms: arming, no repeats yet.
        for _ in 0..5 {
            assert_eq!(hold.tick(), None);
        }
        // 600 ms onward: one action per tick.
        assert_eq!(hold.tick(), Some((3, HoldAction::Decrement)));
        assert_eq!(hold.tick(), Some((3, HoldAction::Decrement)));
        assert_eq!(hold.tick(), Some((3, HoldAction::Decrement)));

        hold.release();
        assert_eq!(hold.tick(), None);
    }

    #[test]
    fn test_new_press_resets_the_delay() {
        let mut hold = HoldController::new();
        hold.press(1, HoldAction::Increment);
        for _ in 0..4 {
            hold.tick();
        }
        // Re-press just before repeating would start.
        hold.press(2, HoldAction::Increment);
        for _ in 0..5 {
            assert_eq!(hold.tick(), None);
        }
        assert_eq!(hold.tick(), Some((2, HoldAction::Increment)));
    }
}
