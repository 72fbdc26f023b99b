//! Idle countdown timer

/// Millisecond countdown armed by the idle-line detector
///
/// `tick` is driven once per millisecond while armed. Re-arming restarts the countdown
/// from the full duration: idle-line pulses are independent restarts. A wrap pre-empts
/// a running countdown through `disarm`. Expiry is reported to the caller, which
/// dispatches the timeout event; the timer holds no reference to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CountdownTimer {
    armed: bool,
    countdown_ms: u16,
}

impl CountdownTimer {
    pub(crate) const fn new() -> Self {
        Self {
            armed: false,
            countdown_ms: 0,
        }
    }

    pub(crate) const fn is_armed(&self) -> bool {
        self.armed
    }

    /// Starts (or restarts) the countdown. A zero duration expires on the next tick.
    pub(crate) const fn arm(&mut self, duration_ms: u16) {
        self.armed = true;
        self.countdown_ms = duration_ms;
    }

    pub(crate) const fn disarm(&mut self) {
        self.armed = false;
        self.countdown_ms = 0;
    }

    /// Advances the countdown by one millisecond tick.
    ///
    /// Returns true when the countdown expires on this tick; the timer disarms itself
    /// at expiry. Bounded, branch-only work: runs on every tick of a time-critical
    /// periodic context.
    pub(crate) const fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        if self.countdown_ms <= 1 {
            self.armed = false;
            self.countdown_ms = 0;
            true
        } else {
            self.countdown_ms -= 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_duration() {
        let mut timer = CountdownTimer::new();
        timer.arm(10);

        for _ in 0..9 {
            assert!(!timer.tick());
            assert!(timer.is_armed());
        }
        assert!(timer.tick());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_rearm_restarts() {
        let mut timer = CountdownTimer::new();
        timer.arm(3);
        assert!(!timer.tick());
        assert!(!timer.tick());

        timer.arm(3);
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert!(timer.tick());
    }

    #[test]
    fn test_disarm_suppresses_expiry() {
        let mut timer = CountdownTimer::new();
        timer.arm(2);
        assert!(!timer.tick());
        timer.disarm();
        assert!(!timer.tick());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_tick_unarmed_is_noop() {
        let mut timer = CountdownTimer::new();
        assert!(!timer.tick());
        assert!(!timer.tick());
    }

    #[test]
    fn test_zero_duration_expires_next_tick() {
        let mut timer = CountdownTimer::new();
        timer.arm(0);
        assert!(timer.tick());
    }
}
