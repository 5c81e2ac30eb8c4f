//! Leading + trailing rate limiter for bursty UI events.
//!
//! The gate never touches a clock or a timer itself. Callers pass the current
//! time in milliseconds and act on the returned instructions: invoke the
//! handler now, and/or arm a one-shot timer that must call `on_timer` after
//! the given delay. This keeps the policy testable off the browser.
//!
//! Within any window of `interval_ms` the handler runs at most once. The first
//! event of a burst runs immediately; the rest of the burst collapses into a
//! single trailing call when the window closes.

/// Instruction returned for an incoming event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    /// Run the handler now
    Invoke { arm_timer_ms: Option<u64> },
    /// Swallowed for now; a trailing call is pending
    Coalesced { arm_timer_ms: Option<u64> },
}

impl EventAction {
    pub fn should_invoke(&self) -> bool {
        matches!(self, EventAction::Invoke { .. })
    }

    /// Delay after which `on_timer` must be called, if a timer is not already armed
    pub fn arm_timer_ms(&self) -> Option<u64> {
        match self {
            EventAction::Invoke { arm_timer_ms } | EventAction::Coalesced { arm_timer_ms } => {
                *arm_timer_ms
            }
        }
    }
}

/// Instruction returned when the trailing timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerAction {
    pub invoke: bool,
    pub arm_timer_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: u64,
    last_invoked: Option<u64>,
    pending: bool,
    timer_armed: bool,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_invoked: None,
            pending: false,
            timer_armed: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    fn remaining(&self, now: u64) -> Option<u64> {
        let last = self.last_invoked?;
        let elapsed = now.saturating_sub(last);
        (elapsed < self.interval_ms).then(|| self.interval_ms - elapsed)
    }

    fn arm(&mut self, delay: u64) -> Option<u64> {
        if self.timer_armed {
            None
        } else {
            self.timer_armed = true;
            Some(delay)
        }
    }

    pub fn on_event(&mut self, now: u64) -> EventAction {
        match self.remaining(now) {
            None => {
                self.last_invoked = Some(now);
                self.pending = false;
                let arm_timer_ms = self.arm(self.interval_ms);
                EventAction::Invoke { arm_timer_ms }
            }
            Some(remaining) => {
                self.pending = true;
                let arm_timer_ms = self.arm(remaining);
                EventAction::Coalesced { arm_timer_ms }
            }
        }
    }

    pub fn on_timer(&mut self, now: u64) -> TimerAction {
        self.timer_armed = false;

        if !self.pending {
            return TimerAction {
                invoke: false,
                arm_timer_ms: None,
            };
        }

        if let Some(remaining) = self.remaining(now) {
            // Timer fired early; wait out the rest of the window
            return TimerAction {
                invoke: false,
                arm_timer_ms: self.arm(remaining),
            };
        }

        self.pending = false;
        self.last_invoked = Some(now);
        TimerAction {
            invoke: true,
            arm_timer_ms: self.arm(self.interval_ms),
        }
    }

    /// Forget pending work, e.g. when the listener is removed
    pub fn cancel(&mut self) {
        self.pending = false;
        self.timer_armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays events against the gate with an idealised timer and returns invocation times
    fn simulate(interval: u64, events: &[u64], until: u64) -> Vec<u64> {
        let mut throttle = Throttle::new(interval);
        let mut invoked = Vec::new();
        let mut timer_at: Option<u64> = None;
        let mut events = events.iter().copied().peekable();

        for now in 0..=until {
            if timer_at == Some(now) {
                timer_at = None;
                let action = throttle.on_timer(now);
                if action.invoke {
                    invoked.push(now);
                }
                if let Some(delay) = action.arm_timer_ms {
                    timer_at = Some(now + delay);
                }
            }
            while events.peek() == Some(&now) {
                events.next();
                let action = throttle.on_event(now);
                if action.should_invoke() {
                    invoked.push(now);
                }
                if let Some(delay) = action.arm_timer_ms() {
                    timer_at = Some(now + delay);
                }
            }
        }
        invoked
    }

    #[test]
    fn test_first_event_fires_immediately() {
        let mut throttle = Throttle::new(500);
        assert_eq!(
            throttle.on_event(1000),
            EventAction::Invoke { arm_timer_ms: Some(500) }
        );
    }

    #[test]
    fn test_burst_collapses_into_one_trailing_call() {
        let invoked = simulate(500, &[0, 50, 100, 200, 450], 2000);
        assert_eq!(invoked, vec![0, 500]);
    }

    #[test]
    fn test_single_event_has_no_trailing_call() {
        let invoked = simulate(500, &[10], 2000);
        assert_eq!(invoked, vec![10]);
    }

    #[test]
    fn test_continuous_scrolling_fires_once_per_interval() {
        let events: Vec<u64> = (0..3000).step_by(20).collect();
        let invoked = simulate(500, &events, 4000);

        assert_eq!(invoked, vec![0, 500, 1000, 1500, 2000, 2500, 3000]);
        for pair in invoked.windows(2) {
            assert!(pair[1] - pair[0] >= 500);
        }
    }

    #[test]
    fn test_quiet_period_resets_window() {
        let invoked = simulate(500, &[0, 1200, 1300], 3000);
        assert_eq!(invoked, vec![0, 1200, 1700]);
    }

    #[test]
    fn test_coalesced_event_only_arms_once() {
        let mut throttle = Throttle::new(500);
        throttle.on_event(0);
        assert_eq!(throttle.on_event(100), EventAction::Coalesced { arm_timer_ms: None });
        assert!(throttle.has_pending());
    }

    #[test]
    fn test_early_timer_waits_out_window() {
        let mut throttle = Throttle::new(500);
        throttle.on_event(0);
        throttle.on_event(100);

        let action = throttle.on_timer(300);
        assert_eq!(action, TimerAction { invoke: false, arm_timer_ms: Some(200) });
        assert!(throttle.on_timer(500).invoke);
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let mut throttle = Throttle::new(500);
        throttle.on_event(0);
        throttle.on_event(100);
        throttle.cancel();

        assert!(!throttle.on_timer(500).invoke);
    }
}
