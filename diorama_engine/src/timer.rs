/// Fixed-rate timer for the flipbook.
///
/// Times are durations on a caller-supplied monotonic clock (simulated in
/// tests, `Instant`-relative in the demo). The timer keeps an absolute next
/// deadline and moves it by exactly one period per tick, so rounding never
/// accumulates: tick k fires at `start + k * period`.

use std::time::Duration;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimer {
    period: Duration,
    next: Option<Duration>,
    fired: u64,
}

impl FixedTimer {
    /// Create a stopped timer
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` for a zero period.
    pub fn new(period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(Error::InvalidConfig("timer period must be non-zero".to_string()));
        }
        Ok(Self {
            period,
            next: None,
            fired: 0,
        })
    }

    /// Arm the timer; the first tick is due one period after `now`
    pub fn start(&mut self, now: Duration) {
        self.next = Some(now + self.period);
    }

    /// Disarm the timer; pending ticks are dropped
    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Deadline of the next tick, if armed
    pub fn next_deadline(&self) -> Option<Duration> {
        self.next
    }

    /// Consume one tick if it is due at `now`
    pub fn pop_due(&mut self, now: Duration) -> bool {
        match self.next {
            Some(deadline) if deadline <= now => {
                self.next = Some(deadline + self.period);
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume every tick due at `now`, returning how many fired
    pub fn poll(&mut self, now: Duration) -> u32 {
        let mut count = 0;
        while self.pop_due(now) {
            count += 1;
        }
        count
    }

    /// Ticks fired since creation
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD_48_FPS: Duration = Duration::from_nanos(20_833_333);

    #[test]
    fn test_zero_period_rejected() {
        assert!(matches!(FixedTimer::new(Duration::ZERO), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = FixedTimer::new(PERIOD_48_FPS).unwrap();
        assert!(!timer.is_running());
        assert_eq!(timer.poll(Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_first_tick_one_period_after_start() {
        let mut timer = FixedTimer::new(Duration::from_millis(10)).unwrap();
        timer.start(Duration::from_millis(5));
        assert_eq!(timer.next_deadline(), Some(Duration::from_millis(15)));
        assert!(!timer.pop_due(Duration::from_millis(14)));
        assert!(timer.pop_due(Duration::from_millis(15)));
        assert_eq!(timer.next_deadline(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn test_48_ticks_in_one_second() {
        let mut timer = FixedTimer::new(PERIOD_48_FPS).unwrap();
        timer.start(Duration::ZERO);
        assert_eq!(timer.poll(Duration::from_secs(1)), 48);
        assert_eq!(timer.poll(Duration::from_secs(2)), 48);
        assert_eq!(timer.fired_count(), 96);
    }

    #[test]
    fn test_deadlines_do_not_drift() {
        let mut timer = FixedTimer::new(PERIOD_48_FPS).unwrap();
        timer.start(Duration::ZERO);
        // polling late does not shift later deadlines
        timer.poll(Duration::from_millis(100));
        let ticks = timer.fired_count() as u32;
        assert_eq!(timer.next_deadline(), Some(PERIOD_48_FPS * (ticks + 1)));
    }

    #[test]
    fn test_cancel_drops_pending_ticks() {
        let mut timer = FixedTimer::new(PERIOD_48_FPS).unwrap();
        timer.start(Duration::ZERO);
        timer.cancel();
        assert!(!timer.is_running());
        assert_eq!(timer.next_deadline(), None);
        assert_eq!(timer.poll(Duration::from_secs(1)), 0);
    }
}
