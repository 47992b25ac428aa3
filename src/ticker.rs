// Fixed-interval timer driven by the main loop.
// Visual expectation: while running, the right image gets one batch roughly
// every `interval`; a slow frame never produces a burst of catch-up batches.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>, // None = stopped
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    /// Arm the timer; the first tick is one interval from `now`.
    /// Starting an already running ticker keeps its schedule.
    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Disarm. Nothing fires after this returns.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// True at most once per call when a tick is due; the next one is
    /// scheduled relative to `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS15: Duration = Duration::from_millis(15);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::new(MS15);
        let now = Instant::now();
        assert!(!t.is_running());
        assert!(!t.poll(now + Duration::from_secs(10)));
    }

    #[test]
    fn fires_once_interval_has_passed() {
        let mut t = Ticker::new(MS15);
        let t0 = Instant::now();
        t.start(t0);
        assert!(!t.poll(t0 + Duration::from_millis(14)));
        assert!(t.poll(t0 + MS15));
        assert!(!t.poll(t0 + MS15));
        assert!(t.poll(t0 + MS15 * 2));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let mut t = Ticker::new(MS15);
        let t0 = Instant::now();
        t.start(t0);
        let late = t0 + Duration::from_millis(200);
        assert!(t.poll(late));
        assert!(!t.poll(late));
        assert!(!t.poll(late + Duration::from_millis(14)));
        assert!(t.poll(late + MS15));
    }

    #[test]
    fn stop_is_immediate() {
        let mut t = Ticker::new(MS15);
        let t0 = Instant::now();
        t.start(t0);
        t.stop();
        assert!(!t.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn restart_keeps_existing_schedule() {
        let mut t = Ticker::new(MS15);
        let t0 = Instant::now();
        t.start(t0);
        t.start(t0 + Duration::from_millis(10));
        assert!(t.poll(t0 + MS15));
    }
}
