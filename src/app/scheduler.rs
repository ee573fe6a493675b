use std::time::{Duration, Instant};

/// Ticks at `t = 0, I, 2I, ...` for every tick strictly before the
/// duration, `ceil(D / I)` in total.
pub struct InjectionScheduler {
    started_at: Instant,
    interval: Duration,
    duration: Duration,
    emitted: u64,
    total: u64,
}

impl InjectionScheduler {
    pub fn new(interval: Duration, duration: Duration, started_at: Instant) -> Self {
        let total = if interval.is_zero() || duration.is_zero() {
            0
        } else {
            duration.as_nanos().div_ceil(interval.as_nanos()) as u64
        };

        Self {
            started_at,
            interval,
            duration,
            emitted: 0,
            total,
        }
    }

    pub fn poll(&mut self, now: Instant) -> usize {
        if self.is_finished() {
            return 0;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let ticks_elapsed = if elapsed >= self.duration {
            self.total
        } else {
            let passed = (elapsed.as_nanos() / self.interval.as_nanos()) as u64 + 1;
            passed.min(self.total)
        };

        let due = ticks_elapsed.saturating_sub(self.emitted);
        self.emitted = ticks_elapsed;
        due as usize
    }

    pub fn is_finished(&self) -> bool {
        self.emitted >= self.total
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    #[test]
    fn first_injection_fires_immediately() {
        let start = Instant::now();
        let mut scheduler = InjectionScheduler::new(secs(60), secs(1800), start);
        assert_eq!(scheduler.poll(start), 1);
        assert_eq!(scheduler.poll(start), 0);
    }

    #[test]
    fn emits_ceil_of_duration_over_interval() {
        let start = Instant::now();
        let mut scheduler = InjectionScheduler::new(secs(3), secs(10), start);

        // ticks at 0, 3, 6, 9 = ceil(10 / 3) = 4
        let mut emitted = 0;
        for offset in 0..=10 {
            emitted += scheduler.poll(start + secs(offset));
        }
        assert_eq!(emitted, 4);
        assert!(scheduler.is_finished());
    }

    #[test]
    fn emits_nothing_after_duration_elapses() {
        let start = Instant::now();
        let mut scheduler = InjectionScheduler::new(secs(5), secs(20), start);

        assert_eq!(scheduler.poll(start + secs(100)), 4);
        assert_eq!(scheduler.poll(start + secs(200)), 0);
        assert!(scheduler.is_finished());
    }

    #[test]
    fn exact_multiple_excludes_the_final_boundary_tick() {
        let start = Instant::now();
        let mut scheduler = InjectionScheduler::new(secs(5), secs(20), start);

        // ticks at 0, 5, 10, 15; t = 20 is already past the duration
        let mut emitted = 0;
        for offset in 0..=20 {
            emitted += scheduler.poll(start + secs(offset));
        }
        assert_eq!(emitted, 4);
    }

    #[test]
    fn slow_frames_catch_up_in_one_poll() {
        let start = Instant::now();
        let mut scheduler = InjectionScheduler::new(secs(2), secs(30), start);

        assert_eq!(scheduler.poll(start), 1);
        // no polls for 9 seconds: ticks at 2, 4, 6, 8 are all due at once
        assert_eq!(scheduler.poll(start + secs(9)), 4);
    }

    #[test]
    fn zero_interval_or_duration_never_fires() {
        let start = Instant::now();
        let mut zero_interval = InjectionScheduler::new(secs(0), secs(10), start);
        assert_eq!(zero_interval.poll(start + secs(5)), 0);
        assert!(zero_interval.is_finished());

        let mut zero_duration = InjectionScheduler::new(secs(5), secs(0), start);
        assert_eq!(zero_duration.poll(start), 0);
        assert!(zero_duration.is_finished());
    }

    #[test]
    fn remaining_time_counts_down_to_zero() {
        let start = Instant::now();
        let scheduler = InjectionScheduler::new(secs(5), secs(20), start);
        assert_eq!(scheduler.remaining(start + secs(5)), secs(15));
        assert_eq!(scheduler.remaining(start + secs(25)), secs(0));
    }
}
