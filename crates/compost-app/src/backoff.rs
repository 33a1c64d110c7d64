//! Bounded exponential backoff for "try again later" waits.

use std::time::Duration;

/// Doubling delay between a floor and a ceiling.
#[derive(Debug, Clone)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    /// Default first delay.
    pub const DEFAULT_MIN: Duration = Duration::from_millis(10);
    /// Default ceiling.
    pub const DEFAULT_MAX: Duration = Duration::from_secs(1);
    /// Smallest accepted floor. A zero floor would never grow.
    pub const MIN_FLOOR: Duration = Duration::from_millis(1);

    /// Create a backoff starting at `min` and capped at `max`.
    ///
    /// `min` is raised to [`Self::MIN_FLOOR`].
    pub fn new(min: Duration, max: Duration) -> Self {
        let min = min.max(Self::MIN_FLOOR);
        let max = max.max(min);
        Self { min, max, current: min }
    }

    /// Delay for the next wait, advancing the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    /// Sleep for the next delay.
    pub async fn wait(&mut self) {
        let delay = self.next_delay();
        tracing::trace!(component = "input_pump", ?delay, "no input available, backing off");
        tokio::time::sleep(delay).await;
    }

    /// Restart from the floor.
    pub fn reset(&mut self) {
        self.current = self.min;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_until_capped() {
        let mut backoff = Backoff::new(Duration::from_millis(10), Duration::from_millis(50));
        let delays: Vec<_> = (0..5).map(|_| backoff.next_delay().as_millis()).collect();

        assert_eq!(delays, vec![10, 20, 40, 50, 50]);
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut backoff = Backoff::default();
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();

        assert_eq!(backoff.next_delay(), Backoff::DEFAULT_MIN);
    }

    #[test]
    fn ceiling_below_floor_is_raised() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_millis(1));
        backoff.next_delay();

        assert_eq!(backoff.next_delay(), Duration::from_millis(100));
    }

    #[test]
    fn zero_floor_still_grows() {
        let mut backoff = Backoff::new(Duration::ZERO, Duration::from_millis(8));
        let delays: Vec<_> = (0..5).map(|_| backoff.next_delay().as_millis()).collect();

        assert_eq!(delays, vec![1, 2, 4, 8, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_the_current_delay() {
        let mut backoff = Backoff::new(Duration::from_millis(10), Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        backoff.wait().await;
        backoff.wait().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(30));
        assert!(elapsed < Duration::from_millis(40));
    }
}
