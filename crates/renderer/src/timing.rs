use std::time::{Duration, Instant};

/// Elapsed-time state for the render loop.
///
/// Holds the last-observed monotonic timestamp and the accumulated playback
/// time as an explicit owned struct rather than ambient fields on the
/// renderer. Time only advances when [`FrameTimer::advance`] is called, so a
/// skipped frame contributes nothing to the accumulator.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Option<Instant>,
    elapsed: Duration,
}

impl FrameTimer {
    /// Creates a timer with zero accumulated time and no observed frame.
    pub fn new() -> Self {
        Self {
            last: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the accumulator to `now` and returns the measured delta.
    ///
    /// The first call returns a zero delta; the timestamp is still recorded
    /// so the next call measures a real interval. A non-monotonic `now`
    /// saturates to zero, keeping the accumulator non-decreasing.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.elapsed += delta;
        delta
    }

    /// Accumulated playback time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_yields_zero_delta() {
        let mut timer = FrameTimer::new();
        let delta = timer.advance(Instant::now());
        assert_eq!(delta, Duration::ZERO);
        assert_eq!(timer.elapsed_seconds(), 0.0);
    }

    #[test]
    fn accumulates_real_deltas() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.advance(start);
        let d1 = timer.advance(start + Duration::from_millis(16));
        let d2 = timer.advance(start + Duration::from_millis(48));
        assert_eq!(d1, Duration::from_millis(16));
        assert_eq!(d2, Duration::from_millis(32));
        assert!((timer.elapsed_seconds() - 0.048).abs() < 1e-6);
    }

    #[test]
    fn elapsed_is_monotonically_non_decreasing() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        let mut previous = 0.0_f32;
        for step in 0..10 {
            timer.advance(start + Duration::from_millis(step * 7));
            let elapsed = timer.elapsed_seconds();
            assert!(elapsed >= previous);
            previous = elapsed;
        }
    }

    #[test]
    fn skipped_frames_contribute_no_delta() {
        // Frames 1, 2, 3 render; frame 4 is skipped (advance not called);
        // frame 5 renders. The accumulator must equal the sum of the deltas
        // actually measured, i.e. frame 5's delta spans back to frame 3.
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.advance(start);
        timer.advance(start + Duration::from_millis(16));
        timer.advance(start + Duration::from_millis(32));
        // frame 4 at +48ms never reaches the timer
        timer.advance(start + Duration::from_millis(64));
        assert!((timer.elapsed_seconds() - 0.064).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_saturates_to_zero() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.advance(start + Duration::from_millis(20));
        let delta = timer.advance(start);
        assert_eq!(delta, Duration::ZERO);
        assert!((timer.elapsed_seconds() - 0.0).abs() < 1e-6);
    }
}
