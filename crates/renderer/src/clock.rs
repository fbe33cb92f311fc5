use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, select, tick, Sender};
use tracing::debug;

/// Nominal redraw interval: 16 ms, approximating 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Periodic redraw trigger.
///
/// Once started, the clock invokes the supplied handler at a fixed nominal
/// interval from a dedicated ticker thread until stopped. The handler only
/// signals that a new frame may be drawn; actual frame timing is measured at
/// draw time from the monotonic clock, decoupling presentation cadence from
/// the ticker's accuracy.
pub struct FrameClock {
    interval: Duration,
    active: Option<ClockHandle>,
}

struct ClockHandle {
    stop_tx: Sender<()>,
    join: JoinHandle<()>,
}

impl FrameClock {
    /// Creates a stopped clock with the given tick interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    /// Starts the ticker thread.
    ///
    /// Any previously active ticker is stopped first, so at most one clock
    /// is ever live.
    pub fn start<F>(&mut self, handler: F) -> Result<()>
    where
        F: Fn() + Send + 'static,
    {
        self.stop();

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let ticks = tick(self.interval);
        let interval = self.interval;
        let join = thread::Builder::new()
            .name("shaderloop-clock".into())
            .spawn(move || {
                debug!(interval_ms = interval.as_millis() as u64, "frame clock started");
                loop {
                    select! {
                        recv(ticks) -> _ => handler(),
                        recv(stop_rx) -> _ => break,
                    }
                }
                debug!("frame clock stopped");
            })
            .map_err(|err| anyhow!("failed to spawn frame clock thread: {err}"))?;

        self.active = Some(ClockHandle { stop_tx, join });
        Ok(())
    }

    /// Stops the ticker thread. Stopping an already-stopped clock is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            let _ = handle.stop_tx.send(());
            let _ = handle.join.join();
        }
    }

    /// Reports whether a ticker thread is currently live.
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for FrameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ticks_invoke_handler_until_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let observed = count.clone();
        let mut clock = FrameClock::new(Duration::from_millis(5));
        clock
            .start(move || {
                observed.fetch_add(1, Ordering::SeqCst);
            })
            .expect("clock start");
        assert!(clock.is_running());

        thread::sleep(Duration::from_millis(100));
        clock.stop();
        let ticked = count.load(Ordering::SeqCst);
        assert!(ticked >= 1, "expected at least one tick, saw {ticked}");

        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::SeqCst), ticked, "ticks after stop");
    }

    #[test]
    fn restart_replaces_previous_ticker() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut clock = FrameClock::new(Duration::from_millis(5));

        let observed = first.clone();
        clock
            .start(move || {
                observed.fetch_add(1, Ordering::SeqCst);
            })
            .expect("first start");
        thread::sleep(Duration::from_millis(30));

        let observed = second.clone();
        clock
            .start(move || {
                observed.fetch_add(1, Ordering::SeqCst);
            })
            .expect("second start");
        let frozen = first.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        clock.stop();

        assert_eq!(first.load(Ordering::SeqCst), frozen, "old ticker kept running");
        assert!(second.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut clock = FrameClock::new(Duration::from_millis(5));
        clock.stop();
        clock.start(|| {}).expect("clock start");
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
    }
}
