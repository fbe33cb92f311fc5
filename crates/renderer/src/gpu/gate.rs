use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// Permit-counted gate limiting GPU frames in flight to one.
///
/// The drawing thread acquires the permit before mutating the uniform
/// buffer; the GPU completion callback releases it, potentially from a
/// runtime-owned thread. Built on a bounded(1) channel: the single buffered
/// message is the permit, so the count can never exceed one or go negative.
#[derive(Clone)]
pub struct FrameGate {
    permits: Sender<()>,
    available: Receiver<()>,
}

impl FrameGate {
    /// Creates a gate holding exactly one available permit.
    pub fn new() -> Self {
        let (permits, available) = bounded(1);
        // A fresh bounded(1) channel always has room for the initial permit.
        permits
            .try_send(())
            .expect("empty bounded(1) channel rejected initial permit");
        Self { permits, available }
    }

    /// Blocks the calling thread until the permit is available, then takes it.
    pub fn acquire(&self) {
        // recv only fails if every sender is dropped, and `self` holds one.
        let _ = self.available.recv();
    }

    /// Takes the permit if it is available right now.
    pub fn try_acquire(&self) -> bool {
        self.available.try_recv().is_ok()
    }

    /// Takes the permit, driving `maintain` while it is unavailable.
    ///
    /// Queue completion callbacks only run while the device is maintained
    /// (a blocking poll or a subsequent submit), so a bare blocking wait on
    /// the drawing thread would never see the release land. The caller
    /// supplies the maintenance step and the loop retries until the permit
    /// returns.
    pub fn acquire_with<F>(&self, mut maintain: F)
    where
        F: FnMut(),
    {
        while !self.try_acquire() {
            maintain();
        }
    }

    /// Returns the permit. Releasing an already-full gate is a no-op.
    pub fn release(&self) {
        match self.permits.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) | Err(TrySendError::Disconnected(())) => {}
        }
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}
