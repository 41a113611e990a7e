//! Once-per-revolution synchronisation flag.
//!
//! The rotation sensor interrupt (or the cycle itself, in polled mode) raises
//! the flag; the scheduler consumes it at the start of its next cycle and
//! restarts from column 0. Raising an already raised flag is a no-op, so a
//! double edge within one cycle collapses into a single resync.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::hal::EdgeInput;

/// Revolution flag shared between the sensor and timer interrupts.
///
/// Only plain atomic loads and stores are used, so this works on cores
/// without compare-and-swap (Cortex-M0 class).
#[derive(Debug)]
pub struct RotationSync {
    pending: AtomicBool,
    revolutions: AtomicU32,
}

impl RotationSync {
    /// Creates a sync flag with nothing pending. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            revolutions: AtomicU32::new(0),
        }
    }

    /// Records a revolution.
    #[inline]
    pub fn trigger(&self) {
        self.revolutions.store(
            self.revolutions.load(Ordering::Relaxed).wrapping_add(1),
            Ordering::Relaxed,
        );
        self.pending.store(true, Ordering::Release);
    }

    /// Handles a sensor edge: acknowledges it so the same edge cannot fire
    /// again, then records the revolution.
    ///
    /// Call this from the sensor's interrupt handler.
    #[inline]
    pub fn on_edge<E: EdgeInput>(&self, sensor: &mut E) {
        sensor.acknowledge();
        self.trigger();
    }

    /// Polled mode: if the sensor has latched an edge, handle it.
    ///
    /// Returns true if an edge was found.
    #[inline]
    pub fn poll<E: EdgeInput>(&self, sensor: &mut E) -> bool {
        if sensor.is_triggered() {
            self.on_edge(sensor);
            true
        } else {
            false
        }
    }

    /// Consumes the pending flag, returning whether it was raised.
    #[inline]
    pub fn take(&self) -> bool {
        if self.pending.load(Ordering::Acquire) {
            self.pending.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }

    /// Returns true if a revolution is waiting to be consumed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Number of recorded triggers (wrapping), coalesced ones included.
    pub fn revolutions(&self) -> u32 {
        self.revolutions.load(Ordering::Relaxed)
    }
}

impl Default for RotationSync {
    fn default() -> Self {
        Self::new()
    }
}
