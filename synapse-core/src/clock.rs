//! Time sources for pacing and rate limiting.
//!
//! The engine never calls the OS clock directly. It goes through the
//! [`Clock`] trait so tests can drive time by hand and replays stay
//! deterministic. Only relative milliseconds matter here; wall-clock
//! timestamps for save metadata come from `chrono` at the persistence layer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic millisecond clock.
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

// ---------------------------------------------------------------------------
// System clock
// ---------------------------------------------------------------------------

/// Production clock backed by [`Instant`].
///
/// The origin is the moment of construction, so values start near zero
/// and never go backwards.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

// ---------------------------------------------------------------------------
// Manual clock (tests, replays)
// ---------------------------------------------------------------------------

/// Hand-driven clock for tests.
///
/// Clones share the same underlying counter, so a test can keep a handle
/// and advance time while the engine owns another clone.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a manual clock starting at 0 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    /// Jump the clock to an absolute value.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
