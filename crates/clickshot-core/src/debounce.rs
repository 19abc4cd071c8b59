//! Time-windowed suppression of repeated captures
//!
//! The gate tracks a single "last accepted" timestamp. An event is accepted
//! when at least the configured window has elapsed since the previously
//! *accepted* event; rejected events do not move the timestamp. Check and
//! update happen under one lock so two events can never race through as
//! both accepted, even if a hook implementation delivers from multiple
//! native threads.

use std::time::Instant;

use parking_lot::Mutex;

/// Debounce gate with an injectable millisecond clock
///
/// Production callers use [`DebounceGate::accept_now`], which reads a
/// monotonic clock anchored at gate creation. Tests drive
/// [`DebounceGate::accept`] directly with synthetic timestamps.
#[derive(Debug)]
pub struct DebounceGate {
    window_ms: u64,
    last_accepted: Mutex<Option<u64>>,
    epoch: Instant,
}

impl DebounceGate {
    /// Creates a gate with the given suppression window in milliseconds
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted: Mutex::new(None),
            epoch: Instant::now(),
        }
    }

    /// Checks and records an event at `now_ms`
    ///
    /// Returns `true` and updates the last-accepted timestamp when
    /// `now_ms - last_accepted >= window_ms` (boundary inclusive) or when no
    /// event has been accepted yet. Returns `false` and leaves the state
    /// unchanged otherwise.
    pub fn accept(&self, now_ms: u64) -> bool {
        let mut last = self.last_accepted.lock();
        match *last {
            Some(prev) if now_ms.saturating_sub(prev) < self.window_ms => false,
            _ => {
                *last = Some(now_ms);
                true
            }
        }
    }

    /// Checks and records an event at the current monotonic time
    pub fn accept_now(&self) -> bool {
        self.accept(self.epoch.elapsed().as_millis() as u64)
    }

    /// The configured suppression window in milliseconds
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
