//! Time sources used to stamp log lines

use core::cell::Cell;

/// Clock consulted by handlers when they write an event
pub trait TimeProvider {
    /// Milliseconds since boot, monotonic
    fn now_ms(&self) -> u64;

    /// Milliseconds since the Unix epoch, once wall-clock time is known (e.g. after NTP sync)
    fn unix_time_ms(&self) -> Option<u64> {
        None
    }

    /// Milliseconds elapsed since `since` (a value previously returned by `now_ms`)
    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now_ms().saturating_sub(since)
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn unix_time_ms(&self) -> Option<u64> {
        (**self).unix_time_ms()
    }
}

impl<T: TimeProvider + ?Sized> TimeProvider for alloc::rc::Rc<T> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn unix_time_ms(&self) -> Option<u64> {
        (**self).unix_time_ms()
    }
}

/// Clock that only moves when told to; for tests and bring-up
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
    unix_time_ms: Cell<Option<u64>>,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            unix_time_ms: Cell::new(None),
        }
    }

    pub fn set_ms(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance_ms(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    /// Set (or clear) the wall-clock time reported by [`TimeProvider::unix_time_ms`]
    pub fn set_unix_time_ms(&self, unix_time_ms: Option<u64>) {
        self.unix_time_ms.set(unix_time_ms);
    }
}

impl TimeProvider for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn unix_time_ms(&self) -> Option<u64> {
        self.unix_time_ms.get()
    }
}
