//! Cooperative pacing for sequences of API requests.

use std::time::Duration;

use tracing::trace;

/// How often to pause, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after this many items. Zero disables pacing.
    pub every: usize,
    pub pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            every: 10,
            pause: Duration::from_millis(100),
        }
    }
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            every: 0,
            pause: Duration::ZERO,
        }
    }
}

/// Something that can block for a while.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Iterator adapter that pauses after every `pacing.every` items.
///
/// The pause happens once the following item is known to exist, just before
/// it is handed out, so no delay follows the final item.
pub struct Paced<I, S = ThreadSleeper> {
    inner: I,
    pacing: Pacing,
    sleeper: S,
    yielded: usize,
}

impl<I: Iterator> Paced<I> {
    pub fn new(inner: I, pacing: Pacing) -> Self {
        Self::with_sleeper(inner, pacing, ThreadSleeper)
    }
}

impl<I: Iterator, S: Sleeper> Paced<I, S> {
    pub fn with_sleeper(inner: I, pacing: Pacing, sleeper: S) -> Self {
        Self {
            inner,
            pacing,
            sleeper,
            yielded: 0,
        }
    }
}

impl<I: Iterator, S: Sleeper> Iterator for Paced<I, S> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.inner.next()?;

        if self.pacing.every > 0 && self.yielded > 0 && self.yielded % self.pacing.every == 0 {
            trace!(after = self.yielded, pause = ?self.pacing.pause, "pacing");
            self.sleeper.sleep(self.pacing.pause);
        }

        self.yielded += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
