//! Converts scheduler callbacks into generation ticks.

/// Fires once every `interval` calls to [`frame`](Pacer::frame).
///
/// The cadence only controls how fast a run is shown; it has no effect on
/// the generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    interval: u32,
    count: u32,
}

impl Pacer {
    /// An `interval` of zero behaves like one.
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            count: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Register one callback; returns `true` when a tick is due.
    pub fn frame(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.interval {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}
