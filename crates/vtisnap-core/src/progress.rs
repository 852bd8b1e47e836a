// crates/vtisnap-core/src/progress.rs

/// Receives incremental progress while a payload is written.
/// One unit is one byte of float data; length prefixes are not counted.
pub trait ProgressSink {
    fn advance(&mut self, units: u64);
}

/// Discards progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    #[inline]
    fn advance(&mut self, _units: u64) {}
}

/// Running total, for callers that only need the final count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Counter {
    pub units: u64,
}

impl ProgressSink for Counter {
    #[inline]
    fn advance(&mut self, units: u64) {
        self.units += units;
    }
}

impl<F: FnMut(u64)> ProgressSink for F {
    #[inline]
    fn advance(&mut self, units: u64) {
        self(units)
    }
}
