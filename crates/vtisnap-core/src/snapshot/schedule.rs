// crates/vtisnap-core/src/snapshot/schedule.rs

use crate::snapshot::Snapshot;

/// Snapshots of one model run, in request order.
#[derive(Clone, Debug, Default)]
pub struct SnapshotSchedule {
    snapshots: Vec<Snapshot>,
}

impl SnapshotSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, s: Snapshot) {
        self.snapshots.push(s);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Snapshots that fire on `iteration` and have not been written yet.
    pub fn due(&mut self, iteration: u64) -> impl Iterator<Item = &mut Snapshot> {
        self.snapshots
            .iter_mut()
            .filter(move |s| s.capture_step == iteration && !s.is_written())
    }

    /// Distinct capture iterations, ascending.
    pub fn capture_steps(&self) -> Vec<u64> {
        let mut steps: Vec<u64> = self.snapshots.iter().map(|s| s.capture_step).collect();
        steps.sort_unstable();
        steps.dedup();
        steps
    }

    /// Last iteration any snapshot needs; a driver can stop after it.
    pub fn last_step(&self) -> Option<u64> {
        self.snapshots.iter().map(|s| s.capture_step).max()
    }
}

impl FromIterator<Snapshot> for SnapshotSchedule {
    fn from_iter<I: IntoIterator<Item = Snapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}
