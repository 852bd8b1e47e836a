// crates/vtisnap-core/src/command.rs

use std::fmt;

use crate::error::{Result, SnapError};
use crate::geometry::{Stride, Volume, AXES};
use crate::lattice::Lattice;
use crate::snapshot::fmt::g;
use crate::snapshot::Snapshot;

pub const TAG: &str = "#snapshot:";

/// When a snapshot fires, as written in the input file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureTime {
    Iteration(u64),
    Seconds(f64),
}

impl CaptureTime {
    /// A literal containing `.` or an exponent is a time in seconds;
    /// anything else must be an iteration number.
    pub fn parse(tok: &str) -> Result<Self> {
        if tok.contains(['.', 'e', 'E']) {
            let s: f64 = tok
                .parse()
                .map_err(|_| SnapError::Command(format!("bad time in seconds: {tok:?}")))?;
            Ok(CaptureTime::Seconds(s))
        } else {
            let n: u64 = tok
                .parse()
                .map_err(|_| SnapError::Command(format!("bad iteration: {tok:?}")))?;
            Ok(CaptureTime::Iteration(n))
        }
    }

    /// Seconds map to `round(t / dt) + 1`; iterations pass through.
    pub fn to_iteration(self, dt: f64) -> Result<u64> {
        match self {
            CaptureTime::Iteration(0) => Err(SnapError::Config("snapshot iteration must be positive".into())),
            CaptureTime::Iteration(n) => Ok(n),
            CaptureTime::Seconds(t) if t > 0.0 && dt > 0.0 => {
                let steps = (t / dt).round_ties_even();
                // u64::MAX as f64 rounds up to 2^64, so `<` keeps the cast exact.
                if !steps.is_finite() || steps >= u64::MAX as f64 {
                    return Err(SnapError::Config(format!(
                        "snapshot time {t} s is beyond the representable iteration range at dt={dt}"
                    )));
                }
                (steps as u64).checked_add(1).ok_or_else(|| {
                    SnapError::Config(format!("snapshot time {t} s overflows the iteration counter"))
                })
            }
            CaptureTime::Seconds(t) => Err(SnapError::Config(format!(
                "snapshot time must be positive with a positive time step, got t={t} dt={dt}"
            ))),
        }
    }
}

impl fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureTime::Iteration(n) => write!(f, "{n}"),
            CaptureTime::Seconds(t) => f.write_str(&g(*t)),
        }
    }
}

/// One `#snapshot: xs ys zs xf yf zf dx dy dz time filename` request,
/// coordinates and discretisation in metres.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotCommand {
    pub start: [f64; 3],
    pub end: [f64; 3],
    pub discretisation: [f64; 3],
    pub time: CaptureTime,
    pub filename: String,
}

impl SnapshotCommand {
    pub fn parse(line: &str) -> Result<Self> {
        let rest = line
            .trim_start()
            .strip_prefix(TAG)
            .ok_or_else(|| SnapError::Command(format!("not a {TAG} line: {line:?}")))?;

        let toks: Vec<&str> = rest.split_whitespace().collect();
        if toks.len() != 11 {
            return Err(SnapError::Command(format!(
                "{TAG} expects 11 parameters, got {}",
                toks.len()
            )));
        }

        let mut nums = [0f64; 9];
        for (n, tok) in nums.iter_mut().zip(&toks[..9]) {
            *n = tok
                .parse()
                .map_err(|_| SnapError::Command(format!("bad number in {TAG}: {tok:?}")))?;
        }

        Ok(Self {
            start: [nums[0], nums[1], nums[2]],
            end: [nums[3], nums[4], nums[5]],
            discretisation: [nums[6], nums[7], nums[8]],
            time: CaptureTime::parse(toks[9])?,
            filename: toks[10].to_string(),
        })
    }

    /// Convert metres to lattice cells and seconds to an iteration.
    pub fn resolve(&self, lattice: &Lattice) -> Result<Snapshot> {
        let mut start = [0usize; 3];
        let mut end = [0usize; 3];
        let mut stride = [0usize; 3];

        for a in 0..3 {
            let d = lattice.spacing[a];
            start[a] = to_cells(self.start[a], d, lattice.size[a], AXES[a])?;
            end[a] = to_cells(self.end[a], d, lattice.size[a], AXES[a])?;
            if end[a] < start[a] {
                return Err(SnapError::Config(format!(
                    "snapshot {}: upper {} coordinate below lower",
                    self.filename, AXES[a]
                )));
            }

            let s = (self.discretisation[a] / d).round_ties_even();
            if !(s >= 1.0) {
                return Err(SnapError::Config(format!(
                    "snapshot {}: discretisation along {} ({}) is below the lattice spacing ({})",
                    self.filename, AXES[a], self.discretisation[a], d
                )));
            }
            stride[a] = s as usize;
        }

        let step = self.time.to_iteration(lattice.dt)?;
        Ok(Snapshot::new(Volume::new(start, end), Stride(stride), step, self.filename.clone()))
    }
}

fn to_cells(metres: f64, spacing: f64, size: usize, axis: char) -> Result<usize> {
    let c = (metres / spacing).round_ties_even();
    if !(c >= 0.0) || c > size as f64 {
        return Err(SnapError::Config(format!(
            "{axis} coordinate {metres} m lies outside the lattice (0..={size} cells)"
        )));
    }
    Ok(c as usize)
}

impl fmt::Display for SnapshotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TAG}")?;
        for v in self.start.iter().chain(&self.end).chain(&self.discretisation) {
            write!(f, " {}", g(*v))?;
        }
        write!(f, " {} {}", self.time, self.filename)
    }
}

/// Every `#snapshot:` command in an input file; other lines are ignored.
pub fn parse_input_commands(text: &str) -> Result<Vec<SnapshotCommand>> {
    text.lines()
        .filter(|l| l.trim_start().starts_with(TAG))
        .map(SnapshotCommand::parse)
        .collect()
}
