// crates/vtisnap-core/src/lattice.rs

use std::path::{Path, PathBuf};

/// Read-only description of the simulation lattice the fields live on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice {
    /// Physical cell size per axis (m): dx, dy, dz.
    pub spacing: [f64; 3],
    /// Time step (s).
    pub dt: f64,
    /// Number of cells per axis.
    pub size: [usize; 3],
}

impl Lattice {
    pub fn new(size: [usize; 3], spacing: [f64; 3], dt: f64) -> Self {
        Self { spacing, dt, size }
    }

    #[inline]
    pub fn dx(&self) -> f64 {
        self.spacing[0]
    }

    #[inline]
    pub fn dy(&self) -> f64 {
        self.spacing[1]
    }

    #[inline]
    pub fn dz(&self) -> f64 {
        self.spacing[2]
    }
}

/// Where the simulation input came from and which model run is active.
/// Decides the snapshot output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunContext {
    pub input_directory: PathBuf,
    pub input_file_name: String,
    /// 1-based index of the current model run.
    pub model_run: usize,
    /// Total number of model runs in this invocation.
    pub model_runs: usize,
}

impl RunContext {
    /// Context for a single run reading `input_file`.
    pub fn single(input_file: &Path) -> Self {
        Self::for_run(input_file, 1, 1)
    }

    pub fn for_run(input_file: &Path, model_run: usize, model_runs: usize) -> Self {
        let input_directory = input_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let input_file_name = input_file
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            input_directory,
            input_file_name,
            model_run,
            model_runs,
        }
    }

    /// `<input_directory>/<input_stem>_snaps[<model_run>]`.
    /// The run index is only appended when there is more than one run.
    pub fn snapshot_dir(&self) -> PathBuf {
        let stem = Path::new(&self.input_file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = if self.model_runs == 1 {
            format!("{stem}_snaps")
        } else {
            format!("{stem}_snaps{}", self.model_run)
        };
        self.input_directory.join(name)
    }
}
