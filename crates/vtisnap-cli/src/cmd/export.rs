// crates/vtisnap-cli/src/cmd/export.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use vtisnap_core::command::parse_input_commands;
use vtisnap_core::field::FieldArrays;
use vtisnap_core::progress::Counter;
use vtisnap_core::snapshot::schedule::SnapshotSchedule;
use vtisnap_core::{ExportConfig, Lattice, LineIntegralCurrent, Precision, RunContext};

use crate::util::file_id_hex;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Simulation input file; its #snapshot: lines are exported and its
    /// name decides the output directory (<stem>_snaps[N]).
    #[arg(long)]
    pub input: PathBuf,

    /// Lattice size in cells: nx ny nz
    #[arg(long, num_args = 3, value_names = ["NX", "NY", "NZ"], required = true)]
    pub size: Vec<usize>,

    /// Cell spacing in metres: dx dy dz
    #[arg(long, num_args = 3, value_names = ["DX", "DY", "DZ"], required = true)]
    pub spacing: Vec<f64>,

    /// Time step in seconds (converts snapshot times given in seconds)
    #[arg(long)]
    pub dt: f64,

    /// Float width of the written values: 32 or 64
    #[arg(long, default_value_t = 32)]
    pub precision: u32,

    /// Current model run (1-based)
    #[arg(long, default_value_t = 1)]
    pub model_run: usize,

    /// Total model runs; more than one adds the run index to the directory name
    #[arg(long, default_value_t = 1)]
    pub model_runs: usize,

    /// Uniform value of every E component
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub e: f64,

    /// Uniform value of every H component
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub h: f64,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    if args.model_run == 0 || args.model_run > args.model_runs {
        anyhow::bail!(
            "model run {} out of range 1..={}",
            args.model_run,
            args.model_runs
        );
    }

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read input {}", args.input.display()))?;
    let commands = parse_input_commands(&text)
        .with_context(|| format!("parse #snapshot: lines in {}", args.input.display()))?;
    if commands.is_empty() {
        anyhow::bail!("no #snapshot: commands in {}", args.input.display());
    }

    let lattice = Lattice::new(
        [args.size[0], args.size[1], args.size[2]],
        [args.spacing[0], args.spacing[1], args.spacing[2]],
        args.dt,
    );
    let config = ExportConfig::native(Precision::from_bits(args.precision)?);
    let run = RunContext::for_run(&args.input, args.model_run, args.model_runs);

    let mut schedule = SnapshotSchedule::new();
    for c in &commands {
        let snap = c
            .resolve(&lattice)
            .with_context(|| format!("resolve snapshot {}", c.filename))?;
        schedule.push(snap);
    }

    let fields = FieldArrays::uniform(FieldArrays::lattice_shape(&lattice), args.e, args.h);
    let view = fields.view();

    let mut written = 0usize;
    for iteration in schedule.capture_steps() {
        for snap in schedule.due(iteration) {
            let name = snap.basename.clone();
            let path = snap
                .prepare(&run, &lattice, config)
                .with_context(|| format!("prepare snapshot {name}"))?
                .to_path_buf();

            let mut progress = Counter::default();
            snap.write(&view, &lattice, &LineIntegralCurrent, &mut progress)
                .with_context(|| format!("write snapshot {}", path.display()))?;

            let g = snap.geometry()?;
            eprintln!(
                "snapshot ok: iteration={} out={} extent=\"{}\" cells={} bytes={} float_bytes={} id={}",
                iteration,
                path.display(),
                g.bounds.extent_attr(),
                g.cell_count(),
                snap.file_size().unwrap_or(0),
                progress.units,
                file_id_hex(&path)?
            );
            written += 1;
        }
    }

    eprintln!(
        "export ok: input={} snapshots={} precision={} byte_order={}",
        args.input.display(),
        written,
        config.precision.vtk_type(),
        config.byte_order.vtk_name()
    );
    Ok(())
}
