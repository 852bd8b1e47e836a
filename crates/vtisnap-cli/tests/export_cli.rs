use std::path::Path;
use std::process::{Command, Output};

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vtisnap-cli"))
}

fn run_ok(cmd: &mut Command) -> Output {
    let out = cmd.output().expect("spawn command");
    assert!(
        out.status.success(),
        "command failed: status={:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
    out
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("slab.in");
    std::fs::write(
        &input,
        "#title: slab\n\
         #domain: 0.02 0.02 0.02\n\
         #dx_dy_dz: 0.002 0.002 0.002\n\
         #snapshot: 0 0 0 0.01 0.01 0.01 0.002 0.002 0.002 3 early\n\
         #snapshot: 0 0 0 0.02 0.02 0.02 0.004 0.004 0.004 1e-11 late\n",
    )
    .unwrap();
    input
}

#[test]
fn export_writes_every_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path());

    let out = run_ok(cli().args([
        "export",
        "--input",
        input.to_str().unwrap(),
        "--size",
        "10",
        "10",
        "10",
        "--spacing",
        "0.002",
        "0.002",
        "0.002",
        "--dt",
        "2e-12",
        "--e",
        "1.5",
        "--h",
        "-0.5",
    ]));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("export ok:"), "stderr: {stderr}");
    assert!(stderr.contains("snapshots=2"), "stderr: {stderr}");

    let dir = tmp.path().join("slab_snaps");
    let early = std::fs::read(dir.join("early.vti")).unwrap();
    let late = std::fs::read(dir.join("late.vti")).unwrap();

    let early_text = String::from_utf8_lossy(&early);
    assert!(early_text.contains("WholeExtent=\"0 5 0 5 0 5\""));
    assert!(early_text.contains("Spacing=\"0.002 0.002 0.002\""));
    assert!(early_text.ends_with("\n</AppendedData>\n</VTKFile>"));

    let late_text = String::from_utf8_lossy(&late);
    assert!(late_text.contains("WholeExtent=\"0 5 0 5 0 5\""));
    assert!(late_text.contains("Spacing=\"0.004 0.004 0.004\""));

    // 125 cells, 3 float32 per cell.
    let offset_h = 125 * 12 + 4;
    assert!(early_text.contains(&format!("offset=\"{offset_h}\"")));
    assert!(early_text.contains(&format!("offset=\"{}\"", 2 * offset_h)));
}

#[test]
fn multi_run_export_uses_run_suffix() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path());

    run_ok(cli().args([
        "export",
        "--input",
        input.to_str().unwrap(),
        "--size",
        "10",
        "10",
        "10",
        "--spacing",
        "0.002",
        "0.002",
        "0.002",
        "--dt",
        "2e-12",
        "--precision",
        "64",
        "--model-run",
        "2",
        "--model-runs",
        "3",
    ]));

    let early = std::fs::read(tmp.path().join("slab_snaps2").join("early.vti")).unwrap();
    assert!(String::from_utf8_lossy(&early).contains("type=\"Float64\""));
    assert!(!tmp.path().join("slab_snaps").exists());
}

#[test]
fn command_normalises_line() {
    let out = run_ok(cli().args([
        "command", "0.0", "0", "0", "0.100", "0.1", "0.05", "0.004", "0.004", "0.002", "3.0e-9", "snap1",
    ]));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim_end(),
        "#snapshot: 0 0 0 0.1 0.1 0.05 0.004 0.004 0.002 3e-09 snap1"
    );
}

#[test]
fn distant_capture_step_exports_without_stepping_through() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("far.in");
    std::fs::write(
        &input,
        "#snapshot: 0 0 0 0.004 0.004 0.004 0.002 0.002 0.002 100000000000 far\n\
         #snapshot: 0 0 0 0.004 0.004 0.004 0.002 0.002 0.002 18446744073709551615 last\n",
    )
    .unwrap();

    let started = std::time::Instant::now();
    let out = run_ok(cli().args([
        "export",
        "--input",
        input.to_str().unwrap(),
        "--size",
        "4",
        "4",
        "4",
        "--spacing",
        "0.002",
        "0.002",
        "0.002",
        "--dt",
        "2e-12",
    ]));
    assert!(started.elapsed() < std::time::Duration::from_secs(30));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("iteration=100000000000"), "stderr: {stderr}");
    assert!(stderr.contains("snapshots=2"), "stderr: {stderr}");
    assert!(tmp.path().join("far_snaps").join("far.vti").exists());
    assert!(tmp.path().join("far_snaps").join("last.vti").exists());
}
