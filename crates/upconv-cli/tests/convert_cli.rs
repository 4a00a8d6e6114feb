use std::path::Path;
use std::process::{Command, Output};

fn upconv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_upconv"))
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

fn run_err(cmd: &mut Command) -> String {
    let out = cmd.output().expect("spawn command");
    assert!(!out.status.success(), "command unexpectedly succeeded");
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn write_pcm(path: &Path, samples: &[i16]) {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    std::fs::write(path, bytes).expect("write pcm");
}

#[test]
fn silence_converts_to_mid_code_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silence.pcm");
    let output = dir.path().join("silence.bin");
    write_pcm(&input, &[0; 10]);

    let out = run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
    ]));

    let packed = std::fs::read(&output).unwrap();
    assert_eq!(packed.len(), 10 * 520 / 2);
    assert!(packed.iter().all(|&b| b == 0x88));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("convert ok:"), "stderr:\n{stderr}");
    assert!(stderr.contains("codes=5200"), "stderr:\n{stderr}");
}

#[test]
fn stdout_and_file_outputs_match() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ramp.pcm");
    let output = dir.path().join("ramp.bin");
    let samples: Vec<i16> = (0..64).map(|i| (i * 900 - 30_000) as i16).collect();
    write_pcm(&input, &samples);

    run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
    ]));
    let piped = run_ok(upconv().args(["convert", "--in", input.to_str().unwrap()]));

    assert_eq!(std::fs::read(&output).unwrap(), piped.stdout);
}

#[test]
fn empty_input_writes_empty_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.pcm");
    let output = dir.path().join("empty.bin");
    write_pcm(&input, &[]);

    run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
    ]));
    assert!(std::fs::read(&output).unwrap().is_empty());
}

#[test]
fn wrong_declared_rate_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("x.pcm");
    write_pcm(&input, &[0, 1, 2]);

    let stderr = run_err(upconv().args(["convert", "--in", input.to_str().unwrap(), "--rate", "44100"]));
    assert!(stderr.contains("input contract"), "stderr:\n{stderr}");

    let stderr = run_err(upconv().args(["convert", "--in", input.to_str().unwrap(), "--channels", "2"]));
    assert!(stderr.contains("input contract"), "stderr:\n{stderr}");
}

#[test]
fn non_integer_sink_rate_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("x.pcm");
    write_pcm(&input, &[0]);

    let stderr = run_err(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--sink-rate",
        "25000000",
    ]));
    assert!(stderr.contains("configuration error"), "stderr:\n{stderr}");
}

#[test]
fn odd_code_count_pads_or_rejects() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one.pcm");
    let output = dir.path().join("one.bin");
    write_pcm(&input, &[0]);

    // 144 kHz / 48 kHz = 3 codes for one held sample.
    run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
        "--sink-rate",
        "144000",
    ]));
    assert_eq!(std::fs::read(&output).unwrap(), vec![0x88, 0x80]);

    let stderr = run_err(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--sink-rate",
        "144000",
        "--remainder",
        "reject",
    ]));
    assert!(stderr.contains("truncated input"), "stderr:\n{stderr}");
}

#[test]
fn analyze_reports_mid_code_for_silence() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silence.pcm");
    let output = dir.path().join("silence.bin");
    write_pcm(&input, &[0; 4]);

    run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
    ]));
    let out = run_ok(upconv().args(["analyze", "--in", output.to_str().unwrap()]));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("codes           = 2080"), "stderr:\n{stderr}");
    assert!(stderr.contains("mean_code       = 8.000000"), "stderr:\n{stderr}");
    assert!(stderr.contains("distinct_codes  = 1/16"), "stderr:\n{stderr}");
}

#[test]
fn analyze_zstd_report_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("silence.pcm");
    let output = dir.path().join("silence.bin");
    write_pcm(&input, &[0; 2]);

    run_ok(upconv().args([
        "convert",
        "--in",
        input.to_str().unwrap(),
        "--out",
        output.to_str().unwrap(),
    ]));

    let on = run_ok(upconv().args(["analyze", "--in", output.to_str().unwrap()]));
    assert!(String::from_utf8_lossy(&on.stderr).contains("--- zstd ---"));

    let off = run_ok(upconv().args(["analyze", "--in", output.to_str().unwrap(), "--zstd", "false"]));
    let stderr = String::from_utf8_lossy(&off.stderr);
    assert!(!stderr.contains("--- zstd ---"), "stderr:
{stderr}");
    assert!(stderr.contains("mean_code       = 8.000000"), "stderr:
{stderr}");
}
