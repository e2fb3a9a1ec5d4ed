use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_skyscore"))
}

struct SynthTrace {
    _dir: TempDir,
    csv_path: PathBuf,
}

impl SynthTrace {
    fn generate(seed: u64, points: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let csv_path = dir.path().join("trace.csv");

        let output = bin()
            .args([
                "synth",
                "--seed",
                &seed.to_string(),
                "--points",
                &points.to_string(),
                "--rule",
                "free-distance",
                "--out",
                csv_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to run synth");
        assert!(output.status.success(), "synth failed: {:?}", output);

        Self {
            _dir: dir,
            csv_path,
        }
    }
}

fn extract_score(stdout: &str) -> f64 {
    let re = Regex::new(r"(\d+\.\d{2}) pts").unwrap();
    let caps = re
        .captures(stdout)
        .unwrap_or_else(|| panic!("no score in output:\n{}", stdout));
    caps[1].parse().unwrap()
}

#[test]
fn synth_writes_a_replayable_trace() {
    let trace = SynthTrace::generate(7, 150);
    assert!(trace.csv_path.exists());

    let content = std::fs::read_to_string(&trace.csv_path).unwrap();
    assert!(content.starts_with("time,lat,lon"));
    assert_eq!(content.lines().count(), 151);
}

#[test]
fn replay_scores_a_synth_trace() {
    let trace = SynthTrace::generate(7, 150);

    let output = bin()
        .args([
            "replay",
            trace.csv_path.to_str().unwrap(),
            "--rule",
            "free-distance",
        ])
        .output()
        .expect("Failed to run replay");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("free-distance"), "output:\n{}", stdout);
    assert!(stdout.contains("SCORED"), "output:\n{}", stdout);
    assert!(extract_score(&stdout) > 1.0);
}

#[test]
fn replay_is_deterministic() {
    let trace = SynthTrace::generate(21, 200);

    let run = || {
        let output = bin()
            .args([
                "replay",
                trace.csv_path.to_str().unwrap(),
                "--rule",
                "free-distance",
            ])
            .output()
            .expect("Failed to run replay");
        assert!(output.status.success());
        extract_score(&String::from_utf8_lossy(&output.stdout))
    };

    assert_eq!(run(), run());
}

#[test]
fn handicap_flag_scales_the_score() {
    let trace = SynthTrace::generate(3, 150);

    let score_with = |extra: &[&str]| {
        let mut args = vec![
            "replay",
            trace.csv_path.to_str().unwrap(),
            "--rule",
            "free-distance",
        ];
        args.extend_from_slice(extra);
        let output = bin().args(&args).output().expect("Failed to run replay");
        assert!(output.status.success());
        extract_score(&String::from_utf8_lossy(&output.stdout))
    };

    let plain = score_with(&[]);
    let scaled = score_with(&["--handicap", "0.5"]);
    assert!((scaled - plain * 0.5).abs() < 0.02, "{} vs {}", plain, scaled);
}

#[test]
fn missing_file_does_not_crash_the_batch() {
    let output = bin()
        .args(["replay", "/definitely/not/here.csv"])
        .output()
        .expect("Failed to run replay");

    // The batch reports the failure and moves on; nothing is scored.
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Trace:"));
}
