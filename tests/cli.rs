use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn vecreduce(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vecreduce"))
        .args(args)
        .current_dir(dir)
        .env_remove("VECREDUCE_MIN_LEN")
        .env_remove("VECREDUCE_THREADS")
        .env_remove("VECREDUCE_TIMING_LOG")
        .output()
        .expect("failed to run vecreduce")
}

#[test]
fn full_run_reports_every_operation_and_logs_it() {
    let dir = tempfile::tempdir().unwrap();
    let out = vecreduce(
        dir.path(),
        &[
            "--len", "2000", "--threads", "3", "--min", "-5", "--max", "5",
            "--data-file", "numbers.dat", "--timing-log", "times.txt",
        ],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Sequential (2000 x f64):"));
    assert!(stdout.contains("Parallel (3 threads):"));
    assert!(stdout.contains("Dot product with itself: "));

    assert_eq!(fs::metadata(dir.path().join("numbers.dat")).unwrap().len(), 2000 * 8);

    let log = fs::read_to_string(dir.path().join("times.txt")).unwrap();
    let names: Vec<&str> = log.lines().filter_map(|l| l.split(": ").next()).collect();
    assert_eq!(
        names,
        [
            "findMin", "findMax", "findAvg", "findSum", "findEuclid", "findManhattan",
            "findMin", "findMax", "findAvg", "findScalar",
            "findMinParallel", "findMaxParallel", "findSumParallel", "findAvgParallel",
            "findEuclidParallel", "findManhattanParallel", "findScalarParallel",
        ]
    );
}

#[test]
fn integer_run_without_timing_log() {
    let dir = tempfile::tempdir().unwrap();
    let out = vecreduce(
        dir.path(),
        &["--len", "1500", "--threads", "2", "--dtype", "i32", "--no-timing-log"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8(out.stdout).unwrap().contains("Sequential (1500 x i32):"));
    assert!(!dir.path().join("execution_times.txt").exists());
}

#[test]
fn too_short_buffer_fails_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    let out = vecreduce(dir.path(), &["--len", "10", "--no-timing-log"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("error:") && stderr.contains("below the minimum"), "{stderr}");
}

#[test]
fn inverted_range_fails_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    let out = vecreduce(
        dir.path(),
        &["--len", "2000", "--min", "9", "--max", "1", "--no-timing-log"],
    );

    assert!(!out.status.success());
    assert!(String::from_utf8(out.stderr).unwrap().contains("must be less than"));
}
