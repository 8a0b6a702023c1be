#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Runs msh in `dir`, feeding `script` on stdin.
pub fn run_msh_in(dir: &Path, script: &str, envs: &[(&str, &Path)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_msh"));
    cmd.current_dir(dir)
        .arg("--log-file")
        .arg(dir.join("msh-test.log"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("failed to execute msh");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for msh")
}

pub fn run_msh(script: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = run_msh_in(dir.path(), script, &[]);
    assert!(output.status.success(), "msh failed: {:?}", output);
    (dir, String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Extracts the pid from a `Background process is <pid>` line.
pub fn background_pid(stdout: &str) -> Option<i32> {
    stdout
        .lines()
        .find_map(|line| line.split("Background process is ").nth(1))
        .and_then(|pid| pid.trim().parse().ok())
}
