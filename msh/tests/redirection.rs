mod common;

use common::{run_msh, run_msh_in};
use std::fs;

#[test]
fn output_redirect_writes_file() {
    let (dir, stdout) = run_msh("echo hi > out.txt\nstatus\nexit\n");

    assert_eq!(stdout, ": : exit value 0\n: ");
    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "hi\n");
}

#[test]
fn output_redirect_truncates_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("out.txt"), "a much longer previous line\n").unwrap();

    run_msh_in(dir.path(), "echo new > out.txt\nexit\n", &[]);

    assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "new\n");
}

#[test]
fn input_redirect_feeds_command() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("in.txt"), "hello\nworld\n").unwrap();

    let output = run_msh_in(dir.path(), "wc -l < in.txt > count.txt\nexit\n", &[]);

    assert!(output.status.success());
    let count = fs::read_to_string(dir.path().join("count.txt")).unwrap();
    assert_eq!(count.trim(), "2");
}

#[test]
fn input_redirect_missing_file_sets_failure() {
    let (_dir, stdout) = run_msh("cat < missing.txt\nstatus\nexit\n");
    assert_eq!(stdout, ": Cannot open missing.txt for input.\n: exit value 1\n: ");
}

#[test]
fn output_redirect_into_missing_directory_sets_failure() {
    let (_dir, stdout) = run_msh("echo hi > nowhere/out.txt\nstatus\nexit\n");
    assert_eq!(
        stdout,
        ": Cannot open nowhere/out.txt for output.\n: exit value 1\n: "
    );
}

#[test]
fn unknown_command_is_reported_by_the_child() {
    let (_dir, stdout) = run_msh("definitely-not-a-command-msh\nstatus\nexit\n");
    assert_eq!(stdout, ": Command not found.\n: exit value 1\n: ");
}
