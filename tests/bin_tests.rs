//! The `gprx3000` binary end to end: program source, exit status, stdout and
//! stderr

use std::io::Write;
use std::process::{Command, Stdio};

struct Outcome {
  code: Option<i32>,
  stdout: String,
  stderr: String,
}

/// Run the binary with `args`, feeding `stdin` to it
fn gprx(args: &[&str], stdin: &str) -> Outcome {
  let mut child = Command::new(env!("CARGO_BIN_EXE_gprx3000"))
    .args(args)
    .env_remove("RUST_LOG")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .unwrap();
  child
    .stdin
    .take()
    .unwrap()
    .write_all(stdin.as_bytes())
    .unwrap();
  let output = child.wait_with_output().unwrap();
  Outcome {
    code: output.status.code(),
    stdout: String::from_utf8(output.stdout).unwrap(),
    stderr: String::from_utf8(output.stderr).unwrap(),
  }
}

#[test]
fn program_from_stdin_without_args() {
  let outcome = gprx(&[], "65p");
  assert_eq!(outcome.code, Some(0));
  assert_eq!(outcome.stdout, "A");
  assert!(outcome.stderr.is_empty());
}

#[test]
fn program_from_stdin_with_dash() {
  let outcome = gprx(&["-"], "66p");
  assert_eq!(outcome.code, Some(0));
  assert_eq!(outcome.stdout, "B");
}

#[test]
fn stdin_program_leaves_read_at_eof() {
  // `r` stores 0 at end of input, which prints as NUL
  let outcome = gprx(&[], "rp");
  assert_eq!(outcome.code, Some(0));
  assert_eq!(outcome.stdout, "\0");
}

#[test]
fn failure_keeps_earlier_output() {
  let outcome = gprx(&["-"], "65p9g");
  assert_eq!(outcome.code, Some(1));
  assert_eq!(outcome.stdout, "A");
  assert_eq!(
    outcome.stderr,
    "error: cannot jump to 9, program is only 5 characters long\n"
  );
}

#[test]
fn underflow_exits_with_failure() {
  let outcome = gprx(&[], "65p1x0-");
  assert_eq!(outcome.code, Some(1));
  assert_eq!(outcome.stdout, "A");
  assert!(outcome.stderr.starts_with("error: subtraction"));
}

#[test]
fn program_from_file_reads_stdin_as_input() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  write!(file, "1xr-pr-p").unwrap();
  let path = file.path().to_str().unwrap();
  let outcome = gprx(&[path], "ok");
  assert_eq!(outcome.code, Some(0));
  assert_eq!(outcome.stdout, "ok");
}

#[test]
fn missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nope.gprx");
  let outcome = gprx(&[path.to_str().unwrap()], "");
  assert_eq!(outcome.code, Some(1));
  assert!(outcome.stdout.is_empty());
  assert!(outcome.stderr.starts_with("error:"));
}
