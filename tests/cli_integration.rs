// CLI integration tests for the wasmpack encode and generate flows.
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wasmpack"))
}

fn run_with_stdin(mut cmd: Command, input: &[u8]) -> Output {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input)
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8(output.stdout.clone())
        .expect("utf8 stdout")
        .trim_end()
        .to_string()
}

#[test]
fn encodes_table_bytes_to_single_symbols() {
    let output = run_with_stdin(cmd(), &[32]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "a");

    let output = run_with_stdin(cmd(), &[0, 65]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "bc");
}

#[test]
fn encodes_off_table_bytes_as_escape_pairs() {
    let output = run_with_stdin(cmd(), &[200]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), ";i");
}

#[test]
fn empty_input_encodes_to_an_empty_line() {
    let output = run_with_stdin(cmd(), &[]);
    assert!(output.status.success());
    assert_eq!(output.stdout, b"\n");
}

#[test]
fn unrecognized_modes_fall_back_to_encoding() {
    let mut command = cmd();
    command.arg("pack");
    let output = run_with_stdin(command, &[32]);
    assert!(output.status.success());
    assert_eq!(stdout_line(&output), "a");
}

#[test]
fn generate_emits_a_decimal_table_line() {
    let sample: Vec<u8> = (0u8..60).collect();
    let mut command = cmd();
    command.arg("generate");
    let output = run_with_stdin(command, &sample);
    assert!(output.status.success());

    let expected = (0u8..60)
        .map(|byte| byte.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    assert_eq!(stdout_line(&output), expected);
}

#[test]
fn generate_honors_only_the_final_argument() {
    let sample: Vec<u8> = (0u8..60).collect();
    let mut command = cmd();
    command.args(["pack", "generate"]);
    let output = run_with_stdin(command, &sample);
    assert!(output.status.success());
    assert!(stdout_line(&output).starts_with("0, 1, 2, "));
}

#[test]
fn insufficient_sample_exit_code() {
    let mut command = cmd();
    command.arg("generate");
    let output = run_with_stdin(command, &[1, 2, 3]);
    assert_eq!(output.status.code().unwrap(), 4);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InsufficientSample"));
    assert!(stderr.contains("3 distinct byte values"));
}
