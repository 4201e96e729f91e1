//! Integration tests for command mode (-c/--command flag)

use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_literal_edit_and_query() {
    let (stdout, _, code) = run_command(&["-c", "A1=5; ?A1"]);
    assert_eq!(stdout.trim(), "5");
    assert_eq!(code, 0);
}

#[test]
fn test_formula_chain_recomputes_in_one_edit() {
    let (stdout, _, code) = run_command(&[
        "-c",
        "A1=1; B1==A1+1; C1==B1+1; A1=5; ?A1; ?B1; ?C1",
    ]);
    assert_eq!(stdout.trim(), "5\n6\n7");
    assert_eq!(code, 0);
}

#[test]
fn test_sum_over_range_tracks_blanking() {
    let (stdout, _, code) = run_command(&[
        "-c",
        "A1=1; A2=2; A3=3; B1==SUM(A1:A3); ?B1; A2=; ?B1",
    ]);
    assert_eq!(stdout.trim(), "6\n4");
    assert_eq!(code, 0);
}

#[test]
fn test_divide_by_zero_propagates() {
    let (stdout, _, code) = run_command(&["-c", "A1==10/0; B1==A1+1; ?A1; ?B1"]);
    assert_eq!(stdout.trim(), "#DIV/0!\n#DIV/0!");
    assert_eq!(code, 0);
}

#[test]
fn test_circular_reference_marks_both_cells() {
    let (stdout, _, code) = run_command(&["-c", "A1==B1+1; B1==A1+1; ?A1; ?B1"]);
    assert_eq!(stdout.trim(), "#CIRC!\n#CIRC!");
    assert_eq!(code, 0);
}

#[test]
fn test_out_of_bounds_reference_is_ref_error() {
    let (stdout, _, code) = run_command(&["-c", "A1==Z9999+1; ?A1"]);
    assert_eq!(stdout.trim(), "#REF!");
    assert_eq!(code, 0);
}

#[test]
fn test_dump_lists_cells_in_reading_order() {
    let (stdout, _, code) = run_command(&["-c", "B1==A1*2; A1=21; ?"]);
    assert_eq!(stdout.trim(), "A1 = 21 => 21\nB1 = =A1*2 => 42");
    assert_eq!(code, 0);
}

#[test]
fn test_small_grid_rejects_edit_outside_bounds() {
    let (stdout, _, code) = run_command(&["--cols", "2", "--rows", "2", "-c", "C1=5; ?C1"]);
    // C1 is outside a 2x2 grid: the edit commits nothing.
    assert_eq!(stdout.trim(), "#REF!");
    assert_eq!(code, 0);
}
